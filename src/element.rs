//! Two-node planar bar element.
//!
//! A bar carries axial load only. Its global stiffness is the rank-one matrix
//!
//! ```text
//!          EA | cc  cs -cc -cs |
//! K_e  =  --- | cs  ss -cs -ss |
//!          L  |-cc -cs  cc  cs |
//!             |-cs -ss  cs  ss |
//! ```
//!
//! with `c` and `s` the direction cosines of the axis running from node `i` to
//! node `j`. See <https://en.wikipedia.org/wiki/Direct_stiffness_method>.

use nalgebra::{DVector, Matrix4, Vector4};

use crate::dof::ElementFreedomTable;
use crate::errors::{AnalysisError, DofError, ElementError};
use crate::geometry::{Orientation, Point};

/// A validated bar between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar2D {
    /// Position of node `i`.
    start: Point,
    /// Position of node `j`.
    end: Point,
    /// Young's modulus.
    elastic_modulus: f64,
    /// Cross-sectional area.
    area: f64,
    /// Length and direction cosines, measured once at construction.
    orientation: Orientation,
}

impl Bar2D {
    /// Create a bar, rejecting non-physical properties and coincident nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::NonPositiveElasticModulus`],
    /// [`ElementError::NonPositiveArea`] or
    /// [`ElementError::DegenerateGeometry`].
    pub fn new(
        start: Point,
        end: Point,
        elastic_modulus: f64,
        area: f64,
    ) -> Result<Self, ElementError> {
        if !elastic_modulus.is_finite() || elastic_modulus <= 0.0 {
            return Err(ElementError::NonPositiveElasticModulus { elastic_modulus });
        }
        if !area.is_finite() || area <= 0.0 {
            return Err(ElementError::NonPositiveArea { area });
        }
        let orientation = Orientation::between(start, end)?;
        Ok(Self {
            start,
            end,
            elastic_modulus,
            area,
            orientation,
        })
    }

    /// Position of node `i`.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Position of node `j`.
    #[must_use]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Young's modulus.
    #[must_use]
    pub fn elastic_modulus(&self) -> f64 {
        self.elastic_modulus
    }

    /// Cross-sectional area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Length and direction cosines of the bar axis.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Axial stiffness `EA / L`.
    #[must_use]
    pub fn axial_stiffness(&self) -> f64 {
        self.elastic_modulus * self.area / self.orientation.length
    }

    /// Global 4x4 stiffness matrix in local slot order `(ix, iy, jx, jy)`.
    ///
    /// Every entry is written from the closed form, so the result is exactly
    /// symmetric and every row sums to zero.
    #[must_use]
    pub fn stiffness(&self) -> Matrix4<f64> {
        let Orientation { cos: c, sin: s, .. } = self.orientation;
        let cc = c * c;
        let ss = s * s;
        let cs = c * s;

        let pattern = Matrix4::new(
            cc, cs, -cc, -cs, //
            cs, ss, -cs, -ss, //
            -cc, -cs, cc, cs, //
            -cs, -ss, cs, ss,
        );
        pattern * self.axial_stiffness()
    }

    /// Axial force from the global displacement vector, tension positive.
    ///
    /// The end displacements are gathered through `eft` and projected onto the
    /// bar axis; only the relative axial motion produces strain.
    ///
    /// # Errors
    ///
    /// Returns [`DofError::OutOfRange`] when `eft` addresses an entry past the
    /// end of `displacements`.
    pub fn axial_force(
        &self,
        eft: &ElementFreedomTable,
        displacements: &DVector<f64>,
    ) -> Result<f64, DofError> {
        eft.check_within(displacements.len())?;
        let [ix, iy, jx, jy] = eft.indices();
        let axial_i = self.orientation.axial(displacements[ix], displacements[iy]);
        let axial_j = self.orientation.axial(displacements[jx], displacements[jy]);
        let strain = (axial_j - axial_i) / self.orientation.length;
        Ok(self.elastic_modulus * self.area * strain)
    }

    /// Nodal forces the bar exerts for a given axial force, in slot order.
    ///
    /// Scattering these through the element freedom table reproduces `K u`.
    #[must_use]
    pub fn end_forces(&self, axial_force: f64) -> Vector4<f64> {
        let Orientation { cos: c, sin: s, .. } = self.orientation;
        Vector4::new(-c, -s, c, s) * axial_force
    }
}

/// Form the 4x4 stiffness matrix of a bar between `start` and `end`.
///
/// # Errors
///
/// Returns [`ElementError`] when the bar cannot be formed, most notably
/// [`ElementError::DegenerateGeometry`] for coincident nodes.
///
/// # Examples
/// ```
/// use trussdsm::{form_element_stiffness, point};
///
/// let ke = form_element_stiffness(point(0.0, 0.0), point(10.0, 0.0), 100.0, 1.0).unwrap();
/// assert_eq!(ke[(0, 0)], 10.0);
/// assert_eq!(ke[(0, 2)], -10.0);
/// assert_eq!(ke[(1, 1)], 0.0);
/// ```
pub fn form_element_stiffness(
    start: Point,
    end: Point,
    elastic_modulus: f64,
    area: f64,
) -> Result<Matrix4<f64>, ElementError> {
    Ok(Bar2D::new(start, end, elastic_modulus, area)?.stiffness())
}

/// Recover the axial force of a bar from the global displacement vector.
///
/// # Errors
///
/// Returns [`AnalysisError::Element`] when the bar cannot be formed and
/// [`AnalysisError::Dof`] when `eft` does not fit `displacements`.
pub fn recover_element_force(
    start: Point,
    end: Point,
    elastic_modulus: f64,
    area: f64,
    eft: &ElementFreedomTable,
    displacements: &DVector<f64>,
) -> Result<f64, AnalysisError> {
    let bar = Bar2D::new(start, end, elastic_modulus, area)?;
    Ok(bar.axial_force(eft, displacements)?)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;

    fn diagonal_bar() -> Bar2D {
        Bar2D::new(point(0.0, 0.0), point(10.0, 10.0), 100.0, 2.0 * 2.0_f64.sqrt())
            .expect("valid bar")
    }

    #[test]
    fn stiffness_is_symmetric_with_zero_row_sums() {
        let cases = [
            (point(0.0, 0.0), point(10.0, 0.0)),
            (point(10.0, 0.0), point(10.0, 10.0)),
            (point(0.0, 0.0), point(10.0, 10.0)),
            (point(-3.5, 2.0), point(4.25, -7.0)),
        ];
        for (start, end) in cases {
            let ke = form_element_stiffness(start, end, 210.0, 0.75).expect("valid bar");
            assert_eq!(ke, ke.transpose());
            for row in ke.row_iter() {
                assert_relative_eq!(row.sum(), 0.0, epsilon = 1.0e-12);
            }
        }
    }

    #[test]
    fn stiffness_of_diagonal_bar() {
        let ke = diagonal_bar().stiffness();
        // EA/L = 100 * 2√2 / 10√2 = 20, and every cosine product is 1/2.
        for i in 0..4 {
            for j in 0..4 {
                let sign = if (i < 2) == (j < 2) { 1.0 } else { -1.0 };
                assert_relative_eq!(ke[(i, j)], sign * 10.0, epsilon = 1.0e-12);
            }
        }
    }

    #[test]
    fn stiffness_has_rank_one() {
        let ke = diagonal_bar().stiffness();
        let eigen = ke.symmetric_eigen();
        let nonzero = eigen
            .eigenvalues
            .iter()
            .filter(|value| value.abs() > 1.0e-9)
            .count();
        assert_eq!(nonzero, 1);
        assert!(eigen.eigenvalues.iter().all(|value| *value > -1.0e-9));
    }

    #[test]
    fn rigid_translation_produces_no_force() {
        let ke = diagonal_bar().stiffness();
        let translation = Vector4::new(0.3, -1.7, 0.3, -1.7);
        assert_relative_eq!((ke * translation).norm(), 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn coincident_nodes_are_rejected() {
        let error = form_element_stiffness(point(2.0, 3.0), point(2.0, 3.0), 100.0, 1.0)
            .expect_err("degenerate bar rejected");
        assert_eq!(error, ElementError::DegenerateGeometry { length: 0.0 });
    }

    #[test]
    fn non_positive_properties_are_rejected() {
        assert_eq!(
            Bar2D::new(point(0.0, 0.0), point(1.0, 0.0), 0.0, 1.0),
            Err(ElementError::NonPositiveElasticModulus {
                elastic_modulus: 0.0
            })
        );
        assert_eq!(
            Bar2D::new(point(0.0, 0.0), point(1.0, 0.0), 100.0, -1.0),
            Err(ElementError::NonPositiveArea { area: -1.0 })
        );
        assert_eq!(
            Bar2D::new(point(0.0, 0.0), point(1.0, 0.0), 100.0, f64::INFINITY),
            Err(ElementError::NonPositiveArea {
                area: f64::INFINITY
            })
        );
        assert!(matches!(
            Bar2D::new(point(0.0, 0.0), point(1.0, 0.0), f64::NAN, 1.0),
            Err(ElementError::NonPositiveElasticModulus { .. })
        ));
    }

    #[test]
    fn axial_force_follows_relative_axial_motion() {
        let bar = diagonal_bar();
        let eft = ElementFreedomTable::for_joints(0, 1);
        let displacements = DVector::from_vec(vec![0.0, 0.0, 0.4, -0.2]);
        let force = bar.axial_force(&eft, &displacements).expect("fits");
        assert_relative_eq!(force, 2.0 * 2.0_f64.sqrt(), epsilon = 1.0e-12);
    }

    #[test]
    fn transverse_motion_produces_no_force() {
        let bar = Bar2D::new(point(0.0, 0.0), point(10.0, 0.0), 100.0, 1.0).expect("valid bar");
        let eft = ElementFreedomTable::for_joints(0, 1);
        let displacements = DVector::from_vec(vec![0.0, 0.5, 0.0, -0.5]);
        assert_eq!(bar.axial_force(&eft, &displacements), Ok(0.0));
    }

    #[test]
    fn axial_force_is_linear_in_displacements() {
        let bar = Bar2D::new(point(1.0, 2.0), point(4.0, 6.0), 70.0, 0.3).expect("valid bar");
        let eft = ElementFreedomTable::from_one_based([5, 6, 1, 2], 6).expect("valid table");
        let u1 = DVector::from_vec(vec![0.1, -0.2, 0.05, 0.3, 0.7, -0.4]);
        let u2 = DVector::from_vec(vec![-0.6, 0.25, 0.0, 1.1, 0.2, 0.9]);
        let sum = &u1 + &u2;

        let f1 = bar.axial_force(&eft, &u1).expect("fits");
        let f2 = bar.axial_force(&eft, &u2).expect("fits");
        let f_sum = bar.axial_force(&eft, &sum).expect("fits");
        assert_relative_eq!(f_sum, f1 + f2, epsilon = 1.0e-12);

        let scaled = bar.axial_force(&eft, &(&u1 * 3.0)).expect("fits");
        assert_relative_eq!(scaled, 3.0 * f1, epsilon = 1.0e-12);
    }

    #[test]
    fn short_displacement_vector_is_rejected() {
        let bar = diagonal_bar();
        let eft = ElementFreedomTable::for_joints(0, 2);
        let displacements = DVector::zeros(4);
        assert_eq!(
            bar.axial_force(&eft, &displacements),
            Err(DofError::OutOfRange { index: 5, ndof: 4 })
        );
    }

    #[test]
    fn free_function_recovers_force() {
        let eft = ElementFreedomTable::from_one_based([3, 4, 5, 6], 6).expect("valid table");
        let u = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0, 0.4, -0.2]);
        let force = recover_element_force(point(10.0, 0.0), point(10.0, 10.0), 100.0, 0.5, &eft, &u)
            .expect("valid element");
        assert_relative_eq!(force, -1.0, epsilon = 1.0e-12);

        let error = recover_element_force(point(0.0, 0.0), point(0.0, 0.0), 100.0, 0.5, &eft, &u)
            .expect_err("degenerate bar rejected");
        assert!(matches!(
            error,
            AnalysisError::Element(ElementError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn end_forces_are_self_equilibrated() {
        let forces = diagonal_bar().end_forces(4.0);
        assert_relative_eq!(forces[0] + forces[2], 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(forces[1] + forces[3], 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(forces[2], 4.0 * 0.5_f64.sqrt(), epsilon = 1.0e-12);
    }
}
