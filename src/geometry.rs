//! Fundamental geometric types for planar truss modelling.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::errors::ElementError;

/// Lengths at or below this value are treated as coincident end points.
pub const LENGTH_TOLERANCE: f64 = 1.0e-10;

/// Position in the plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Return this point moved by `scale` times the supplied displacement pair.
    #[must_use]
    pub fn displaced(self, ux: f64, uy: f64, scale: f64) -> Self {
        Self::new(self.x + scale * ux, self.y + scale * uy)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Planar nodal load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Force component acting along the global X axis.
    pub x: f64,
    /// Force component acting along the global Y axis.
    pub y: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Length and direction cosines of the line running from one point to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    /// Distance between the two points.
    pub length: f64,
    /// Cosine of the angle between the bar axis and global X.
    pub cos: f64,
    /// Sine of the angle between the bar axis and global X.
    pub sin: f64,
}

impl Orientation {
    /// Measure the segment from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::DegenerateGeometry`] when the points are closer
    /// than [`LENGTH_TOLERANCE`] or the length is not finite.
    ///
    /// # Examples
    /// ```
    /// use trussdsm::{point, Orientation};
    ///
    /// let orientation = Orientation::between(point(0.0, 0.0), point(3.0, 4.0)).unwrap();
    /// assert_eq!(orientation.length, 5.0);
    /// assert_eq!(orientation.cos, 0.6);
    /// ```
    pub fn between(start: Point, end: Point) -> Result<Self, ElementError> {
        let delta = end.to_vector() - start.to_vector();
        let length = delta.norm();
        if !length.is_finite() || length <= LENGTH_TOLERANCE {
            return Err(ElementError::DegenerateGeometry { length });
        }
        Ok(Self {
            length,
            cos: delta.x / length,
            sin: delta.y / length,
        })
    }

    /// Project a global displacement pair onto the bar axis.
    #[must_use]
    pub fn axial(&self, ux: f64, uy: f64) -> f64 {
        self.cos * ux + self.sin * uy
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trussdsm::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Convenience helper for creating [`Force`] instances.
///
/// # Examples
/// ```
/// use trussdsm::force;
///
/// let load = force(2.0, 1.0);
/// assert_eq!(load.y, 1.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64) -> Force {
    Force::new(x, y)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn point_to_vector_roundtrip() {
        let origin = Point::new(1.0, 2.0);
        let vector: Vector2<f64> = origin.into();
        assert_eq!(vector, Vector2::new(1.0, 2.0));
        assert_eq!(Point::from(vector), origin);
    }

    #[test]
    fn force_defaults_to_zero() {
        assert_eq!(Force::default(), Force::new(0.0, 0.0));
    }

    #[test]
    fn diagonal_orientation() {
        let orientation =
            Orientation::between(point(0.0, 0.0), point(10.0, 10.0)).expect("valid segment");
        assert_relative_eq!(orientation.length, 10.0 * 2.0_f64.sqrt(), epsilon = 1.0e-12);
        assert_relative_eq!(orientation.cos, 0.5_f64.sqrt(), epsilon = 1.0e-12);
        assert_relative_eq!(orientation.sin, 0.5_f64.sqrt(), epsilon = 1.0e-12);
    }

    #[test]
    fn orientation_follows_direction() {
        let orientation =
            Orientation::between(point(10.0, 0.0), point(0.0, 0.0)).expect("valid segment");
        assert_eq!(orientation.cos, -1.0);
        assert_eq!(orientation.sin, 0.0);
    }

    #[test]
    fn coincident_points_are_rejected() {
        let error = Orientation::between(point(1.0, 1.0), point(1.0, 1.0))
            .expect_err("zero length rejected");
        assert_eq!(error, ElementError::DegenerateGeometry { length: 0.0 });

        let error = Orientation::between(point(0.0, 0.0), point(1.0e-12, 0.0))
            .expect_err("length within tolerance rejected");
        assert!(matches!(error, ElementError::DegenerateGeometry { .. }));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let error = Orientation::between(point(0.0, 0.0), point(f64::NAN, 0.0))
            .expect_err("nan length rejected");
        assert!(matches!(error, ElementError::DegenerateGeometry { .. }));

        let error = Orientation::between(point(0.0, 0.0), point(f64::INFINITY, 1.0))
            .expect_err("infinite length rejected");
        assert_eq!(
            error,
            ElementError::DegenerateGeometry {
                length: f64::INFINITY
            }
        );
    }

    #[test]
    fn displaced_point_scales_displacement() {
        let moved = point(10.0, 10.0).displaced(0.4, -0.2, 5.0);
        assert_relative_eq!(moved.x, 12.0, epsilon = 1.0e-12);
        assert_relative_eq!(moved.y, 9.0, epsilon = 1.0e-12);
    }
}
