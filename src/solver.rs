//! Dense linear algebra on the constrained system.
//!
//! Element-level work uses small fixed-size matrices; the global system is a
//! dense `DMatrix` solved directly with nalgebra's LU factorisation.

use nalgebra::{DMatrix, DVector};

use crate::errors::AnalysisError;

/// Solve `stiffness * u = forces` for `u`.
///
/// # Errors
///
/// Returns [`AnalysisError::DimensionMismatch`] for incompatible sizes and
/// [`AnalysisError::SingularSystem`] when the factorisation breaks down or
/// produces non-finite displacements.
///
/// # Examples
/// ```
/// use nalgebra::{DMatrix, DVector};
/// use trussdsm::solve;
///
/// let k = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
/// let u = solve(&k, &DVector::from_vec(vec![1.0, 1.0])).unwrap();
/// assert_eq!(u[1], 0.25);
/// ```
pub fn solve(
    stiffness: &DMatrix<f64>,
    forces: &DVector<f64>,
) -> Result<DVector<f64>, AnalysisError> {
    check_square(stiffness)?;
    if forces.len() != stiffness.nrows() {
        return Err(AnalysisError::DimensionMismatch {
            expected: stiffness.nrows(),
            found: forces.len(),
        });
    }
    let solution = stiffness
        .clone()
        .lu()
        .solve(forces)
        .ok_or(AnalysisError::SingularSystem)?;
    if solution.iter().all(|value| value.is_finite()) {
        Ok(solution)
    } else {
        Err(AnalysisError::SingularSystem)
    }
}

/// Spectral summary of a constrained stiffness matrix.
///
/// A zero (or near-zero) eigenvalue exposes a mechanism; its eigenvector shows
/// the motion the supports fail to restrain.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    /// Determinant of the matrix.
    pub determinant: f64,
    /// Eigenvalues in ascending order.
    pub eigenvalues: DVector<f64>,
    /// Unit eigenvectors, column `k` belonging to eigenvalue `k`.
    pub eigenvectors: DMatrix<f64>,
    /// Largest entry of `|K v - lambda v|` over all eigenpairs.
    pub residual: f64,
}

impl Diagnostics {
    /// Decompose a symmetric matrix.
    ///
    /// An empty matrix yields no eigenpairs and a determinant of one.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DimensionMismatch`] when `stiffness` is not
    /// square.
    pub fn of(stiffness: &DMatrix<f64>) -> Result<Self, AnalysisError> {
        check_square(stiffness)?;
        if stiffness.is_empty() {
            return Ok(Self {
                determinant: 1.0,
                eigenvalues: DVector::zeros(0),
                eigenvectors: DMatrix::zeros(0, 0),
                residual: 0.0,
            });
        }
        let determinant = stiffness.determinant();
        let eigen = stiffness.clone().symmetric_eigen();

        let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let n = order.len();
        let eigenvalues = DVector::from_fn(n, |k, _| eigen.eigenvalues[order[k]]);
        let eigenvectors = DMatrix::from_fn(n, n, |i, k| eigen.eigenvectors[(i, order[k])]);

        let residual = (0..n)
            .map(|k| {
                let vector = eigenvectors.column(k);
                (stiffness * vector - vector * eigenvalues[k]).amax()
            })
            .fold(0.0, f64::max);

        Ok(Self {
            determinant,
            eigenvalues,
            eigenvectors,
            residual,
        })
    }

    /// Smallest eigenvalue, or `None` for an empty matrix.
    #[must_use]
    pub fn smallest_eigenvalue(&self) -> Option<f64> {
        self.eigenvalues.iter().next().copied()
    }
}

/// External nodal forces, reactions included, from the unmodified matrix.
///
/// # Errors
///
/// Returns [`AnalysisError::DimensionMismatch`] for incompatible sizes.
pub fn external_forces(
    stiffness: &DMatrix<f64>,
    displacements: &DVector<f64>,
) -> Result<DVector<f64>, AnalysisError> {
    if stiffness.ncols() != displacements.len() {
        return Err(AnalysisError::DimensionMismatch {
            expected: stiffness.ncols(),
            found: displacements.len(),
        });
    }
    Ok(stiffness * displacements)
}

/// Reject non-square matrices.
fn check_square(matrix: &DMatrix<f64>) -> Result<(), AnalysisError> {
    if matrix.nrows() == matrix.ncols() {
        Ok(())
    } else {
        Err(AnalysisError::DimensionMismatch {
            expected: matrix.nrows(),
            found: matrix.ncols(),
        })
    }
}
