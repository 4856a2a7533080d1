//! Homogeneous displacement boundary conditions.
//!
//! Fixed degrees of freedom are eliminated without shrinking the system: the
//! matching row and column of the stiffness matrix are cleared with a unit
//! diagonal, and the matching load entry is cleared. The solved displacement
//! at each fixed degree of freedom is then exactly zero.
//!
//! Both functions work on copies. The unmodified matrix stays available for
//! recovering reactions as `K u`.

use nalgebra::{DMatrix, DVector};

use crate::dof::PrescribedDofs;
use crate::errors::AnalysisError;

/// Return a copy of `stiffness` with every prescribed row and column cleared.
///
/// # Errors
///
/// Returns [`AnalysisError::DimensionMismatch`] when `stiffness` is not square
/// and [`AnalysisError::Dof`] when a prescribed index does not fit it.
///
/// # Examples
/// ```
/// use nalgebra::DMatrix;
/// use trussdsm::{apply_to_stiffness, PrescribedDofs};
///
/// let k = DMatrix::from_element(3, 3, 4.0);
/// let pdof = PrescribedDofs::from_one_based(&[2], 3).unwrap();
/// let kmod = apply_to_stiffness(&pdof, &k).unwrap();
/// assert_eq!(kmod[(1, 1)], 1.0);
/// assert_eq!(kmod[(0, 1)], 0.0);
/// assert_eq!(k[(1, 1)], 4.0);
/// ```
pub fn apply_to_stiffness(
    pdof: &PrescribedDofs,
    stiffness: &DMatrix<f64>,
) -> Result<DMatrix<f64>, AnalysisError> {
    let ndof = stiffness.nrows();
    if stiffness.ncols() != ndof {
        return Err(AnalysisError::DimensionMismatch {
            expected: ndof,
            found: stiffness.ncols(),
        });
    }
    pdof.check_within(ndof)?;

    let mut modified = stiffness.clone();
    for &index in pdof.indices() {
        modified.row_mut(index).fill(0.0);
        modified.column_mut(index).fill(0.0);
        modified[(index, index)] = 1.0;
    }
    Ok(modified)
}

/// Return a copy of `forces` with every prescribed entry set to zero.
///
/// # Errors
///
/// Returns [`AnalysisError::Dof`] when a prescribed index does not fit.
pub fn apply_to_forces(
    pdof: &PrescribedDofs,
    forces: &DVector<f64>,
) -> Result<DVector<f64>, AnalysisError> {
    pdof.check_within(forces.len())?;
    let mut modified = forces.clone();
    for &index in pdof.indices() {
        modified[index] = 0.0;
    }
    Ok(modified)
}
