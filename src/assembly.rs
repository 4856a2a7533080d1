//! Superposition of element matrices into the global stiffness matrix.

use nalgebra::{DMatrix, Matrix4};

use crate::dof::ElementFreedomTable;
use crate::errors::AnalysisError;

/// Add one element matrix into `global` at the positions named by `eft`.
///
/// Only the upper triangle of `element` is read; each term is accumulated at
/// `(eft[i], eft[j])` and the sum mirrored to `(eft[j], eft[i])`, so a
/// symmetric `global` stays symmetric after every call. Repeated calls
/// accumulate and never overwrite.
///
/// # Errors
///
/// Returns [`AnalysisError::DimensionMismatch`] when `global` is not square and
/// [`AnalysisError::Dof`] when `eft` addresses a row past its end. `global` is
/// left untouched on error.
///
/// # Examples
/// ```
/// use nalgebra::DMatrix;
/// use trussdsm::{form_element_stiffness, merge_into_global, point, ElementFreedomTable};
///
/// let ke = form_element_stiffness(point(0.0, 0.0), point(10.0, 0.0), 100.0, 1.0).unwrap();
/// let eft = ElementFreedomTable::from_one_based([1, 2, 3, 4], 6).unwrap();
/// let mut k = DMatrix::zeros(6, 6);
/// merge_into_global(&ke, &eft, &mut k).unwrap();
/// merge_into_global(&ke, &eft, &mut k).unwrap();
/// assert_eq!(k[(0, 0)], 20.0);
/// ```
pub fn merge_into_global(
    element: &Matrix4<f64>,
    eft: &ElementFreedomTable,
    global: &mut DMatrix<f64>,
) -> Result<(), AnalysisError> {
    let ndof = global.nrows();
    if global.ncols() != ndof {
        return Err(AnalysisError::DimensionMismatch {
            expected: ndof,
            found: global.ncols(),
        });
    }
    eft.check_within(ndof)?;

    let map = eft.indices();
    for i in 0..4 {
        let ii = map[i];
        for j in i..4 {
            let jj = map[j];
            global[(ii, jj)] += element[(i, j)];
            global[(jj, ii)] = global[(ii, jj)];
        }
    }
    Ok(())
}

/// Build a global stiffness matrix of size `ndof` from element contributions.
///
/// The matrix starts at zero and each `(matrix, table)` pair is folded in with
/// [`merge_into_global`]. The result does not depend on the order of the
/// contributions beyond floating-point rounding.
///
/// # Errors
///
/// Propagates the first error from [`merge_into_global`].
pub fn assemble<'a, I>(ndof: usize, contributions: I) -> Result<DMatrix<f64>, AnalysisError>
where
    I: IntoIterator<Item = (&'a Matrix4<f64>, &'a ElementFreedomTable)>,
{
    contributions
        .into_iter()
        .try_fold(
            DMatrix::zeros(ndof, ndof),
            |mut global, (element, eft)| -> Result<_, AnalysisError> {
                merge_into_global(element, eft, &mut global)?;
                Ok(global)
            },
        )
}
