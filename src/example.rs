//! The three-bar example truss.
//!
//! ```text
//!            3 (10,10)
//!           /|
//!      [3] / | [2]
//!         /  |
//!  (0,0) 1---2 (10,0)
//!          [1]
//! ```
//!
//! Joint 1 is pinned, joint 2 rides on a roller that blocks vertical motion,
//! and joint 3 carries the load `(2, 1)`.

use nalgebra::{DMatrix, DVector};

use crate::errors::AnalysisError;
use crate::geometry::{force, point, Point};
use crate::model::TrussModel;

/// Joint coordinates.
pub const JOINTS: [Point; 3] = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];

/// Young's modulus shared by every bar.
pub const ELASTIC_MODULUS: f64 = 100.0;

/// Member definitions as `(joint i, joint j, area, freedom table)`, 1-based.
pub const MEMBERS: [(usize, usize, f64, [usize; 4]); 3] = [
    (1, 2, 1.0, [1, 2, 3, 4]),
    (2, 3, 0.5, [3, 4, 5, 6]),
    (1, 3, 2.0 * std::f64::consts::SQRT_2, [1, 2, 5, 6]),
];

/// Applied load vector `f`.
pub const LOADS: [f64; 6] = [0.0, 0.0, 0.0, 0.0, 2.0, 1.0];

/// Fixed degrees of freedom, 1-based.
pub const PRESCRIBED_DOFS: [usize; 3] = [1, 2, 4];

/// Build the example as a [`TrussModel`].
///
/// # Errors
///
/// The data is fixed and valid, so this only fails if the model's own
/// validation rules change.
///
/// # Examples
/// ```
/// let model = trussdsm::example_truss().unwrap();
/// assert_eq!(model.dof_count(), 6);
/// assert_eq!(model.member_count(), 3);
/// ```
pub fn example_truss() -> Result<TrussModel, AnalysisError> {
    let mut model = TrussModel::new();
    let joints: Vec<_> = JOINTS
        .iter()
        .map(|&position| model.add_joint(position))
        .collect();

    for (start, end, area, eft) in MEMBERS {
        model.add_member_with_eft(joints[start - 1], joints[end - 1], ELASTIC_MODULUS, area, eft)?;
    }

    for (joint, pair) in joints.iter().zip(LOADS.chunks_exact(2)) {
        model.set_load(*joint, force(pair[0], pair[1]))?;
    }
    model.set_prescribed_dofs(&PRESCRIBED_DOFS)?;
    Ok(model)
}

/// Assemble the global stiffness matrix of the example truss.
///
/// # Errors
///
/// See [`example_truss`].
pub fn assemble_global_stiffness() -> Result<DMatrix<f64>, AnalysisError> {
    example_truss()?.assemble_global_stiffness()
}

/// Axial forces `[f1, f2, f3]` of the example's bars for displacements `u`.
///
/// # Errors
///
/// Returns [`AnalysisError::DimensionMismatch`] unless `u` has six entries.
pub fn compute_internal_forces(displacements: &DVector<f64>) -> Result<[f64; 3], AnalysisError> {
    let forces = example_truss()?.internal_forces(displacements)?;
    Ok([forces[0], forces[1], forces[2]])
}
