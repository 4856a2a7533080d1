//! Interpolated deformation frames for visualising a solved truss.
//!
//! Frame `i` of `n` draws every member with its end points moved by
//! `i / n * scale * u`, reading each end's displacement through the member's
//! freedom table. The first frame is the undeformed structure.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;
use crate::geometry::Point;
use crate::model::TrussModel;

/// Position of a frame within the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The undeformed configuration.
    Initial,
    /// A partially deformed configuration.
    Intermediate,
    /// The last, most deformed configuration.
    Final,
}

/// One outline of the structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Where this frame sits in the sequence.
    pub stage: Stage,
    /// Multiplier applied to the displacement field.
    pub factor: f64,
    /// End points of every member, in insertion order.
    pub members: Vec<[Point; 2]>,
}

/// Produce `frame_count` outlines of the structure deforming under `u`.
///
/// # Errors
///
/// Returns [`AnalysisError::DimensionMismatch`] unless `displacements` has one
/// entry per degree of freedom.
///
/// # Examples
/// ```
/// use nalgebra::DVector;
/// use trussdsm::{deformation_frames, example_truss, Stage};
///
/// let model = example_truss().unwrap();
/// let u = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0, 0.4, -0.2]);
/// let frames = deformation_frames(&model, &u, 6, 5.0).unwrap();
/// assert_eq!(frames.len(), 6);
/// assert_eq!(frames[0].stage, Stage::Initial);
/// assert_eq!(frames[5].stage, Stage::Final);
/// ```
pub fn deformation_frames(
    model: &TrussModel,
    displacements: &DVector<f64>,
    frame_count: usize,
    scale: f64,
) -> Result<Vec<Frame>, AnalysisError> {
    if displacements.len() != model.dof_count() {
        return Err(AnalysisError::DimensionMismatch {
            expected: model.dof_count(),
            found: displacements.len(),
        });
    }

    let mut frames = Vec::with_capacity(frame_count);
    for step in 0..frame_count {
        let factor = step as f64 / frame_count as f64 * scale;
        let members = model
            .members()
            .map(|(bar, eft)| {
                let [ix, iy, jx, jy] = eft.indices();
                [
                    bar.start()
                        .displaced(displacements[ix], displacements[iy], factor),
                    bar.end()
                        .displaced(displacements[jx], displacements[jy], factor),
                ]
            })
            .collect();
        let stage = if step == 0 {
            Stage::Initial
        } else if step + 1 == frame_count {
            Stage::Final
        } else {
            Stage::Intermediate
        };
        frames.push(Frame {
            stage,
            factor,
            members,
        });
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::example::example_truss;

    fn solved() -> DVector<f64> {
        DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0, 0.4, -0.2])
    }

    #[test]
    fn first_frame_is_undeformed() {
        let model = example_truss().expect("example builds");
        let frames = deformation_frames(&model, &solved(), 4, 5.0).expect("sizes match");
        assert_eq!(frames[0].factor, 0.0);
        assert_eq!(frames[0].members[2][1], Point::new(10.0, 10.0));
    }

    #[test]
    fn last_frame_uses_fraction_of_scale() {
        let model = example_truss().expect("example builds");
        let frames = deformation_frames(&model, &solved(), 6, 5.0).expect("sizes match");
        let last = frames.last().expect("six frames");
        assert_relative_eq!(last.factor, 5.0 * 5.0 / 6.0, epsilon = 1.0e-12);
        let tip = last.members[1][1];
        assert_relative_eq!(tip.x, 10.0 + last.factor * 0.4, epsilon = 1.0e-12);
        assert_relative_eq!(tip.y, 10.0 - last.factor * 0.2, epsilon = 1.0e-12);
        assert!(frames[1..5]
            .iter()
            .all(|frame| frame.stage == Stage::Intermediate));
    }

    #[test]
    fn degenerate_frame_counts() {
        let model = example_truss().expect("example builds");
        assert!(deformation_frames(&model, &solved(), 0, 5.0)
            .expect("sizes match")
            .is_empty());
        let single = deformation_frames(&model, &solved(), 1, 5.0).expect("sizes match");
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].stage, Stage::Initial);
    }

    #[test]
    fn frames_serialise_to_json() {
        let model = example_truss().expect("example builds");
        let frames = deformation_frames(&model, &solved(), 2, 1.0).expect("sizes match");
        let json = serde_json::to_string(&frames).expect("serialisable");
        assert!(json.contains("\"stage\":\"initial\""));
        assert!(json.contains("\"stage\":\"final\""));
        assert!(json.contains("\"factor\":0.5"));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let model = example_truss().expect("example builds");
        assert_eq!(
            deformation_frames(&model, &DVector::zeros(5), 3, 1.0),
            Err(AnalysisError::DimensionMismatch {
                expected: 6,
                found: 5
            })
        );
    }
}
