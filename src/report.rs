//! Console and JSON reporting of an [`Analysis`].

use std::fmt::Write;

use serde::Serialize;

use crate::model::Analysis;

/// Serialisable summary of the analysis results.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Nodal displacements `u`.
    pub displacements: Vec<f64>,
    /// External forces `K u`, reactions included.
    pub external_forces: Vec<f64>,
    /// Support reactions as `(1-based dof, force)`.
    pub reactions: Vec<(usize, f64)>,
    /// Axial member forces, tension positive.
    pub internal_forces: Vec<f64>,
    /// Ascending eigenvalues of the constrained stiffness matrix.
    pub eigenvalues: Vec<f64>,
    /// Determinant of the constrained stiffness matrix.
    pub determinant: f64,
}

impl From<&Analysis> for AnalysisSummary {
    fn from(analysis: &Analysis) -> Self {
        Self {
            displacements: analysis.displacements.iter().copied().collect(),
            external_forces: analysis.external_forces.iter().copied().collect(),
            reactions: analysis.reactions(),
            internal_forces: analysis.internal_forces.clone(),
            eigenvalues: analysis.diagnostics.eigenvalues.iter().copied().collect(),
            determinant: analysis.diagnostics.determinant,
        }
    }
}

/// Render every stage of the analysis as human readable text.
///
/// Matrices print with four decimals, which is enough to check the example
/// truss against a hand calculation.
#[must_use]
pub fn render_report(analysis: &Analysis) -> String {
    let mut output = String::new();
    let sections: [(&str, String); 11] = [
        ("Master stiffness matrix (K)", format!("{:.4}", analysis.stiffness)),
        ("Nodal force vector (f)", format!("{:.4}", analysis.loads.transpose())),
        (
            "Modified stiffness matrix (Kmod)",
            format!("{:.4}", analysis.constrained_stiffness),
        ),
        (
            "Modified force vector (fmod)",
            format!("{:.4}", analysis.constrained_loads.transpose()),
        ),
        (
            "Eigenvalues of Kmod",
            format!("{:.4}", analysis.diagnostics.eigenvalues.transpose()),
        ),
        (
            "Eigenvectors of Kmod",
            format!("{:.4}", analysis.diagnostics.eigenvectors),
        ),
        (
            "Largest eigenpair residual |Kmod v - lambda v|",
            format!("{:.3e}", analysis.diagnostics.residual),
        ),
        (
            "Determinant of Kmod",
            format!("{:.4}", analysis.diagnostics.determinant),
        ),
        (
            "Displacements (u)",
            format!("{:.6}", analysis.displacements.transpose()),
        ),
        (
            "External forces incl. reactions (fe = K u)",
            format!("{:.4}", analysis.external_forces.transpose()),
        ),
        ("Internal forces (p)", render_member_forces(&analysis.internal_forces)),
    ];

    for (title, body) in sections {
        writeln!(&mut output, "{title}:").expect("writing to string cannot fail");
        writeln!(&mut output, "{}", body.trim_end()).expect("writing to string cannot fail");
        output.push('\n');
    }
    output
}

/// One line per member, numbered from 1 with a tension/compression tag.
fn render_member_forces(forces: &[f64]) -> String {
    let mut output = String::new();
    for (index, force) in forces.iter().enumerate() {
        let state = if *force > 0.0 {
            "tension"
        } else if *force < 0.0 {
            "compression"
        } else {
            "unloaded"
        };
        writeln!(&mut output, "  member {}: {force:+.4} ({state})", index + 1)
            .expect("writing to string cannot fail");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::example_truss;

    #[test]
    fn report_lists_every_stage_in_order() {
        let analysis = example_truss()
            .expect("example builds")
            .analyse()
            .expect("analysis succeeds");
        let report = render_report(&analysis);

        let titles = [
            "Master stiffness matrix (K):",
            "Modified stiffness matrix (Kmod):",
            "Eigenvalues of Kmod:",
            "Determinant of Kmod:",
            "Displacements (u):",
            "Internal forces (p):",
        ];
        let positions: Vec<usize> = titles
            .iter()
            .map(|title| report.find(title).expect("section present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(report.contains("member 2: -1.0000 (compression)"));
        assert!(report.contains("member 3: +2.8284 (tension)"));
    }

    #[test]
    fn member_force_states() {
        let text = render_member_forces(&[0.0, -1.0, 2.5]);
        assert!(text.contains("member 1: +0.0000 (unloaded)"));
        assert!(text.contains("member 2: -1.0000 (compression)"));
        assert!(text.contains("member 3: +2.5000 (tension)"));
    }

    #[test]
    fn summary_serialises_results() {
        let analysis = example_truss()
            .expect("example builds")
            .analyse()
            .expect("analysis succeeds");
        let summary = AnalysisSummary::from(&analysis);
        assert_eq!(summary.displacements.len(), 6);
        assert_eq!(summary.reactions.len(), 3);
        let json = serde_json::to_value(&summary).expect("serialisable");
        assert_eq!(json["internal_forces"].as_array().map(Vec::len), Some(3));
        assert!(json["determinant"].is_number());
    }
}
