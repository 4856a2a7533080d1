use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use trussdsm::{deformation_frames, example_truss, render_report, AnalysisSummary, ModelDefinition};

/// Static analysis of a planar bar truss by the direct stiffness method.
#[derive(Debug, Parser)]
#[command(name = "trussdsm", version, about)]
struct Cli {
    /// JSON model definition; the built-in three-bar example when omitted.
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Number of deformation frames to generate.
    #[arg(long, default_value_t = 6)]
    frames: usize,

    /// Displacement magnification used for the frames.
    #[arg(long, default_value_t = 5.0)]
    scale: f64,

    /// Write the deformation frames as JSON to this file.
    #[arg(long)]
    plot_out: Option<PathBuf>,

    /// Print a JSON summary instead of the text report.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Build the model, either from a definition file or the fixed example.
    // Joints are pins and every member is a two-force bar, so each joint
    // carries two displacement degrees of freedom.
    // See: https://en.wikipedia.org/wiki/Truss
    let model = match &cli.model {
        Some(path) => {
            eprintln!("info: reading model from {}", path.display());
            ModelDefinition::from_path(path)?.build()?
        }
        None => example_truss()?,
    };
    eprintln!(
        "info: {} joints, {} members, {} degrees of freedom",
        model.joint_count(),
        model.member_count(),
        model.dof_count()
    );

    // Assemble the global stiffness matrix, clear the supported rows and
    // columns, and solve for the joint displacements. Member forces follow
    // from Hooke's law along each bar axis.
    // See: https://en.wikipedia.org/wiki/Direct_stiffness_method
    let analysis = model.analyse()?;

    // Print every stage of the calculation, or a machine-readable summary.
    if cli.json {
        let summary = AnalysisSummary::from(&analysis);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_report(&analysis));
    }

    // Interpolate the displaced shape for an external plotter. Displacements
    // are magnified by `--scale` so small deflections remain visible.
    if let Some(path) = &cli.plot_out {
        let frames = deformation_frames(&model, &analysis.displacements, cli.frames, cli.scale)?;
        std::fs::write(path, serde_json::to_string_pretty(&frames)?)?;
        eprintln!("info: wrote {} frames to {}", frames.len(), path.display());
    }

    Ok(())
}
