#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod assembly;
pub mod boundary;
pub mod config;
pub mod dof;
pub mod element;
pub mod errors;
pub mod example;
pub mod geometry;
pub mod model;
pub mod plot;
pub mod report;
pub mod solver;

pub use assembly::{assemble, merge_into_global};
pub use boundary::{apply_to_forces, apply_to_stiffness};
pub use config::{ElementDefinition, ModelDefinition};
pub use dof::{ElementFreedomTable, PrescribedDofs, DOFS_PER_JOINT};
pub use element::{form_element_stiffness, recover_element_force, Bar2D};
pub use errors::{AnalysisError, ConfigError, DofError, ElementError};
pub use example::example_truss;
pub use geometry::{force, point, Force, Orientation, Point, LENGTH_TOLERANCE};
pub use model::{Analysis, TrussModel};
pub use plot::{deformation_frames, Frame, Stage};
pub use report::{render_report, AnalysisSummary};
pub use solver::{external_forces, solve, Diagnostics};
