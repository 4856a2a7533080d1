//! Error types produced while building or analysing a truss model.

use std::path::PathBuf;

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

/// Error returned when a single bar element cannot be formed.
///
/// These are detected eagerly, before any stiffness term is computed, so a bad
/// element never leaks `NaN` or infinite values into the global matrix.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ElementError {
    /// Returned when the two end points of a bar coincide or are not finite.
    #[error("element length must be finite and non-zero (found {length:e})")]
    DegenerateGeometry {
        /// Computed distance between the end points.
        length: f64,
    },
    /// Returned when the cross-sectional area is not a positive finite number.
    #[error("area must be positive and finite (received {area})")]
    NonPositiveArea {
        /// Rejected cross-sectional area.
        area: f64,
    },
    /// Returned when the elastic modulus is not a positive finite number.
    #[error("elastic modulus must be positive and finite (received {elastic_modulus})")]
    NonPositiveElasticModulus {
        /// Rejected elastic modulus.
        elastic_modulus: f64,
    },
}

/// Error returned when a degree-of-freedom index is not usable.
///
/// Indices carried by this error are always 1-based so they match the numbers
/// the caller supplied.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DofError {
    /// Returned when an index falls outside `1..=ndof`.
    #[error("degree of freedom {index} is outside 1..={ndof}")]
    OutOfRange {
        /// Offending 1-based index.
        index: usize,
        /// Number of degrees of freedom in the system.
        ndof: usize,
    },
    /// Returned when the same index appears twice in one table.
    #[error("degree of freedom {index} appears more than once")]
    Duplicate {
        /// Repeated 1-based index.
        index: usize,
    },
}

/// Error returned when a truss analysis fails.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when a joint cannot be found in the model.
    #[error("joint {0:?} does not exist in this model")]
    UnknownJoint(NodeIndex),
    /// Returned when a member of the model cannot be formed.
    #[error("member {member:?} is invalid: {source}")]
    InvalidMember {
        /// Identifier of the offending member.
        member: EdgeIndex,
        /// Reason the member was rejected.
        #[source]
        source: ElementError,
    },
    /// Returned when an element cannot be formed outside a model.
    #[error(transparent)]
    Element(#[from] ElementError),
    /// Returned when an element freedom table or prescribed list is invalid.
    #[error(transparent)]
    Dof(#[from] DofError),
    /// Returned when a matrix or vector does not match the system size.
    #[error("expected {expected} degrees of freedom, found {found}")]
    DimensionMismatch {
        /// Size required by the system.
        expected: usize,
        /// Size that was supplied.
        found: usize,
    },
    /// Returned when a model without joints is analysed.
    #[error("model has no joints to analyse")]
    EmptyModel,
    /// Returned when the constrained stiffness matrix cannot be inverted.
    #[error("stiffness matrix is singular; check supports and connectivity")]
    SingularSystem,
}

/// Error returned when a model definition cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the definition file cannot be read.
    #[error("cannot read {path:?}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the definition is not valid JSON for a model.
    #[error("malformed model definition: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when the definition parses but describes an invalid model.
    #[error("invalid model definition: {0}")]
    Model(#[from] AnalysisError),
}
