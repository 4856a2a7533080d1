//! JSON model definitions.
//!
//! A definition uses the numbering of hand calculations: joints and degrees
//! of freedom count from 1.
//!
//! ```json
//! {
//!   "nodes": [[0, 0], [10, 0], [10, 10]],
//!   "elements": [
//!     { "nodes": [1, 2], "elastic_modulus": 100, "area": 1 },
//!     { "nodes": [2, 3], "elastic_modulus": 100, "area": 0.5, "eft": [3, 4, 5, 6] }
//!   ],
//!   "loads": [0, 0, 0, 0, 2, 1],
//!   "prescribed_dofs": [1, 2, 4]
//! }
//! ```

use std::path::Path;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::dof::DOFS_PER_JOINT;
use crate::errors::{AnalysisError, ConfigError};
use crate::geometry::{force, point};
use crate::model::TrussModel;

/// One bar of a model definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// Joints `i` and `j`, 1-based.
    pub nodes: [usize; 2],
    /// Young's modulus.
    pub elastic_modulus: f64,
    /// Cross-sectional area.
    pub area: f64,
    /// Explicit 1-based freedom table; derived from `nodes` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eft: Option<[usize; 4]>,
}

/// A complete truss as read from a definition file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Joint coordinates as `[x, y]`.
    pub nodes: Vec<[f64; 2]>,
    /// Bars connecting the joints.
    pub elements: Vec<ElementDefinition>,
    /// Applied load per degree of freedom; omitted means unloaded.
    #[serde(default)]
    pub loads: Vec<f64>,
    /// Fixed degrees of freedom, 1-based.
    #[serde(default)]
    pub prescribed_dofs: Vec<usize>,
}

impl ModelDefinition {
    /// Read and parse a definition file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not a valid definition.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not a valid definition.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the definition and build the model it describes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Model`] wrapping [`AnalysisError::UnknownJoint`]
    /// for a node id outside the node list,
    /// [`AnalysisError::DimensionMismatch`] when `loads` is neither empty nor
    /// one entry per degree of freedom, or any error raised while adding
    /// members or supports.
    ///
    /// # Examples
    /// ```
    /// use trussdsm::ModelDefinition;
    ///
    /// let definition = ModelDefinition::from_json(
    ///     r#"{
    ///         "nodes": [[0, 0], [4, 0]],
    ///         "elements": [{ "nodes": [1, 2], "elastic_modulus": 10, "area": 2 }],
    ///         "loads": [0, 0, 5, 0],
    ///         "prescribed_dofs": [1, 2, 4]
    ///     }"#,
    /// )
    /// .unwrap();
    /// let analysis = definition.build().unwrap().analyse().unwrap();
    /// assert_eq!(analysis.displacements[2], 1.0);
    /// ```
    pub fn build(&self) -> Result<TrussModel, ConfigError> {
        let mut model = TrussModel::new();
        let joints: Vec<NodeIndex> = self
            .nodes
            .iter()
            .map(|&[x, y]| model.add_joint(point(x, y)))
            .collect();
        let joint = |id: usize| {
            id.checked_sub(1)
                .and_then(|index| joints.get(index).copied())
                .ok_or_else(|| {
                    AnalysisError::UnknownJoint(
                        id.checked_sub(1).map_or_else(NodeIndex::end, NodeIndex::new),
                    )
                })
        };

        for element in &self.elements {
            let [i, j] = element.nodes;
            let (start, end) = (joint(i)?, joint(j)?);
            match element.eft {
                Some(eft) => model.add_member_with_eft(
                    start,
                    end,
                    element.elastic_modulus,
                    element.area,
                    eft,
                )?,
                None => model.add_member(start, end, element.elastic_modulus, element.area)?,
            };
        }

        if !self.loads.is_empty() {
            if self.loads.len() != model.dof_count() {
                return Err(AnalysisError::DimensionMismatch {
                    expected: model.dof_count(),
                    found: self.loads.len(),
                }
                .into());
            }
            for (&node, pair) in joints.iter().zip(self.loads.chunks_exact(DOFS_PER_JOINT)) {
                model.set_load(node, force(pair[0], pair[1]))?;
            }
        }

        model.set_prescribed_dofs(&self.prescribed_dofs)?;
        Ok(model)
    }
}
