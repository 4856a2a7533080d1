//! Planar truss model and the direct stiffness pipeline.

use nalgebra::{DMatrix, DVector, Matrix4};
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};

use crate::assembly::assemble;
use crate::boundary::{apply_to_forces, apply_to_stiffness};
use crate::dof::{ElementFreedomTable, PrescribedDofs, DOFS_PER_JOINT};
use crate::element::Bar2D;
use crate::errors::AnalysisError;
use crate::geometry::{Force, Point};
use crate::solver::{external_forces, solve, Diagnostics};

/// Internal representation of a truss joint.
#[derive(Clone, Debug)]
struct Joint {
    /// Position of the joint.
    position: Point,
    /// External load applied to the joint.
    load: Force,
}

/// Internal representation of a truss member.
#[derive(Clone, Debug)]
struct Member {
    /// Validated bar geometry and section.
    bar: Bar2D,
    /// Global degrees of freedom of the bar's end points.
    eft: ElementFreedomTable,
}

/// Container for a pin-jointed planar truss.
///
/// Joints own two degrees of freedom each, so a model with `n` joints is a
/// system of `2n` equations. Members are stored in insertion order, which is
/// also the order of [`TrussModel::internal_forces`].
#[derive(Clone, Debug, Default)]
pub struct TrussModel {
    /// Underlying graph storage for joints and members.
    graph: Graph<Joint, Member>,
    /// Fixed degrees of freedom, 0-based.
    prescribed: PrescribedDofs,
}

impl TrussModel {
    /// Create an empty model.
    ///
    /// # Examples
    /// ```
    /// use trussdsm::TrussModel;
    ///
    /// let model = TrussModel::new();
    /// assert_eq!(model.dof_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of joints.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return the number of global degrees of freedom.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        self.joint_count() * DOFS_PER_JOINT
    }

    /// Add an unloaded joint.
    pub fn add_joint(&mut self, position: Point) -> NodeIndex {
        self.graph.add_node(Joint {
            position,
            load: Force::default(),
        })
    }

    /// Position of a joint.
    #[must_use]
    pub fn joint_position(&self, joint: NodeIndex) -> Option<Point> {
        self.graph.node_weight(joint).map(|joint| joint.position)
    }

    /// Connect two joints with a bar using the conventional freedom table.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownJoint`] for a missing joint and
    /// [`AnalysisError::InvalidMember`] when the bar cannot be formed.
    ///
    /// # Examples
    /// ```
    /// use trussdsm::{point, AnalysisError, ElementError, TrussModel};
    ///
    /// let mut model = TrussModel::new();
    /// let a = model.add_joint(point(0.0, 0.0));
    /// let b = model.add_joint(point(0.0, 0.0));
    /// let error = model.add_member(a, b, 100.0, 1.0).unwrap_err();
    /// assert!(matches!(
    ///     error,
    ///     AnalysisError::InvalidMember {
    ///         source: ElementError::DegenerateGeometry { .. },
    ///         ..
    ///     }
    /// ));
    /// ```
    pub fn add_member(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
        elastic_modulus: f64,
        area: f64,
    ) -> Result<EdgeIndex, AnalysisError> {
        let eft = ElementFreedomTable::for_joints(start.index(), end.index());
        self.insert_member(start, end, elastic_modulus, area, eft)
    }

    /// Connect two joints with a bar whose freedom table is given explicitly.
    ///
    /// `eft` is 1-based and must address the model's current degrees of
    /// freedom.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Dof`] for an invalid table, plus the errors of
    /// [`TrussModel::add_member`].
    pub fn add_member_with_eft(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
        elastic_modulus: f64,
        area: f64,
        eft: [usize; 4],
    ) -> Result<EdgeIndex, AnalysisError> {
        let eft = ElementFreedomTable::from_one_based(eft, self.dof_count())?;
        self.insert_member(start, end, elastic_modulus, area, eft)
    }

    /// Validate and store a member.
    fn insert_member(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
        elastic_modulus: f64,
        area: f64,
        eft: ElementFreedomTable,
    ) -> Result<EdgeIndex, AnalysisError> {
        let start_position = self
            .joint_position(start)
            .ok_or(AnalysisError::UnknownJoint(start))?;
        let end_position = self
            .joint_position(end)
            .ok_or(AnalysisError::UnknownJoint(end))?;
        let bar = Bar2D::new(start_position, end_position, elastic_modulus, area).map_err(
            |source| AnalysisError::InvalidMember {
                member: EdgeIndex::new(self.graph.edge_count()),
                source,
            },
        )?;
        Ok(self.graph.add_edge(start, end, Member { bar, eft }))
    }

    /// Freedom table of a member in 1-based numbering.
    #[must_use]
    pub fn member_eft(&self, member: EdgeIndex) -> Option<[usize; 4]> {
        self.graph
            .edge_weight(member)
            .map(|member| member.eft.one_based())
    }

    /// Apply a point load to a joint, replacing any previous load.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownJoint`] when `joint` is not part of this
    /// model.
    pub fn set_load(&mut self, joint: NodeIndex, load: Force) -> Result<(), AnalysisError> {
        let node = self
            .graph
            .node_weight_mut(joint)
            .ok_or(AnalysisError::UnknownJoint(joint))?;
        node.load = load;
        Ok(())
    }

    /// Fix the listed degrees of freedom, given in 1-based numbering.
    ///
    /// Replaces any previous list.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Dof`] when an entry is out of range or repeated.
    pub fn set_prescribed_dofs(&mut self, dofs: &[usize]) -> Result<(), AnalysisError> {
        self.prescribed = PrescribedDofs::from_one_based(dofs, self.dof_count())?;
        Ok(())
    }

    /// Currently fixed degrees of freedom.
    #[must_use]
    pub fn prescribed_dofs(&self) -> &PrescribedDofs {
        &self.prescribed
    }

    /// Global nodal load vector.
    #[must_use]
    pub fn load_vector(&self) -> DVector<f64> {
        let mut loads = DVector::zeros(self.dof_count());
        for node in self.graph.node_indices() {
            let base = node.index() * DOFS_PER_JOINT;
            let load = self.graph[node].load;
            loads[base] = load.x;
            loads[base + 1] = load.y;
        }
        loads
    }

    /// Member stiffness matrices paired with their freedom tables.
    fn element_matrices(&self) -> Vec<(Matrix4<f64>, ElementFreedomTable)> {
        self.graph
            .edge_weights()
            .map(|member| (member.bar.stiffness(), member.eft))
            .collect()
    }

    /// Assemble the global stiffness matrix from every member.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Dof`] if a member's freedom table no longer
    /// fits the model.
    pub fn assemble_global_stiffness(&self) -> Result<DMatrix<f64>, AnalysisError> {
        let matrices = self.element_matrices();
        assemble(
            self.dof_count(),
            matrices.iter().map(|(element, eft)| (element, eft)),
        )
    }

    /// Axial force in every member, in insertion order, tension positive.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DimensionMismatch`] when `displacements` does
    /// not have one entry per degree of freedom.
    pub fn internal_forces(&self, displacements: &DVector<f64>) -> Result<Vec<f64>, AnalysisError> {
        self.check_dof_vector(displacements)?;
        self.graph
            .edge_weights()
            .map(|member| {
                member
                    .bar
                    .axial_force(&member.eft, displacements)
                    .map_err(AnalysisError::from)
            })
            .collect()
    }

    /// Resolve member axial forces back into a global nodal force vector.
    ///
    /// For forces recovered from a displacement field `u` the result equals
    /// `K u`: the members balance the applied loads and reactions joint by
    /// joint.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DimensionMismatch`] when `forces` does not have
    /// one entry per member.
    pub fn member_nodal_forces(&self, forces: &[f64]) -> Result<DVector<f64>, AnalysisError> {
        if forces.len() != self.member_count() {
            return Err(AnalysisError::DimensionMismatch {
                expected: self.member_count(),
                found: forces.len(),
            });
        }
        let mut nodal = DVector::zeros(self.dof_count());
        for (member, &force) in self.graph.edge_weights().zip(forces) {
            let end_forces = member.bar.end_forces(force);
            for (slot, &index) in member.eft.indices().iter().enumerate() {
                nodal[index] += end_forces[slot];
            }
        }
        Ok(nodal)
    }

    /// Every member's bar and freedom table, in insertion order.
    pub fn members(&self) -> impl Iterator<Item = (&Bar2D, &ElementFreedomTable)> + '_ {
        self.graph
            .edge_weights()
            .map(|member| (&member.bar, &member.eft))
    }

    /// Run the full linear static analysis.
    ///
    /// The model is not modified; every stage of the pipeline is kept in the
    /// returned [`Analysis`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyModel`] when there are no joints,
    /// [`AnalysisError::SingularSystem`] when the supports leave a mechanism,
    /// and propagates any validation error.
    ///
    /// # Examples
    /// ```
    /// use trussdsm::{force, point, TrussModel};
    ///
    /// let mut model = TrussModel::new();
    /// let a = model.add_joint(point(0.0, 0.0));
    /// let b = model.add_joint(point(2.0, 0.0));
    /// model.add_member(a, b, 100.0, 1.0).unwrap();
    /// model.set_load(b, force(50.0, 0.0)).unwrap();
    /// model.set_prescribed_dofs(&[1, 2, 4]).unwrap();
    ///
    /// let analysis = model.analyse().unwrap();
    /// assert_eq!(analysis.displacements[2], 1.0);
    /// assert_eq!(analysis.internal_forces, vec![50.0]);
    /// ```
    pub fn analyse(&self) -> Result<Analysis, AnalysisError> {
        if self.dof_count() == 0 {
            return Err(AnalysisError::EmptyModel);
        }
        let stiffness = self.assemble_global_stiffness()?;
        let loads = self.load_vector();
        let constrained_stiffness = apply_to_stiffness(&self.prescribed, &stiffness)?;
        let constrained_loads = apply_to_forces(&self.prescribed, &loads)?;
        let diagnostics = Diagnostics::of(&constrained_stiffness)?;
        let displacements = solve(&constrained_stiffness, &constrained_loads)?;
        let external_forces = external_forces(&stiffness, &displacements)?;
        let internal_forces = self.internal_forces(&displacements)?;

        Ok(Analysis {
            prescribed: self.prescribed.clone(),
            stiffness,
            loads,
            constrained_stiffness,
            constrained_loads,
            diagnostics,
            displacements,
            external_forces,
            internal_forces,
        })
    }

    /// Require a vector with one entry per degree of freedom.
    fn check_dof_vector(&self, vector: &DVector<f64>) -> Result<(), AnalysisError> {
        if vector.len() == self.dof_count() {
            Ok(())
        } else {
            Err(AnalysisError::DimensionMismatch {
                expected: self.dof_count(),
                found: vector.len(),
            })
        }
    }
}

/// Every intermediate and final quantity of one static analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    /// Fixed degrees of freedom used for the constrained system.
    pub prescribed: PrescribedDofs,
    /// Assembled global stiffness matrix `K`.
    pub stiffness: DMatrix<f64>,
    /// Applied nodal loads `f`.
    pub loads: DVector<f64>,
    /// `K` with prescribed rows and columns cleared.
    pub constrained_stiffness: DMatrix<f64>,
    /// `f` with prescribed entries cleared.
    pub constrained_loads: DVector<f64>,
    /// Determinant and spectrum of the constrained matrix.
    pub diagnostics: Diagnostics,
    /// Solved nodal displacements `u`.
    pub displacements: DVector<f64>,
    /// External forces `K u`, reactions included.
    pub external_forces: DVector<f64>,
    /// Axial force in each member, tension positive.
    pub internal_forces: Vec<f64>,
}

impl Analysis {
    /// Support reactions as `(1-based dof, force)` pairs.
    #[must_use]
    pub fn reactions(&self) -> Vec<(usize, f64)> {
        self.prescribed
            .indices()
            .iter()
            .map(|&index| (index + 1, self.external_forces[index]))
            .collect()
    }
}
