//! Reserved extension points for acceleration structures and the
//! projective-dynamics simulation stages.
//!
//! Graphs that mention these types load normally; evaluating one fails with
//! [`NodeError::NotImplemented`].

use std::sync::Arc;

use crate::error::NodeError;
use crate::node::{EvalContext, GraphNode};
use crate::params::Params;
use crate::value::Value;

/// Type names registered as [`ReservedNode`].
pub const RESERVED_NODE_TYPES: [&str; 12] = [
    "Accel.AABBGrid",
    "Accel.BVH",
    "Sim.PD.Predict",
    "Sim.PD.LocalProjections",
    "Sim.PD.GlobalSolve.ModalWarmStart",
    "Sim.PD.GlobalSolve.ModalReuse",
    "Sim.PD.GlobalSolve.AJacobi",
    "Sim.PD.ResidualForwarding",
    "Sim.Collide.BroadPhase",
    "Sim.Collide.PartialCCD",
    "Sim.Collide.FullCCD.LineSearch",
    "Sim.Barrier.NDB",
];

/// Placeholder node that refuses to evaluate.
#[derive(Debug, Clone)]
pub struct ReservedNode {
    node_type: &'static str,
}

impl ReservedNode {
    pub fn new(node_type: &'static str) -> Self {
        Self { node_type }
    }
}

impl GraphNode for ReservedNode {
    fn evaluate(
        &mut self,
        _ctx: &mut EvalContext<'_>,
        _inputs: &[Arc<Value>],
        _params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        Err(NodeError::NotImplemented(self.node_type.to_owned()))
    }
}
