//! # Node Contract
//!
//! Every node type implements [`GraphNode`]. The runtime creates instances
//! through a [`NodeFactory`] registered under the type name, calls
//! [`GraphNode::init`] once after loading and [`GraphNode::evaluate`] on
//! every run.

use std::sync::Arc;

use config::constants::GlobalConfig;
use glam::DVec3;
use mesh_kernel::MeshTri;

use crate::error::NodeError;
use crate::graph::NodeDef;
use crate::params::Params;
use crate::value::Value;
use crate::viewer::{LineStyle, MeshStyle, Viewer};

static EMPTY: Value = Value::Empty;

/// Constructor for a node type.
pub type NodeFactory = Box<dyn Fn(&NodeDef) -> Box<dyn GraphNode>>;

/// What a node sees of the runtime while it runs.
pub struct EvalContext<'a> {
    node_id: &'a str,
    config: &'a GlobalConfig,
    viewer: Option<&'a mut (dyn Viewer + 'static)>,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        node_id: &'a str,
        config: &'a GlobalConfig,
        viewer: Option<&'a mut (dyn Viewer + 'static)>,
    ) -> Self {
        Self {
            node_id,
            config,
            viewer,
        }
    }

    /// Id of the node being run.
    pub fn node_id(&self) -> &str {
        self.node_id
    }

    /// Runtime configuration.
    pub fn config(&self) -> &GlobalConfig {
        self.config
    }

    /// Returns true when a viewer is installed.
    pub fn has_viewer(&self) -> bool {
        self.viewer.is_some()
    }

    /// Sends a mesh to the viewer under this node's id. No-op without one.
    pub fn draw_mesh(&mut self, mesh: &MeshTri, style: &MeshStyle) {
        if let Some(viewer) = self.viewer.as_deref_mut() {
            viewer.update_mesh(self.node_id, mesh, style);
        }
    }

    /// Sends a polyline to the viewer under this node's id. No-op without
    /// one.
    pub fn draw_lines(&mut self, points: &[DVec3], style: &LineStyle) {
        if let Some(viewer) = self.viewer.as_deref_mut() {
            viewer.update_lines(self.node_id, points, style);
        }
    }
}

/// A pipeline stage.
///
/// Both methods have defaults: `init` does nothing and `evaluate` produces
/// [`Value::Empty`].
pub trait GraphNode {
    /// One-shot setup, called once per load before any node evaluates.
    fn init(&mut self, _ctx: &mut EvalContext<'_>) -> Result<(), NodeError> {
        Ok(())
    }

    /// Computes the node output.
    ///
    /// `inputs` holds the current outputs of the declared inputs, in
    /// declaration order; an upstream node that produced nothing shows up
    /// as [`Value::Empty`]. `globals` are the graph-wide params.
    fn evaluate(
        &mut self,
        _ctx: &mut EvalContext<'_>,
        _inputs: &[Arc<Value>],
        _params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        Ok(Value::Empty)
    }
}

/// First input, or [`Value::Empty`] when the node declared none.
pub fn first_input(inputs: &[Arc<Value>]) -> &Value {
    inputs.first().map(Arc::as_ref).unwrap_or(&EMPTY)
}
