//! # Graph Description
//!
//! The data shape of a pipeline graph and its dependency analysis.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "Plane", "type": "CreatePlaneBySize", "params": { "w": 1.0 } },
//!     { "id": "View", "type": "View.DrawMesh", "inputs": ["Plane"] }
//!   ],
//!   "params": { "render": { "wireframe": false } }
//! }
//! ```
//!
//! Missing `inputs` and `params` default to empty; unknown keys are ignored.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::params::Params;

/// One node declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeDef {
    /// Unique id within the graph.
    #[serde(default)]
    pub id: String,
    /// Registered node type name.
    #[serde(default, rename = "type")]
    pub node_type: String,
    /// Ids of upstream nodes, in the order the node receives them.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Node-specific options.
    #[serde(default)]
    pub params: Params,
}

impl NodeDef {
    /// Creates a node with no inputs and no params.
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            ..Self::default()
        }
    }

    /// Sets the declared inputs.
    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the params from a JSON object.
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = Params::from_json(params);
        self
    }
}

/// A whole graph: node declarations plus global parameters forwarded to
/// every node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub params: Params,
}

impl GraphDescription {
    /// Creates a graph from node declarations with no global params.
    pub fn new(nodes: Vec<NodeDef>) -> Self {
        Self {
            nodes,
            params: Params::default(),
        }
    }

    /// Parses a graph description from JSON text.
    pub fn from_json(text: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Maps every id to its declaration index.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingNodeId`] for an empty id and
    /// [`GraphError::DuplicateNodeId`] for a repeated one.
    pub fn index_by_id(&self) -> GraphResult<HashMap<&str, usize>> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if node.id.is_empty() {
                return Err(GraphError::MissingNodeId { index: i });
            }
            if index.insert(node.id.as_str(), i).is_some() {
                return Err(GraphError::DuplicateNodeId(node.id.clone()));
            }
        }
        Ok(index)
    }

    /// Computes an evaluation order with Kahn's algorithm.
    ///
    /// Returns declaration indices such that every node comes after all of
    /// its inputs. Nodes that become ready at the same time keep the order
    /// in which they entered the ready queue: roots in declaration order,
    /// then dependents in the order they were released.
    ///
    /// # Errors
    ///
    /// - [`GraphError::MissingNodeId`] / [`GraphError::DuplicateNodeId`]
    /// - [`GraphError::DanglingInputReference`] for an input naming no node
    /// - [`GraphError::CyclicGraph`] when some nodes never become ready
    pub fn topological_order(&self) -> GraphResult<Vec<usize>> {
        let index = self.index_by_id()?;
        let n = self.nodes.len();
        let mut in_degree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (i, node) in self.nodes.iter().enumerate() {
            for input in &node.inputs {
                let Some(&j) = index.get(input.as_str()) else {
                    return Err(GraphError::DanglingInputReference {
                        node: node.id.clone(),
                        input: input.clone(),
                    });
                };
                in_degree[i] += 1;
                dependents[j].push(i);
            }
        }

        let mut ready: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(i) = ready.pop_front() {
            order.push(i);
            for &d in &dependents[i] {
                in_degree[d] -= 1;
                if in_degree[d] == 0 {
                    ready.push_back(d);
                }
            }
        }

        if order.len() != n {
            let nodes = (0..n)
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.nodes[i].id.clone())
                .collect();
            return Err(GraphError::CyclicGraph { nodes });
        }
        Ok(order)
    }
}
