//! # Pipeline Errors
//!
//! Two layers of failure: [`NodeError`] is raised by a single node while it
//! evaluates, [`GraphError`] is what the scheduler reports to its caller.
//! A node failure is wrapped in [`GraphError::Node`] together with the id
//! and type of the node that produced it.

use mesh_kernel::KernelError;
use thiserror::Error;

/// Errors raised by a node during `init` or `evaluate`.
#[derive(Debug, Error)]
pub enum NodeError {
    /// A required upstream value is absent.
    #[error("Missing input")]
    MissingInput,

    /// An upstream value is present but has the wrong variant.
    #[error("Invalid input type: expected {expected}, found {found}")]
    InvalidInputType {
        expected: &'static str,
        found: &'static str,
    },

    /// A parameter failed to parse or is out of its domain.
    #[error("Malformed parameter '{name}': {reason}")]
    MalformedParameter { name: String, reason: String },

    /// The node type is a reserved extension point without behavior.
    #[error("Node type '{0}' is not implemented")]
    NotImplemented(String),

    /// Reading a source asset failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An OBJ asset could not be decoded.
    #[error("Failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    /// A source asset could not be decoded.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A geometry kernel rejected its input.
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

impl NodeError {
    /// Shorthand for [`NodeError::MalformedParameter`].
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors reported by the scheduler.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A node definition has an empty id.
    #[error("Node at position {index} has no id")]
    MissingNodeId { index: usize },

    /// No factory is registered for the node's type.
    #[error("Unknown node type '{node_type}' for node '{id}'")]
    UnknownNodeType { id: String, node_type: String },

    /// Two node definitions share an id.
    #[error("Duplicate node id '{0}'")]
    DuplicateNodeId(String),

    /// A declared input names a node that does not exist.
    #[error("Node '{node}' references unknown input '{input}'")]
    DanglingInputReference { node: String, input: String },

    /// The declared inputs contain a cycle.
    #[error("Graph contains a cycle through: {}", .nodes.join(", "))]
    CyclicGraph {
        /// Nodes that never reached zero in-degree.
        nodes: Vec<String>,
    },

    /// `evaluate_all` was called before a graph was loaded.
    #[error("No graph loaded")]
    GraphNotLoaded,

    /// The graph description could not be decoded.
    #[error("Invalid graph description: {0}")]
    InvalidDescription(#[from] serde_json::Error),

    /// A node failed during init or evaluate.
    #[error("Node '{id}' ({node_type}) failed: {source}")]
    Node {
        id: String,
        node_type: String,
        #[source]
        source: NodeError,
    },
}

/// Result type alias for scheduler operations.
pub type GraphResult<T> = Result<T, GraphError>;

// =============================================================================
// TESTS
// =============================================================================
