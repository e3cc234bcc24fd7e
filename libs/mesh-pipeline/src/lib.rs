//! # Mesh Pipeline
//!
//! A dataflow graph runtime for procedural mesh generation. Nodes consume
//! and produce typed geometry ([`Value`]); the [`Runtime`] evaluates them
//! in dependency order and keeps every node's latest output in a
//! [`ResourceRegistry`].
//!
//! ## Architecture
//!
//! ```text
//! JSON → GraphDescription → Runtime::load_graph → Runtime::evaluate_all
//!                                  │                      │
//!                          factories + init       nodes → registry → viewer
//! ```
//!
//! Geometry work is delegated to [`mesh_kernel`]. Drawing nodes talk to an
//! optional [`Viewer`].
//!
//! ## Usage
//!
//! ```rust
//! use mesh_pipeline::{samples::sample_graph, Runtime};
//!
//! let mut runtime = Runtime::with_builtin_nodes();
//! runtime.load_graph(sample_graph("poissonDelaunay").unwrap()).unwrap();
//! runtime.evaluate_all().unwrap();
//!
//! let mesh = runtime.output("Xform").unwrap();
//! assert!(mesh.as_mesh().unwrap().triangle_count() > 0);
//! ```

pub mod error;
pub mod formats;
pub mod graph;
pub mod node;
pub mod nodes;
pub mod params;
pub mod registry;
pub mod runtime;
pub mod samples;
pub mod value;
pub mod viewer;

pub use error::{GraphError, GraphResult, NodeError};
pub use graph::{GraphDescription, NodeDef};
pub use node::{EvalContext, GraphNode, NodeFactory};
pub use nodes::register_builtin_nodes;
pub use params::Params;
pub use registry::ResourceRegistry;
pub use runtime::Runtime;
pub use value::Value;
pub use viewer::{LineStyle, MeshStyle, Viewer};
