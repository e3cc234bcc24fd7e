//! # Sample Graphs
//!
//! Demonstration graphs bundled with the pipeline. Graphs that load
//! assets (`multi`, `polygon`) reference the files under this crate's
//! `data/` directory by paths relative to the working directory.

use serde_json::json;

use crate::graph::GraphDescription;

/// Names accepted by [`sample_graph`].
pub const SAMPLE_GRAPH_NAMES: [&str; 4] = ["plane", "poissonDelaunay", "multi", "polygon"];

/// Returns the sample graph called `name`.
///
/// # Example
///
/// ```rust
/// use mesh_pipeline::samples::sample_graph;
///
/// let graph = sample_graph("plane").unwrap();
/// assert_eq!(graph.nodes.len(), 3);
/// assert!(sample_graph("teapot").is_none());
/// ```
pub fn sample_graph(name: &str) -> Option<GraphDescription> {
    let value = match name {
        "plane" => json!({
            "nodes": [
                { "id": "Plane", "type": "CreatePlaneBySize", "params": { "w": 1.0, "h": 1.0 } },
                { "id": "Xform", "type": "Mesh.Transform", "inputs": ["Plane"],
                  "params": { "translate": [0, 1, 0], "rotate": [0, 0, 0], "scale": [1, 1, 1] } },
                { "id": "View", "type": "View.DrawMesh", "inputs": ["Xform"], "params": {} }
            ],
            "params": { "render": { "wireframe": false } }
        }),
        "poissonDelaunay" => json!({
            "nodes": [
                { "id": "Plane", "type": "CreatePlaneBySize", "params": { "w": 1.0, "h": 1.0 } },
                { "id": "Tri", "type": "Meshing.PoissonDelaunay", "inputs": ["Plane"],
                  "params": { "radius": 0.08 } },
                { "id": "Xform", "type": "Mesh.Transform", "inputs": ["Tri"],
                  "params": { "translate": [0, 1, 0], "rotate": [0, 0, 0], "scale": [1, 1, 1] } },
                { "id": "View", "type": "View.DrawMesh", "inputs": ["Xform"], "params": {} }
            ],
            "params": { "render": { "wireframe": true } }
        }),
        "multi" => json!({
            "nodes": [
                { "id": "Plane", "type": "CreatePlaneBySize", "params": { "w": 1.0, "h": 1.0 } },
                { "id": "PlaneX", "type": "Mesh.Transform", "inputs": ["Plane"],
                  "params": { "translate": [-1, 0, 0] } },
                { "id": "PlaneView", "type": "View.DrawMesh", "inputs": ["PlaneX"] },

                { "id": "Tri", "type": "Meshing.PoissonDelaunay", "inputs": ["Plane"],
                  "params": { "radius": 0.08 } },
                { "id": "TriX", "type": "Mesh.Transform", "inputs": ["Tri"],
                  "params": { "translate": [1, 0, 0] } },
                { "id": "TriView", "type": "View.DrawMesh", "inputs": ["TriX"] },

                { "id": "Obj", "type": "LoadMeshOBJ",
                  "params": { "path": "data/models/pyramid.obj" } },
                { "id": "ObjX", "type": "Mesh.Transform", "inputs": ["Obj"],
                  "params": { "scale": [0.05, 0.05, 0.05] } },
                { "id": "ObjView", "type": "View.DrawMesh", "inputs": ["ObjX"] }
            ],
            "params": { "render": { "wireframe": false } }
        }),
        "polygon" => json!({
            "nodes": [
                { "id": "Poly", "type": "LoadPolygonSVG",
                  "params": { "path": "data/svg/sweater.svg", "scale": 0.1 } },
                { "id": "PolyTri", "type": "Meshing.Polygon.CDT", "inputs": ["Poly"],
                  "params": { "radius": 0.05 } },
                { "id": "PolyX", "type": "Mesh.Transform", "inputs": ["PolyTri"] },
                { "id": "PolyView", "type": "View.DrawMesh", "inputs": ["PolyX"] },
                { "id": "PolyLine", "type": "View.DrawLines", "inputs": ["Poly"],
                  "params": { "color": "#ffcc00" } }
            ],
            "params": { "render": { "wireframe": false } }
        }),
        _ => return None,
    };
    serde_json::from_value(value).ok()
}
