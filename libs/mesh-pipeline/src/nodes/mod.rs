//! # Built-in Nodes
//!
//! | Type | Input | Output |
//! |------|-------|--------|
//! | `CreatePlaneBySize` | none | `Surface` |
//! | `LoadMeshOBJ` | none | `MeshTri` |
//! | `LoadPolygonSVG` | none | `Polygon2D` |
//! | `Meshing.PoissonDelaunay` | `Surface` | `MeshTri` |
//! | `Meshing.TriangulatePolygon` | `Polygon2D` | `MeshTri` |
//! | `Meshing.Polygon.PoissonDelaunay` | `Polygon2D` | `MeshTri` |
//! | `Meshing.Polygon.CDT` | `Polygon2D` | `MeshTri` |
//! | `Mesh.Transform` | `Surface` / `MeshTri` | `MeshTri` |
//! | `View.DrawMesh` | `Surface` / `MeshTri` | `Empty` |
//! | `View.DrawLines` | `Polygon2D` | `Empty` |
//!
//! Reserved acceleration and simulation types are registered too, see
//! [`reserved::RESERVED_NODE_TYPES`].

pub mod meshing;
pub mod reserved;
pub mod source;
pub mod transform;
pub mod view;

use crate::runtime::Runtime;

pub use meshing::{
    PlanePoissonDelaunay, PolygonCdt, PolygonPoissonDelaunay, TriangulatePolygon,
};
pub use reserved::{ReservedNode, RESERVED_NODE_TYPES};
pub use source::{CreatePlaneBySize, LoadMeshObj, LoadPolygonSvg};
pub use transform::MeshTransform;
pub use view::{DrawLines, DrawMesh};

/// Registers every built-in node type on `runtime`.
pub fn register_builtin_nodes(runtime: &mut Runtime) {
    runtime.register("CreatePlaneBySize", |_| Box::new(CreatePlaneBySize));
    runtime.register("LoadMeshOBJ", |_| Box::new(LoadMeshObj));
    runtime.register("LoadPolygonSVG", |_| Box::new(LoadPolygonSvg));

    runtime.register("Meshing.PoissonDelaunay", |_| Box::new(PlanePoissonDelaunay));
    runtime.register("Meshing.TriangulatePolygon", |_| Box::new(TriangulatePolygon));
    runtime.register("Meshing.Polygon.PoissonDelaunay", |_| {
        Box::new(PolygonPoissonDelaunay)
    });
    runtime.register("Meshing.Polygon.CDT", |_| Box::new(PolygonCdt));

    runtime.register("Mesh.Transform", |_| Box::new(MeshTransform));
    runtime.register("View.DrawMesh", |_| Box::new(DrawMesh));
    runtime.register("View.DrawLines", |_| Box::new(DrawLines));

    for node_type in RESERVED_NODE_TYPES {
        runtime.register(node_type, move |_| Box::new(ReservedNode::new(node_type)));
    }
}
