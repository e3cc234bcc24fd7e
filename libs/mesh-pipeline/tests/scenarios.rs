use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use std::sync::Arc;

use approx::assert_relative_eq;
use config::constants::{GlobalConfig, CDT_FLIP_GUARD, POISSON_SEED_ATTEMPTS};
use glam::{DVec2, DVec3};
use mesh_kernel::{Aabb, MeshTri, Polygon2D};
use mesh_pipeline::{
    EvalContext, GraphDescription, GraphNode, LineStyle, MeshStyle, NodeDef, NodeError, Params,
    Runtime, Value, Viewer,
};
use serde_json::json;

/// Emits the polygon given in its `points` param.
struct PolygonSource;

impl GraphNode for PolygonSource {
    fn evaluate(
        &mut self,
        _ctx: &mut EvalContext<'_>,
        _inputs: &[Arc<Value>],
        params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        let points = params
            .get("points")
            .and_then(|v| serde_json::from_value::<Vec<[f64; 2]>>(v.clone()).ok())
            .ok_or_else(|| NodeError::malformed("points", "expected [[x, z], ...]"))?;
        Ok(Value::Polygon2D(Polygon2D::new(
            points.into_iter().map(DVec2::from).collect(),
        )))
    }
}

#[derive(Default)]
struct Scene {
    clears: usize,
    meshes: Vec<(String, usize)>,
    lines: Vec<(String, usize, String)>,
}

/// Viewer writing into a scene the test keeps a handle to.
struct SharedViewer(Rc<RefCell<Scene>>);

impl Viewer for SharedViewer {
    fn clear_all(&mut self) {
        let mut scene = self.0.borrow_mut();
        scene.clears += 1;
        scene.meshes.clear();
        scene.lines.clear();
    }

    fn update_mesh(&mut self, id: &str, mesh: &MeshTri, _style: &MeshStyle) {
        self.0
            .borrow_mut()
            .meshes
            .push((id.to_owned(), mesh.triangle_count()));
    }

    fn update_lines(&mut self, id: &str, points: &[DVec3], style: &LineStyle) {
        self.0
            .borrow_mut()
            .lines
            .push((id.to_owned(), points.len(), style.color.clone()));
    }
}

fn runtime() -> Runtime {
    let mut runtime = Runtime::with_builtin_nodes();
    runtime.register("Test.Polygon", |_| Box::new(PolygonSource));
    runtime
}

fn mesh_of(runtime: &Runtime, id: &str) -> MeshTri {
    runtime
        .output(id)
        .and_then(|v| v.as_mesh().cloned())
        .unwrap_or_else(|| panic!("{id} has no mesh"))
}

fn mesh_area(mesh: &MeshTri) -> f64 {
    let p = mesh.positions();
    mesh.indices()
        .iter()
        .map(|&[a, b, c]| {
            (p[b as usize] - p[a as usize])
                .cross(p[c as usize] - p[a as usize])
                .length()
                * 0.5
        })
        .sum()
}

fn square_source() -> NodeDef {
    NodeDef::new("Poly", "Test.Polygon")
        .with_params(json!({ "points": [[-1, -1], [1, -1], [1, 1], [-1, 1]] }))
}

#[test]
fn plane_through_identity_transform() {
    let mut runtime = runtime();
    runtime
        .load_graph(GraphDescription::new(vec![
            NodeDef::new("Plane", "CreatePlaneBySize").with_params(json!({ "w": 1.0, "h": 1.0 })),
            NodeDef::new("Xform", "Mesh.Transform").with_inputs(["Plane"]),
        ]))
        .unwrap();
    runtime.evaluate_all().unwrap();

    let mesh = mesh_of(&runtime, "Xform");
    assert_eq!(mesh.vertex_count(), 1089);
    assert_eq!(mesh.triangle_count(), 2048);
    assert_eq!(
        mesh.bounds(),
        Aabb::new(DVec3::new(-0.5, 0.0, -0.5), DVec3::new(0.5, 0.0, 0.5))
    );
    assert!(mesh.normals().iter().all(|n| n.y > 0.0));
}

#[test]
fn poisson_delaunay_keeps_plane_corners() {
    let mut runtime = runtime();
    runtime
        .load_graph(GraphDescription::new(vec![
            NodeDef::new("Plane", "CreatePlaneBySize"),
            NodeDef::new("Tri", "Meshing.PoissonDelaunay")
                .with_inputs(["Plane"])
                .with_params(json!({ "radius": 0.08 })),
        ]))
        .unwrap();
    runtime.evaluate_all().unwrap();

    let mesh = mesh_of(&runtime, "Tri");
    for (x, z) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
        let corner = DVec3::new(x, 0.0, z);
        assert!(mesh.positions().contains(&corner), "corner {corner} missing");
    }
    assert!(mesh.validate());
    assert_relative_eq!(mesh_area(&mesh), 1.0, epsilon = 1e-3);
}

#[test]
fn square_cdt_without_steiner_points() {
    let mut runtime = runtime();
    runtime
        .load_graph(GraphDescription::new(vec![
            square_source(),
            NodeDef::new("Cdt", "Meshing.Polygon.CDT")
                .with_inputs(["Poly"])
                .with_params(json!({ "radius": 0 })),
        ]))
        .unwrap();
    runtime.evaluate_all().unwrap();

    let mesh = mesh_of(&runtime, "Cdt");
    assert_eq!(mesh.triangle_count(), 2);
    assert_relative_eq!(mesh_area(&mesh), 4.0, epsilon = 1e-12);
}

#[test]
fn polygon_pipelines_cover_the_outline() {
    let mut runtime = runtime();
    let outline = json!({ "points": [[0, 0], [2, 0], [2, 1], [1, 1], [1, 2], [0, 2]] });
    runtime
        .load_graph(GraphDescription::new(vec![
            NodeDef::new("Poly", "Test.Polygon").with_params(outline),
            NodeDef::new("Clip", "Meshing.TriangulatePolygon").with_inputs(["Poly"]),
            NodeDef::new("Cdt", "Meshing.Polygon.CDT")
                .with_inputs(["Poly"])
                .with_params(json!({ "radius": 0.2, "seed": 1 })),
            NodeDef::new("Pd", "Meshing.Polygon.PoissonDelaunay")
                .with_inputs(["Poly"])
                .with_params(json!({ "radius": 0.2, "seed": 1 })),
        ]))
        .unwrap();
    runtime.evaluate_all().unwrap();

    let clip = mesh_of(&runtime, "Clip");
    assert_eq!(clip.triangle_count(), 4);
    assert_relative_eq!(mesh_area(&clip), 3.0, epsilon = 1e-12);

    let cdt = mesh_of(&runtime, "Cdt");
    assert!(cdt.vertex_count() > 6);
    assert_relative_eq!(mesh_area(&cdt), 3.0, epsilon = 1e-9);

    let filtered = mesh_of(&runtime, "Pd");
    assert!(mesh_area(&filtered) <= 3.0 + 1e-9);
    assert!(mesh_area(&filtered) > 2.5);

    for mesh in [&clip, &cdt, &filtered] {
        assert!(mesh.positions().iter().all(|p| p.y == 0.0));
        assert!(mesh.normals().iter().all(|n| n.y >= 0.0));
    }
}

#[test]
fn viewer_receives_drawings_and_is_cleared_on_load() {
    let scene = Rc::new(RefCell::new(Scene::default()));
    let mut runtime = runtime();
    runtime.set_viewer(Box::new(SharedViewer(Rc::clone(&scene))));

    let mut graph = GraphDescription::new(vec![
        square_source(),
        NodeDef::new("Cdt", "Meshing.Polygon.CDT").with_inputs(["Poly"]),
        NodeDef::new("MeshView", "View.DrawMesh").with_inputs(["Cdt"]),
        NodeDef::new("LineView", "View.DrawLines").with_inputs(["Poly"]),
    ]);
    graph.params = Params::from_json(json!({ "render": { "color": "#123456" } }));
    runtime.load_graph(graph.clone()).unwrap();
    runtime.evaluate_all().unwrap();

    {
        let scene = scene.borrow();
        assert_eq!(scene.clears, 1);
        assert_eq!(scene.meshes, [("MeshView".to_owned(), 2)]);
        assert_eq!(scene.lines, [("LineView".to_owned(), 4, "#123456".to_owned())]);
    }

    runtime.load_graph(graph).unwrap();
    let scene = scene.borrow();
    assert_eq!(scene.clears, 2);
    assert!(scene.meshes.is_empty());
}

#[test]
fn obj_and_svg_sources_feed_the_graph() {
    let dir = std::env::temp_dir();
    let obj = dir.join(format!("scenario-{}.obj", std::process::id()));
    let svg = dir.join(format!("scenario-{}.svg", std::process::id()));
    fs::write(&obj, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
    fs::write(&svg, r#"<svg><polygon points="0,0 10,0 10,-10 0,-10"/></svg>"#).unwrap();

    let mut runtime = runtime();
    runtime
        .load_graph(GraphDescription::new(vec![
            NodeDef::new("Obj", "LoadMeshOBJ").with_params(json!({ "path": obj })),
            NodeDef::new("ObjX", "Mesh.Transform")
                .with_inputs(["Obj"])
                .with_params(json!({ "scale": 2 })),
            NodeDef::new("Svg", "LoadPolygonSVG").with_params(json!({ "path": svg, "scale": 0.1 })),
            NodeDef::new("SvgTri", "Meshing.TriangulatePolygon").with_inputs(["Svg"]),
        ]))
        .unwrap();
    runtime.evaluate_all().unwrap();

    let moved = mesh_of(&runtime, "ObjX");
    assert_eq!(moved.triangle_count(), 2);
    assert_relative_eq!(moved.bounds().max.y, 2.0);

    let tri = mesh_of(&runtime, "SvgTri");
    assert_relative_eq!(mesh_area(&tri), 1.0, epsilon = 1e-12);

    fs::remove_file(obj).unwrap();
    fs::remove_file(svg).unwrap();
}

#[test]
fn runtime_config_guards_reach_the_nodes() {
    let config = GlobalConfig::default()
        .with_guards(POISSON_SEED_ATTEMPTS, 1, CDT_FLIP_GUARD)
        .unwrap();
    let mut runtime = runtime().with_config(config);
    runtime
        .load_graph(GraphDescription::new(vec![
            NodeDef::new("Square", "Test.Polygon")
                .with_params(json!({ "points": [[0, 0], [1, 0], [1, 1], [0, 1]] })),
            NodeDef::new("Clip", "Meshing.TriangulatePolygon").with_inputs(["Square"]),
        ]))
        .unwrap();
    runtime.evaluate_all().unwrap();

    // A single scan pass clips a single ear.
    assert_eq!(mesh_of(&runtime, "Clip").triangle_count(), 1);
    assert_eq!(runtime.config().earclip_max_passes, 1);
}
