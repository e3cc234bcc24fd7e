//! Drawing nodes. They forward their input to the runtime's viewer and
//! produce [`Value::Empty`]. An absent input draws nothing.
//!
//! Render options come from the graph's global `render` params overlaid
//! by the node's own params.

use std::sync::Arc;

use config::constants::LINE_LIFT;
use glam::DVec3;
use mesh_kernel::SurfaceBasis;
use tracing::info;

use crate::error::NodeError;
use crate::node::{first_input, EvalContext, GraphNode};
use crate::params::Params;
use crate::value::Value;
use crate::viewer::{LineStyle, MeshStyle};

/// Shows a mesh, or the regular grid of a plane surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawMesh;

impl GraphNode for DrawMesh {
    fn evaluate(
        &mut self,
        ctx: &mut EvalContext<'_>,
        inputs: &[Arc<Value>],
        params: &Params,
        globals: &Params,
    ) -> Result<Value, NodeError> {
        let style = MeshStyle::from_params(&globals.object("render").overlay(params));
        let grid;
        let mesh = match first_input(inputs) {
            Value::MeshTri(mesh) => mesh,
            Value::Surface(surface) => match surface.basis {
                SurfaceBasis::Plane => {
                    let segments = ctx.config().grid_segments;
                    grid = surface.triangulate_grid(segments, segments);
                    &grid
                }
            },
            Value::Empty | Value::Polygon2D(_) => return Ok(Value::Empty),
        };

        let bounds = mesh.bounds();
        info!(
            id = ctx.node_id(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            min = ?bounds.min,
            max = ?bounds.max,
            "Mesh"
        );
        ctx.draw_mesh(mesh, &style);
        Ok(Value::Empty)
    }
}

/// Shows a polygon outline as a closed line loop, lifted slightly above
/// Y = 0 so it stays visible on top of a mesh of the same polygon.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawLines;

impl GraphNode for DrawLines {
    fn evaluate(
        &mut self,
        ctx: &mut EvalContext<'_>,
        inputs: &[Arc<Value>],
        params: &Params,
        globals: &Params,
    ) -> Result<Value, NodeError> {
        let Value::Polygon2D(polygon) = first_input(inputs) else {
            return Ok(Value::Empty);
        };
        if polygon.len() < 2 {
            return Ok(Value::Empty);
        }

        let color = match params.str_opt("color")? {
            Some(color) => Some(color.to_owned()),
            None => globals
                .object("render")
                .str_opt("color")
                .ok()
                .flatten()
                .map(str::to_owned),
        };
        let style = LineStyle {
            color: color.unwrap_or_else(|| LineStyle::default().color),
            closed: true,
        };

        let points: Vec<DVec3> = polygon
            .points
            .iter()
            .map(|p| DVec3::new(p.x, LINE_LIFT, p.y))
            .collect();
        ctx.draw_lines(&points, &style);
        Ok(Value::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::Viewer;
    use config::constants::{GlobalConfig, DEFAULT_LINE_COLOR};
    use glam::DVec2;
    use mesh_kernel::{MeshTri, Polygon2D, Surface};
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        meshes: Vec<(String, usize, MeshStyle)>,
        lines: Vec<(String, Vec<DVec3>, LineStyle)>,
    }

    impl Viewer for Recorder {
        fn clear_all(&mut self) {
            self.meshes.clear();
            self.lines.clear();
        }

        fn update_mesh(&mut self, id: &str, mesh: &MeshTri, style: &MeshStyle) {
            self.meshes
                .push((id.to_owned(), mesh.triangle_count(), style.clone()));
        }

        fn update_lines(&mut self, id: &str, points: &[DVec3], style: &LineStyle) {
            self.lines.push((id.to_owned(), points.to_vec(), style.clone()));
        }
    }

    fn draw(
        node: &mut dyn GraphNode,
        recorder: &mut Recorder,
        input: Value,
        params: serde_json::Value,
        globals: serde_json::Value,
    ) -> Value {
        let config = GlobalConfig::default();
        let mut ctx = EvalContext::new("View", &config, Some(recorder));
        node.evaluate(
            &mut ctx,
            &[Arc::new(input)],
            &Params::from_json(params),
            &Params::from_json(globals),
        )
        .unwrap()
    }

    #[test]
    fn test_draw_mesh_merges_render_options() {
        let mut recorder = Recorder::default();
        let mesh = Surface::plane(1.0, 1.0).triangulate_grid(2, 2);
        let out = draw(
            &mut DrawMesh,
            &mut recorder,
            Value::from(mesh),
            json!({ "color": "#ff0000" }),
            json!({ "render": { "wireframe": true, "color": "#000000" } }),
        );
        assert!(out.is_empty());

        let (id, triangles, style) = &recorder.meshes[0];
        assert_eq!(id, "View");
        assert_eq!(*triangles, 8);
        assert!(style.wireframe);
        assert!(!style.double_sided);
        assert_eq!(style.color, "#ff0000");
    }

    #[test]
    fn test_draw_mesh_shows_surface_grid() {
        let mut recorder = Recorder::default();
        draw(
            &mut DrawMesh,
            &mut recorder,
            Value::from(Surface::plane(1.0, 1.0)),
            json!({}),
            json!({}),
        );
        assert_eq!(recorder.meshes[0].1, 2048);
        assert_eq!(recorder.meshes[0].2, MeshStyle::default());
    }

    #[test]
    fn test_draw_nothing_without_input() {
        let mut recorder = Recorder::default();
        draw(&mut DrawMesh, &mut recorder, Value::Empty, json!({}), json!({}));
        draw(&mut DrawLines, &mut recorder, Value::Empty, json!({}), json!({}));
        assert!(recorder.meshes.is_empty());
        assert!(recorder.lines.is_empty());
    }

    #[test]
    fn test_draw_lines_lifts_outline() {
        let mut recorder = Recorder::default();
        let poly = Polygon2D::new(vec![DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0)]);
        draw(
            &mut DrawLines,
            &mut recorder,
            Value::from(poly),
            json!({}),
            json!({ "render": { "color": "#00ff00" } }),
        );

        let (_, points, style) = &recorder.lines[0];
        assert_eq!(points[1], DVec3::new(3.0, LINE_LIFT, 4.0));
        assert_eq!(style.color, "#00ff00");
        assert!(style.closed);

        draw(
            &mut DrawLines,
            &mut recorder,
            Value::from(Polygon2D::new(vec![DVec2::ZERO, DVec2::X])),
            json!({}),
            json!({}),
        );
        assert_eq!(recorder.lines[1].2.color, DEFAULT_LINE_COLOR);
    }

    #[test]
    fn test_draw_without_viewer_is_silent() {
        let config = GlobalConfig::default();
        let mut ctx = EvalContext::new("View", &config, None);
        let out = DrawMesh
            .evaluate(
                &mut ctx,
                &[Arc::new(Value::from(Surface::plane(1.0, 1.0)))],
                &Params::new(),
                &Params::new(),
            )
            .unwrap();
        assert!(out.is_empty());
    }
}
