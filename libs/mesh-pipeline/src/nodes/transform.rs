//! `Mesh.Transform`: places geometry with translate, rotate and scale.

use std::sync::Arc;

use glam::DVec3;
use mesh_kernel::Trs;

use crate::error::NodeError;
use crate::node::{first_input, EvalContext, GraphNode};
use crate::params::Params;
use crate::value::Value;

/// Reads `translate`, `rotate` (Euler XYZ in degrees) and `scale`.
pub fn trs_from_params(params: &Params) -> Result<Trs, NodeError> {
    Ok(Trs {
        translate: params.vec3_or("translate", DVec3::ZERO)?,
        rotate_degrees: params.vec3_or("rotate", DVec3::ZERO)?,
        scale: params.vec3_or("scale", DVec3::ONE)?,
    })
}

/// Applies a TRS transform to a copy of its input.
///
/// A surface is first turned into a regular grid of
/// `config.grid_segments` cells per side. Polygons pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshTransform;

impl GraphNode for MeshTransform {
    fn evaluate(
        &mut self,
        ctx: &mut EvalContext<'_>,
        inputs: &[Arc<Value>],
        params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        let trs = trs_from_params(params)?;
        match first_input(inputs) {
            Value::Empty => Err(NodeError::MissingInput),
            Value::Surface(surface) => {
                let segments = ctx.config().grid_segments;
                let grid = surface.triangulate_grid(segments, segments);
                Ok(Value::MeshTri(grid.transformed(&trs)))
            }
            Value::MeshTri(mesh) => Ok(Value::MeshTri(mesh.transformed(&trs))),
            polygon @ Value::Polygon2D(_) => Ok(polygon.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use config::constants::GlobalConfig;
    use glam::DVec2;
    use mesh_kernel::{Aabb, Polygon2D, Surface};
    use serde_json::json;

    fn run(
        input: Value,
        params: serde_json::Value,
        config: GlobalConfig,
    ) -> Result<Value, NodeError> {
        let mut ctx = EvalContext::new("Xform", &config, None);
        MeshTransform.evaluate(
            &mut ctx,
            &[Arc::new(input)],
            &Params::from_json(params),
            &Params::new(),
        )
    }

    #[test]
    fn test_surface_becomes_grid() {
        let out = run(
            Value::from(Surface::plane(1.0, 1.0)),
            json!({}),
            GlobalConfig::default(),
        )
        .unwrap();
        let mesh = out.as_mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 1089);
        assert_eq!(mesh.triangle_count(), 2048);
        assert_eq!(
            mesh.bounds(),
            Aabb::new(DVec3::new(-0.5, 0.0, -0.5), DVec3::new(0.5, 0.0, 0.5))
        );
    }

    #[test]
    fn test_grid_resolution_follows_config() {
        let config = GlobalConfig::new(1e-10, 30, 4).unwrap();
        let out = run(Value::from(Surface::plane(1.0, 1.0)), json!({}), config).unwrap();
        assert_eq!(out.as_mesh().unwrap().triangle_count(), 32);
    }

    #[test]
    fn test_translate_and_scale() {
        let out = run(
            Value::from(Surface::plane(1.0, 1.0)),
            json!({ "translate": [0, 1, 0], "rotate": [0, 90, 0], "scale": 2 }),
            GlobalConfig::default(),
        )
        .unwrap();
        let bounds = out.as_mesh().unwrap().bounds();
        assert_relative_eq!(bounds.min.y, 1.0);
        assert_relative_eq!(bounds.max.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.min.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_input_is_not_modified() {
        let mesh = Surface::plane(1.0, 1.0).triangulate_grid(2, 2);
        let input = Arc::new(Value::from(mesh.clone()));
        let config = GlobalConfig::default();
        let mut ctx = EvalContext::new("Xform", &config, None);
        let params = Params::from_json(json!({ "translate": [5, 0, 0] }));
        MeshTransform
            .evaluate(&mut ctx, &[Arc::clone(&input)], &params, &Params::new())
            .unwrap();
        assert_eq!(input.as_mesh().unwrap(), &mesh);
    }

    #[test]
    fn test_missing_input_and_polygon_passthrough() {
        assert!(matches!(
            run(Value::Empty, json!({}), GlobalConfig::default()),
            Err(NodeError::MissingInput)
        ));

        let poly = Polygon2D::new(vec![DVec2::ZERO, DVec2::X, DVec2::Y]);
        let out = run(
            Value::from(poly.clone()),
            json!({ "translate": [1, 0, 0] }),
            GlobalConfig::default(),
        )
        .unwrap();
        assert_eq!(out, Value::Polygon2D(poly));

        assert!(matches!(
            run(Value::Empty, json!({ "scale": [1, 2] }), GlobalConfig::default()),
            Err(NodeError::MalformedParameter { .. })
        ));
    }
}
