//! Source nodes: they take no inputs and produce a value from their
//! params or from a file.

use std::fs;
use std::sync::Arc;

use config::constants::DEFAULT_PLANE_SIZE;
use mesh_kernel::{MeshTri, Surface};
use tracing::debug;

use crate::error::NodeError;
use crate::formats::{parse_obj, parse_svg_polygon};
use crate::node::{EvalContext, GraphNode};
use crate::params::Params;
use crate::value::Value;

/// File path parameter; `url` is accepted as an alias.
fn source_path(params: &Params) -> Result<&str, NodeError> {
    match params.str_opt("path")? {
        Some(path) => Ok(path),
        None => params
            .str_opt("url")?
            .ok_or_else(|| NodeError::malformed("path", "required")),
    }
}

/// `w` x `h` plane surface (defaults 1 x 1). Both sizes must exceed the
/// configured tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatePlaneBySize;

impl GraphNode for CreatePlaneBySize {
    fn evaluate(
        &mut self,
        ctx: &mut EvalContext<'_>,
        _inputs: &[Arc<Value>],
        params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        let w = params.f64_or("w", DEFAULT_PLANE_SIZE)?;
        let h = params.f64_or("h", DEFAULT_PLANE_SIZE)?;
        for (name, size) in [("w", w), ("h", h)] {
            if size <= ctx.config().tolerance {
                return Err(NodeError::malformed(name, format!("must be positive, got {size}")));
            }
        }
        Ok(Value::Surface(Surface::plane(w, h)))
    }
}

/// Triangle mesh read from a Wavefront OBJ file (`path`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadMeshObj;

impl GraphNode for LoadMeshObj {
    fn evaluate(
        &mut self,
        _ctx: &mut EvalContext<'_>,
        _inputs: &[Arc<Value>],
        params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        let path = source_path(params)?;
        let text = fs::read_to_string(path)?;
        let geometry = parse_obj(&text)?;
        let mesh = MeshTri::new(geometry.positions, geometry.triangles)?;
        debug!(
            path,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "OBJ loaded"
        );
        Ok(Value::MeshTri(mesh))
    }
}

/// Polygon read from an SVG file (`path`), coordinates multiplied by
/// `scale` (default 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadPolygonSvg;

impl GraphNode for LoadPolygonSvg {
    fn evaluate(
        &mut self,
        _ctx: &mut EvalContext<'_>,
        _inputs: &[Arc<Value>],
        params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        let path = source_path(params)?;
        let scale = params.f64_or("scale", 1.0)?;
        let text = fs::read_to_string(path)?;
        let polygon = parse_svg_polygon(&text, scale)?;
        debug!(path, points = polygon.len(), "SVG polygon loaded");
        Ok(Value::Polygon2D(polygon))
    }
}
