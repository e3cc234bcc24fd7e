//! Meshing nodes: turn a surface or polygon into a [`MeshTri`].
//!
//! Sampling nodes take an optional `seed`; with one, output is
//! reproducible, without one every run draws fresh samples.

use std::sync::Arc;

use config::constants::{
    GlobalConfig, DEFAULT_SAMPLE_RADIUS, PLANE_MIN_RADIUS, POLYGON_MIN_RADIUS,
};
use mesh_kernel::meshing;
use mesh_kernel::sampling::PoissonParams;
use mesh_kernel::{MeshTri, SurfaceBasis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::NodeError;
use crate::node::{first_input, EvalContext, GraphNode};
use crate::params::Params;
use crate::value::Value;

/// Generator seeded from `seed`, or from the OS when absent.
fn node_rng(params: &Params) -> Result<StdRng, NodeError> {
    Ok(match params.u64_opt("seed")? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    })
}

/// Reads `radius`, rejecting values not above the configured tolerance and
/// clamping small ones up to `min`.
fn sample_radius(params: &Params, config: &GlobalConfig, min: f64) -> Result<f64, NodeError> {
    let radius = params.f64_or("radius", DEFAULT_SAMPLE_RADIUS)?;
    if radius <= config.tolerance {
        return Err(NodeError::malformed(
            "radius",
            format!("must be positive, got {radius}"),
        ));
    }
    Ok(radius.max(min))
}

fn poisson_params(radius: f64, config: &GlobalConfig) -> PoissonParams {
    PoissonParams::new(radius)
        .with_attempts(config.poisson_attempts)
        .with_seed_attempts(config.seed_attempts)
}

fn log_mesh(ctx: &EvalContext<'_>, mesh: &MeshTri) {
    debug!(
        id = ctx.node_id(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Meshed"
    );
}

/// Poisson-Delaunay mesh of a plane surface.
///
/// Params: `radius` (default 0.05, at least 0.001), `seed`. A `MeshTri`
/// input is passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanePoissonDelaunay;

impl GraphNode for PlanePoissonDelaunay {
    fn evaluate(
        &mut self,
        ctx: &mut EvalContext<'_>,
        inputs: &[Arc<Value>],
        params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        let surface = match first_input(inputs) {
            Value::Surface(surface) => surface,
            Value::MeshTri(mesh) => return Ok(Value::MeshTri(mesh.clone())),
            Value::Empty => return Err(NodeError::MissingInput),
            other => {
                return Err(NodeError::InvalidInputType {
                    expected: "Surface",
                    found: other.kind(),
                })
            }
        };

        let radius = sample_radius(params, ctx.config(), PLANE_MIN_RADIUS)?;
        let mut rng = node_rng(params)?;
        let mesh = match surface.basis {
            SurfaceBasis::Plane => meshing::plane_poisson_delaunay(
                surface.size.x,
                surface.size.y,
                &poisson_params(radius, ctx.config()),
                &mut rng,
            ),
        };
        log_mesh(ctx, &mesh);
        Ok(Value::MeshTri(mesh))
    }
}

/// Ear-clipped mesh of a polygon, no vertices added.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangulatePolygon;

impl GraphNode for TriangulatePolygon {
    fn evaluate(
        &mut self,
        ctx: &mut EvalContext<'_>,
        inputs: &[Arc<Value>],
        _params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        let polygon = first_input(inputs).expect_polygon()?;
        let mesh = meshing::polygon_earclip(polygon, ctx.config().earclip_max_passes);
        log_mesh(ctx, &mesh);
        Ok(Value::MeshTri(mesh))
    }
}

/// Poisson-Delaunay mesh of a polygon interior, filtered against the
/// boundary.
///
/// Params: `radius` (default 0.05, at least 1e-5), `seed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonPoissonDelaunay;

impl GraphNode for PolygonPoissonDelaunay {
    fn evaluate(
        &mut self,
        ctx: &mut EvalContext<'_>,
        inputs: &[Arc<Value>],
        params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        let polygon = first_input(inputs).expect_polygon()?;
        let radius = sample_radius(params, ctx.config(), POLYGON_MIN_RADIUS)?;
        let mut rng = node_rng(params)?;
        let mesh = meshing::polygon_poisson_delaunay(
            polygon,
            &poisson_params(radius, ctx.config()),
            &mut rng,
        );
        log_mesh(ctx, &mesh);
        Ok(Value::MeshTri(mesh))
    }
}

/// Constrained Delaunay mesh of a polygon; every boundary edge is kept.
///
/// Params: `radius` (absent or 0 for no interior points, otherwise at
/// least 1e-5), `seed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonCdt;

impl GraphNode for PolygonCdt {
    fn evaluate(
        &mut self,
        ctx: &mut EvalContext<'_>,
        inputs: &[Arc<Value>],
        params: &Params,
        _globals: &Params,
    ) -> Result<Value, NodeError> {
        let polygon = first_input(inputs).expect_polygon()?;
        let radius = params.f64_or("radius", 0.0)?;
        if radius < 0.0 {
            return Err(NodeError::malformed(
                "radius",
                format!("must not be negative, got {radius}"),
            ));
        }

        let steiner = (radius > 0.0)
            .then(|| poisson_params(radius.max(POLYGON_MIN_RADIUS), ctx.config()));
        let mut rng = node_rng(params)?;
        let mesh = meshing::polygon_cdt(
            polygon,
            steiner.as_ref(),
            ctx.config().flip_guard,
            &mut rng,
        )?;
        log_mesh(ctx, &mesh);
        Ok(Value::MeshTri(mesh))
    }
}
