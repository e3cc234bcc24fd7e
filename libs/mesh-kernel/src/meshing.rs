//! # Meshing Recipes
//!
//! End-to-end conversions from surfaces and polygons to upward-facing
//! [`MeshTri`] values on the X/Z plane. Each recipe combines sampling and
//! triangulation the way the corresponding pipeline node needs it.

use config::constants::{BOUNDARY_STEP_FACTOR, MIN_BOUNDARY_STEP, PLANE_EDGE_DIVISIONS};
use glam::DVec2;
use rand::Rng;
use tracing::{debug, info_span};

use crate::error::KernelResult;
use crate::mesh::MeshTri;
use crate::polygon::Polygon2D;
use crate::sampling::{poisson_disk, poisson_disk_in_polygon, PoissonParams};
use crate::triangulate::{boundary_respecting_delaunay, constrained_delaunay, delaunay, earclip};

/// Interior points of the rectangle outline, corners excluded.
///
/// Each side is split into `max(1, floor(len / step))` equal parts.
fn rectangle_edge_points(width: f64, height: f64, step: f64) -> Vec<DVec2> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let corners = [
        DVec2::new(-hw, -hh),
        DVec2::new(hw, -hh),
        DVec2::new(hw, hh),
        DVec2::new(-hw, hh),
    ];

    let mut out = Vec::new();
    for i in 0..4 {
        let (a, b) = (corners[i], corners[(i + 1) % 4]);
        let parts = ((a.distance(b) / step).floor() as usize).max(1);
        out.extend((1..parts).map(|k| a.lerp(b, k as f64 / parts as f64)));
    }
    out.extend(corners);
    out
}

/// Poisson-Delaunay mesh of a `width` x `height` rectangle centered at the
/// origin.
///
/// The four exact corners and evenly spaced edge points (spacing
/// `max(radius, min(w, h) / 16)`) are added to the samples so the mesh
/// covers the whole rectangle.
///
/// # Example
///
/// ```rust
/// use mesh_kernel::meshing::plane_poisson_delaunay;
/// use mesh_kernel::sampling::PoissonParams;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let mesh = plane_poisson_delaunay(1.0, 1.0, &PoissonParams::new(0.1), &mut rng);
/// assert_eq!(mesh.bounds().max.x, 0.5);
/// assert!(mesh.normals().iter().all(|n| n.y >= 0.0));
/// ```
pub fn plane_poisson_delaunay<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    params: &PoissonParams,
    rng: &mut R,
) -> MeshTri {
    let _span =
        info_span!("plane_poisson_delaunay", width, height, radius = params.radius).entered();

    let mut points = poisson_disk(width, height, params, rng);
    let sampled = points.len();
    let step = params.radius.max(width.min(height) / PLANE_EDGE_DIVISIONS);
    points.extend(rectangle_edge_points(width, height, step));

    let triangles = delaunay(&points);
    debug!(
        sampled,
        boundary = points.len() - sampled,
        triangles = triangles.len(),
        "Plane meshed"
    );
    MeshTri::planar(&points, triangles)
}

/// Poisson-Delaunay mesh of a polygon's interior using the
/// densify-and-filter strategy.
///
/// Boundary edges are approximated: the boundary is densified with spacing
/// `0.6 * radius`, then triangles outside the polygon or cutting across it
/// are discarded.
pub fn polygon_poisson_delaunay<R: Rng + ?Sized>(
    polygon: &Polygon2D,
    params: &PoissonParams,
    rng: &mut R,
) -> MeshTri {
    let _span = info_span!("polygon_poisson_delaunay", vertices = polygon.len()).entered();

    let samples = poisson_disk_in_polygon(polygon, params, rng);
    let step = MIN_BOUNDARY_STEP.max(params.radius * BOUNDARY_STEP_FACTOR);
    boundary_respecting_delaunay(polygon, &samples, step).into_mesh()
}

/// Constrained Delaunay mesh of a polygon that keeps every boundary edge.
///
/// With `steiner` parameters, Poisson samples inside the polygon are added
/// as interior vertices.
///
/// # Errors
///
/// Propagates [`crate::KernelError`] from the constrained triangulator.
pub fn polygon_cdt<R: Rng + ?Sized>(
    polygon: &Polygon2D,
    steiner: Option<&PoissonParams>,
    flip_guard: usize,
    rng: &mut R,
) -> KernelResult<MeshTri> {
    let _span = info_span!("polygon_cdt", vertices = polygon.len()).entered();

    let steiner_points = steiner
        .map(|params| poisson_disk_in_polygon(polygon, params, rng))
        .unwrap_or_default();
    Ok(constrained_delaunay(polygon, &steiner_points, flip_guard)?.into_mesh())
}

/// Ear-clipped mesh of a simple polygon, vertices unchanged.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use mesh_kernel::{meshing::polygon_earclip, Polygon2D};
///
/// let triangle = Polygon2D::new(vec![DVec2::ZERO, DVec2::X, DVec2::Y]);
/// let mesh = polygon_earclip(&triangle, 100);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
pub fn polygon_earclip(polygon: &Polygon2D, max_passes: usize) -> MeshTri {
    let triangles = earclip(&polygon.points, max_passes);
    MeshTri::planar(&polygon.points, triangles)
}
