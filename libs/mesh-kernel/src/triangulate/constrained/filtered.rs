//! Boundary-respecting Delaunay with a geometric acceptance filter.
//!
//! The boundary is densified so plain Delaunay tends to follow it, then each
//! triangle is tested independently (in parallel) against the polygon.

use config::constants::MIN_BOUNDARY_STEP;
use glam::DVec2;
use rayon::prelude::*;
use tracing::debug;

use super::merge_points;
use crate::polygon::{same_point, segments_intersect_proper, Polygon2D};
use crate::triangulate::{delaunay, PlanarTriangulation};

/// Returns true when edge `ab` properly crosses a boundary edge it does not
/// share an endpoint with.
fn crosses_boundary(a: DVec2, b: DVec2, polygon: &Polygon2D) -> bool {
    polygon.edges().any(|(p0, p1)| {
        let shares_endpoint =
            same_point(a, p0) || same_point(a, p1) || same_point(b, p0) || same_point(b, p1);
        !shares_endpoint && segments_intersect_proper(a, b, p0, p1)
    })
}

/// Keeps a triangle when its centroid is inside the polygon and none of its
/// edges cut across the boundary.
pub fn accept_triangle(a: DVec2, b: DVec2, c: DVec2, polygon: &Polygon2D) -> bool {
    let centroid = (a + b + c) / 3.0;
    polygon.contains(centroid)
        && !crosses_boundary(a, b, polygon)
        && !crosses_boundary(b, c, polygon)
        && !crosses_boundary(c, a, polygon)
}

/// Triangulates a polygon together with interior samples.
///
/// The boundary is densified with spacing `step` (at least
/// `MIN_BOUNDARY_STEP`), merged with `interior`, deduplicated and
/// Delaunay-triangulated; triangles failing [`accept_triangle`] are dropped.
/// Fewer than three distinct points yield an empty triangulation.
pub fn boundary_respecting_delaunay(
    polygon: &Polygon2D,
    interior: &[DVec2],
    step: f64,
) -> PlanarTriangulation {
    let boundary = polygon.densify_boundary(step.max(MIN_BOUNDARY_STEP));
    let points = merge_points(&[&boundary, interior]);
    if points.len() < 3 {
        return PlanarTriangulation::default();
    }

    let candidates = delaunay(&points);
    let candidate_count = candidates.len();
    let triangles: Vec<[u32; 3]> = candidates
        .into_par_iter()
        .filter(|&[a, b, c]| {
            accept_triangle(
                points[a as usize],
                points[b as usize],
                points[c as usize],
                polygon,
            )
        })
        .collect();

    debug!(
        boundary = boundary.len(),
        interior = interior.len(),
        candidates = candidate_count,
        kept = triangles.len(),
        "Filtered polygon triangulation finished"
    );
    PlanarTriangulation { points, triangles }
}
