//! # Polygon-Constrained Triangulation
//!
//! Two ways of triangulating the interior of a polygon together with extra
//! interior points:
//!
//! - [`filtered`]: densify the boundary, run plain Delaunay on everything and
//!   discard triangles that fall outside or cut across the boundary.
//! - [`cdt`]: constrained Delaunay triangulation that keeps every polygon
//!   edge exactly.

pub mod cdt;
pub mod filtered;


use std::collections::HashSet;

use config::constants::DEDUP_SCALE;
use glam::DVec2;

/// Merges point lists, keeping the first point for each coordinate rounded to
/// six decimals.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use mesh_kernel::triangulate::constrained::merge_points;
///
/// let merged = merge_points(&[&[DVec2::ZERO, DVec2::X], &[DVec2::new(1e-8, 0.0)]]);
/// assert_eq!(merged, vec![DVec2::ZERO, DVec2::X]);
/// ```
pub fn merge_points(sets: &[&[DVec2]]) -> Vec<DVec2> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for &p in sets.iter().flat_map(|set| set.iter()) {
        let key = (
            (p.x * DEDUP_SCALE).round() as i64,
            (p.y * DEDUP_SCALE).round() as i64,
        );
        if seen.insert(key) {
            merged.push(p);
        }
    }
    merged
}
