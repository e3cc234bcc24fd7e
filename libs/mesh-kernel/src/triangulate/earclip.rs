//! # Ear Clipping
//!
//! Triangulates a simple polygon without adding points. Self-intersecting
//! input is not rejected; clipping stops at the first pass that finds no ear
//! and returns the triangles emitted so far.

use glam::DVec2;
use tracing::warn;

use crate::polygon::{orient, point_in_triangle, ring_area2};

/// Ear-clips `points`, returning counter-clockwise triangles indexing them.
///
/// The ring is walked counter-clockwise whatever its input winding. At most
/// `max_passes` ears are clipped.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use mesh_kernel::triangulate::earclip;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
/// assert_eq!(earclip(&square, 100), vec![[3, 0, 1], [3, 1, 2]]);
/// ```
pub fn earclip(points: &[DVec2], max_passes: usize) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut ring: Vec<usize> = (0..n).collect();
    if ring_area2(points) <= 0.0 {
        ring.reverse();
    }

    let mut out = Vec::with_capacity(n - 2);
    let mut passes = 0;
    while ring.len() > 2 && passes < max_passes {
        passes += 1;
        let Some(ear) = find_ear(points, &ring) else {
            warn!(
                remaining = ring.len(),
                clipped = out.len(),
                "No ear found, polygon is degenerate or self-intersecting"
            );
            break;
        };

        let len = ring.len();
        let prev = ring[(ear + len - 1) % len];
        let next = ring[(ear + 1) % len];
        out.push([prev as u32, ring[ear] as u32, next as u32]);
        ring.remove(ear);
    }

    out
}

/// Position in `ring` of the first clippable ear.
fn find_ear(points: &[DVec2], ring: &[usize]) -> Option<usize> {
    let len = ring.len();
    (0..len).find(|&i| {
        let i0 = ring[(i + len - 1) % len];
        let i1 = ring[i];
        let i2 = ring[(i + 1) % len];
        let (a, b, c) = (points[i0], points[i1], points[i2]);

        if orient(a, b, c) <= 0.0 {
            return false;
        }
        ring.iter()
            .filter(|&&k| k != i0 && k != i1 && k != i2)
            .all(|&k| !point_in_triangle(points[k], a, b, c))
    })
}
