//! # Bowyer-Watson Delaunay Triangulation
//!
//! Incremental construction inside a bounding super-triangle. Each inserted
//! point removes every triangle whose circumcircle contains it and
//! re-triangulates the star-shaped cavity from the point. Containment is
//! decided by the exact in-circle predicate, so cocircular inputs such as
//! regular polygons and square grids still produce a proper triangulation.
//!
//! Quadratic in the number of points, which is adequate for Poisson sample
//! sets at practical mesh resolutions.

use std::collections::{HashMap, HashSet};

use config::constants::SUPER_TRIANGLE_SCALE;
use glam::DVec2;
use tracing::debug;

use crate::polygon::{in_circle, orient};

/// A working triangle, always counter-clockwise.
#[derive(Debug, Clone, Copy)]
struct Triangle {
    v: [usize; 3],
}

impl Triangle {
    fn new([a, b, c]: [usize; 3], points: &[DVec2]) -> Self {
        if orient(points[a], points[b], points[c]) < 0.0 {
            Self { v: [a, c, b] }
        } else {
            Self { v: [a, b, c] }
        }
    }

    /// Strict and exact: cocircular points leave the triangle in place, so
    /// the cavity stays star-shaped around the inserted point.
    #[inline]
    fn circumcircle_contains(&self, points: &[DVec2], p: DVec2) -> bool {
        let [a, b, c] = self.v;
        in_circle(points[a], points[b], points[c], p) > 0.0
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

#[inline]
fn undirected(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Bit-exact key; `+ 0.0` folds negative zero into positive zero.
#[inline]
fn exact_key(p: DVec2) -> [u64; 2] {
    [(p.x + 0.0).to_bits(), (p.y + 0.0).to_bits()]
}

/// Super-triangle corners enclosing every point with a wide margin.
fn super_triangle(points: &[DVec2]) -> Option<[DVec2; 3]> {
    let first = *points.first()?;
    let (min, max) = points
        .iter()
        .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
    let size = max - min;
    let d = size.x.max(size.y) * SUPER_TRIANGLE_SCALE;
    if !(d > 0.0 && d.is_finite()) {
        return None;
    }
    let mid = (min + max) * 0.5;
    Some([
        DVec2::new(mid.x - d, mid.y - d),
        DVec2::new(mid.x + d, mid.y - d),
        DVec2::new(mid.x, mid.y + d),
    ])
}

/// A triangulation whose last three points are the super-triangle corners.
///
/// Covers the whole super-triangle, so every input point has a complete
/// neighborhood. Triangles are counter-clockwise and never zero-area.
#[derive(Debug, Clone)]
pub(crate) struct Enclosed {
    /// Input points followed by the three super-triangle corners.
    pub points: Vec<DVec2>,
    /// Triangles over `points`.
    pub triangles: Vec<[usize; 3]>,
}

impl Enclosed {
    /// Number of input points; indices at or above it are corners.
    pub fn input_count(&self) -> usize {
        self.points.len() - 3
    }
}

/// Runs Bowyer-Watson and keeps the super-triangle corners.
///
/// Returns `None` when fewer than three points are given or the points span
/// no extent at all.
pub(crate) fn enclosed_delaunay(points: &[DVec2]) -> Option<Enclosed> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let corners = super_triangle(points)?;

    let mut pts = points.to_vec();
    pts.extend_from_slice(&corners);
    let mut triangles = vec![Triangle::new([n, n + 1, n + 2], &pts)];

    let mut seen = HashSet::with_capacity(n);
    let mut skipped = 0usize;

    for (i, &p) in points.iter().enumerate() {
        if !seen.insert(exact_key(p)) {
            skipped += 1;
            continue;
        }

        let (bad, good): (Vec<Triangle>, Vec<Triangle>) = triangles
            .into_iter()
            .partition(|t| t.circumcircle_contains(&pts, p));
        triangles = good;

        // Cavity boundary: edges used by exactly one removed triangle,
        // kept in first-seen order for deterministic output.
        let mut counts: HashMap<(usize, usize), u32> = HashMap::new();
        let mut order = Vec::with_capacity(bad.len() * 3);
        for edge in bad.iter().flat_map(Triangle::edges) {
            let key = undirected(edge.0, edge.1);
            let count = counts.entry(key).or_insert(0);
            if *count == 0 {
                order.push(edge);
            }
            *count += 1;
        }

        for (a, b) in order {
            if counts.get(&undirected(a, b)) == Some(&1) {
                triangles.push(Triangle::new([a, b, i], &pts));
            }
        }
    }

    let triangles: Vec<[usize; 3]> = triangles
        .into_iter()
        .filter_map(|t| {
            let [a, b, c] = t.v;
            let area = orient(pts[a], pts[b], pts[c]);
            if area > 0.0 {
                Some([a, b, c])
            } else if area < 0.0 {
                Some([a, c, b])
            } else {
                None
            }
        })
        .collect();

    if skipped > 0 {
        debug!(duplicates = skipped, "Skipped duplicate Delaunay input points");
    }
    Some(Enclosed {
        points: pts,
        triangles,
    })
}

/// Delaunay-triangulates a point set.
///
/// Returns counter-clockwise triangles indexing `points`. Exact duplicate
/// points are skipped and never referenced; zero-area triangles are dropped.
/// Fewer than three distinct points yield no triangles.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use mesh_kernel::triangulate::delaunay;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
/// assert_eq!(delaunay(&square).len(), 2);
/// ```
pub fn delaunay(points: &[DVec2]) -> Vec<[u32; 3]> {
    let Some(enclosed) = enclosed_delaunay(points) else {
        return Vec::new();
    };
    let n = enclosed.input_count();

    let result: Vec<[u32; 3]> = enclosed
        .triangles
        .into_iter()
        .filter(|t| t.iter().all(|&v| v < n))
        .map(|t| t.map(|v| v as u32))
        .collect();

    debug!(
        points = n,
        triangles = result.len(),
        "Delaunay triangulation finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_points(count: usize, seed: u64) -> Vec<DVec2> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| DVec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect()
    }

    fn regular_polygon(n: usize) -> Vec<DVec2> {
        (0..n)
            .map(|i| DVec2::from_angle(std::f64::consts::TAU * i as f64 / n as f64))
            .collect()
    }

    fn total_area(points: &[DVec2], tris: &[[u32; 3]]) -> f64 {
        tris.iter()
            .map(|&[a, b, c]| {
                orient(points[a as usize], points[b as usize], points[c as usize]) * 0.5
            })
            .sum()
    }

    fn assert_manifold(tris: &[[u32; 3]]) {
        let mut directed = HashSet::new();
        for &[a, b, c] in tris {
            for edge in [(a, b), (b, c), (c, a)] {
                assert!(directed.insert(edge), "edge {edge:?} used twice");
            }
        }
    }

    #[test]
    fn test_cocircular_points_tile_the_polygon() {
        for n in [4, 5, 12, 32, 64] {
            let points = regular_polygon(n);
            let tris = delaunay(&points);
            assert_eq!(tris.len(), n - 2, "{n}-gon");
            assert_manifold(&tris);

            let expected = 0.5 * n as f64 * (std::f64::consts::TAU / n as f64).sin();
            assert_relative_eq!(total_area(&points, &tris), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_square_grid_covers_rectangle() {
        // Every grid cell has four cocircular corners.
        let points: Vec<DVec2> = (0..11)
            .flat_map(|i| (0..6).map(move |j| DVec2::new(i as f64 * 0.1, j as f64 * 0.2)))
            .collect();
        let tris = delaunay(&points);
        assert_eq!(tris.len(), 2 * 10 * 5);
        assert_manifold(&tris);
        assert_relative_eq!(total_area(&points, &tris), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_too_few_points() {
        assert!(delaunay(&[]).is_empty());
        assert!(delaunay(&[DVec2::ZERO, DVec2::X]).is_empty());
    }

    #[test]
    fn test_collinear_points_yield_nothing() {
        let points: Vec<DVec2> = (0..5).map(|i| DVec2::new(i as f64, 0.0)).collect();
        assert!(delaunay(&points).is_empty());
    }

    #[test]
    fn test_duplicates_are_never_referenced() {
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
        ];
        let tris = delaunay(&points);
        assert_eq!(tris.len(), 1);
        assert!(tris.iter().flatten().all(|&i| i != 2));
    }

    #[test]
    fn test_triangles_are_ccw_and_in_range() {
        let points = random_points(200, 1);
        let tris = delaunay(&points);
        assert!(!tris.is_empty());
        assert_manifold(&tris);
        assert!(total_area(&points, &tris) <= 4.0 + 1e-9);
        for &[a, b, c] in &tris {
            assert!((a as usize) < points.len());
            assert!(orient(points[a as usize], points[b as usize], points[c as usize]) > 0.0);
        }
    }

    #[test]
    fn test_empty_circumcircle_property() {
        let points = random_points(150, 2);
        let tris = delaunay(&points);
        for &[a, b, c] in &tris {
            let (a, b, c) = (points[a as usize], points[b as usize], points[c as usize]);
            for &p in &points {
                if p == a || p == b || p == c {
                    continue;
                }
                assert!(in_circle(a, b, c, p) <= 1e-9, "point {p} inside circumcircle");
            }
        }
    }

    #[test]
    fn test_square_with_center_fan() {
        let points = [
            DVec2::new(-1.0, -1.0),
            DVec2::new(1.0, -1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(-1.0, 1.0),
            DVec2::ZERO,
        ];
        let tris = delaunay(&points);
        assert_eq!(tris.len(), 4);
        assert!(tris.iter().all(|t| t.contains(&4)));
        let area: f64 = tris
            .iter()
            .map(|&[a, b, c]| {
                orient(points[a as usize], points[b as usize], points[c as usize]) * 0.5
            })
            .sum();
        assert_relative_eq!(area, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic_output() {
        let points = random_points(100, 3);
        assert_eq!(delaunay(&points), delaunay(&points));
    }
}
