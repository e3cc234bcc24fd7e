//! # 2D Polygons and Predicates
//!
//! Simple polygons in the X/Z plane plus the orientation, containment and
//! intersection predicates shared by every triangulator.
//!
//! Orientation and in-circle tests use adaptive-precision arithmetic from the
//! `robust` crate, so sign decisions are exact for any finite input.

use config::constants::{approx_zero, RAY_CAST_EPSILON, SHARED_ENDPOINT_EPSILON};
use glam::DVec2;
use robust::Coord;
use serde::{Deserialize, Serialize};

// =============================================================================
// PREDICATES
// =============================================================================

#[inline]
fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Twice the signed area of triangle `abc`.
///
/// Positive when `a`, `b`, `c` turn counter-clockwise, negative when
/// clockwise and exactly zero when collinear.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use mesh_kernel::polygon::orient;
///
/// assert!(orient(DVec2::ZERO, DVec2::X, DVec2::Y) > 0.0);
/// assert_eq!(orient(DVec2::ZERO, DVec2::X, DVec2::new(2.0, 0.0)), 0.0);
/// ```
#[inline]
pub fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    robust::orient2d(coord(a), coord(b), coord(c))
}

/// Positive when `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `abc`.
#[inline]
pub fn in_circle(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> f64 {
    robust::incircle(coord(a), coord(b), coord(c), coord(d))
}

#[inline]
fn opposite_signs(p: f64, q: f64) -> bool {
    (p > 0.0 && q < 0.0) || (p < 0.0 && q > 0.0)
}

/// Returns true when segments `ab` and `cd` cross at a point interior to
/// both.
///
/// Touching at an endpoint and collinear overlap are not proper crossings.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use mesh_kernel::polygon::segments_intersect_proper;
///
/// let (a, b) = (DVec2::new(-1.0, 0.0), DVec2::new(1.0, 0.0));
/// assert!(segments_intersect_proper(a, b, DVec2::new(0.0, -1.0), DVec2::new(0.0, 1.0)));
/// // T-junction: touching is not crossing
/// assert!(!segments_intersect_proper(a, b, DVec2::new(0.0, 0.0), DVec2::new(0.0, 1.0)));
/// ```
pub fn segments_intersect_proper(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> bool {
    opposite_signs(orient(a, b, c), orient(a, b, d))
        && opposite_signs(orient(c, d, a), orient(c, d, b))
}

/// Point-in-triangle test for a counter-clockwise triangle.
///
/// Points on an edge or at a corner count as inside.
pub fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    orient(a, b, p) >= 0.0 && orient(b, c, p) >= 0.0 && orient(c, a, p) >= 0.0
}

/// Ray-casting point-in-polygon test (odd crossings are inside).
///
/// Closure is implicit: the last point connects back to the first.
pub fn point_in_polygon(p: DVec2, polygon: &[DVec2]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y + RAY_CAST_EPSILON) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns true when two points are the same vertex within
/// `SHARED_ENDPOINT_EPSILON` on both axes.
#[inline]
pub fn same_point(a: DVec2, b: DVec2) -> bool {
    (a.x - b.x).abs() < SHARED_ENDPOINT_EPSILON && (a.y - b.y).abs() < SHARED_ENDPOINT_EPSILON
}

/// Twice the signed shoelace area of a closed ring.
pub fn ring_area2(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum()
}

// =============================================================================
// POLYGON
// =============================================================================

/// A simple polygon (or polyline) in the X/Z plane.
///
/// Points are stored as `(x, z)` pairs in a `DVec2`. Closure is implicit.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use mesh_kernel::Polygon2D;
///
/// let square = Polygon2D::new(vec![
///     DVec2::new(-1.0, -1.0),
///     DVec2::new(1.0, -1.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(-1.0, 1.0),
/// ]);
/// assert_eq!(square.signed_area(), 4.0);
/// assert!(square.contains(DVec2::ZERO));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon2D {
    /// Ordered boundary points.
    pub points: Vec<DVec2>,
}

impl Polygon2D {
    /// Creates a polygon from an ordered point list.
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    /// Returns the number of boundary points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the polygon has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        ring_area2(&self.points) * 0.5
    }

    /// Returns true if the polygon winds counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Returns true if the polygon has fewer than three points or
    /// (numerically) no area.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || approx_zero(self.signed_area())
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty polygon.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Ray-casting containment test.
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        point_in_polygon(p, &self.points)
    }

    /// Iterates boundary edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Returns a copy without consecutive duplicate points, including a
    /// closing point that repeats the first one.
    pub fn without_repeats(&self) -> Self {
        let mut points: Vec<DVec2> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if points.last().map_or(true, |&last| !same_point(last, p)) {
                points.push(p);
            }
        }
        while points.len() > 1 && same_point(points[0], points[points.len() - 1]) {
            points.pop();
        }
        Self { points }
    }

    /// Densifies every edge with evenly spaced points.
    ///
    /// Each edge contributes `max(2, ceil(len / step))` points including both
    /// endpoints, so shared corners appear twice; callers deduplicate.
    pub fn densify_boundary(&self, step: f64) -> Vec<DVec2> {
        let mut out = Vec::new();
        for (a, b) in self.edges() {
            let len = a.distance(b);
            let n = ((len / step).ceil() as usize).max(2);
            for k in 0..n {
                let t = k as f64 / (n - 1) as f64;
                out.push(a.lerp(b, t));
            }
        }
        out
    }
}
