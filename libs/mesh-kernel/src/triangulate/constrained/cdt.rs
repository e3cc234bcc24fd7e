//! Constrained Delaunay triangulation by edge flipping.
//!
//! ## Algorithm
//!
//! 1. Delaunay-triangulate the polygon vertices and Steiner points, keeping
//!    the super-triangle so every boundary edge lies inside the mesh.
//! 2. For each polygon edge missing from the mesh, collect the mesh edges
//!    that properly cross it and flip them one by one. Flipping is only legal
//!    when the two triangles form a strictly convex quad; non-convex pairs
//!    are retried later. Flipped edges that still cross go back in the queue.
//! 3. Restore the Delaunay property with Lawson flips that never touch a
//!    constrained edge.
//! 4. Keep triangles whose centroid lies inside the polygon.

use std::collections::{HashMap, HashSet, VecDeque};

use glam::DVec2;
use tracing::debug;

use crate::error::{KernelError, KernelResult};
use crate::polygon::{in_circle, orient, segments_intersect_proper, Polygon2D};
use crate::triangulate::delaunay::enclosed_delaunay;
use crate::triangulate::PlanarTriangulation;

#[inline]
fn undirected(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Counter-clockwise triangles with a directed-edge lookup.
///
/// Edge `(a, b)` maps to the triangle that walks from `a` to `b`.
struct FlipMesh {
    triangles: Vec<[usize; 3]>,
    edges: HashMap<(usize, usize), usize>,
}

impl FlipMesh {
    fn new(triangles: Vec<[usize; 3]>) -> Self {
        let mut mesh = Self {
            edges: HashMap::with_capacity(triangles.len() * 3),
            triangles,
        };
        for t in 0..mesh.triangles.len() {
            mesh.link(t);
        }
        mesh
    }

    fn directed_edges([a, b, c]: [usize; 3]) -> [(usize, usize); 3] {
        [(a, b), (b, c), (c, a)]
    }

    fn link(&mut self, t: usize) {
        for edge in Self::directed_edges(self.triangles[t]) {
            self.edges.insert(edge, t);
        }
    }

    fn unlink(&mut self, t: usize) {
        for edge in Self::directed_edges(self.triangles[t]) {
            self.edges.remove(&edge);
        }
    }

    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges.contains_key(&(a, b)) || self.edges.contains_key(&(b, a))
    }

    /// Vertex of triangle `t` opposite the directed edge `(a, b)`.
    fn opposite(&self, t: usize, a: usize, b: usize) -> usize {
        let tri = self.triangles[t];
        tri.into_iter()
            .find(|&v| v != a && v != b)
            .unwrap_or(tri[0])
    }

    /// Both triangles around edge `(a, b)` and their opposite vertices, as
    /// `(t1, c, t2, d)` with `t1 = [a, b, c]` and `t2 = [b, a, d]`.
    fn quad(&self, a: usize, b: usize) -> Option<(usize, usize, usize, usize)> {
        let t1 = *self.edges.get(&(a, b))?;
        let t2 = *self.edges.get(&(b, a))?;
        Some((t1, self.opposite(t1, a, b), t2, self.opposite(t2, b, a)))
    }

    /// Replaces diagonal `ab` of the quad with `cd`.
    fn flip(&mut self, a: usize, b: usize, (t1, c, t2, d): (usize, usize, usize, usize)) {
        self.unlink(t1);
        self.unlink(t2);
        self.triangles[t1] = [a, d, c];
        self.triangles[t2] = [b, c, d];
        self.link(t1);
        self.link(t2);
    }

    /// Every undirected edge once, in triangle order.
    fn undirected_edges(&self) -> Vec<(usize, usize)> {
        let mut seen = HashSet::with_capacity(self.edges.len());
        self.triangles
            .iter()
            .flat_map(|&t| Self::directed_edges(t))
            .filter(|&(a, b)| seen.insert(undirected(a, b)))
            .collect()
    }
}

/// Counts flips against a fixed budget.
struct FlipBudget {
    used: usize,
    limit: usize,
}

impl FlipBudget {
    fn spend(&mut self) -> bool {
        if self.used >= self.limit {
            return false;
        }
        self.used += 1;
        true
    }
}

/// Returns true when `p` lies on a polygon edge (endpoints included).
fn on_boundary(p: DVec2, polygon: &Polygon2D) -> bool {
    polygon.edges().any(|(a, b)| {
        orient(a, b, p) == 0.0
            && p.cmpge(a.min(b)).all()
            && p.cmple(a.max(b)).all()
    })
}

/// Flips crossing edges until `a -> b` is present in the mesh.
///
/// Already constrained edges are never flipped; crossing one means the
/// polygon intersects itself.
fn recover_edge(
    mesh: &mut FlipMesh,
    points: &[DVec2],
    (a, b): (usize, usize),
    constrained: &HashSet<(usize, usize)>,
    budget: &mut FlipBudget,
) -> KernelResult<()> {
    if mesh.has_edge(a, b) {
        return Ok(());
    }

    let (pa, pb) = (points[a], points[b]);
    let mut crossing: VecDeque<(usize, usize)> = mesh
        .undirected_edges()
        .into_iter()
        .filter(|&(u, v)| segments_intersect_proper(pa, pb, points[u], points[v]))
        .collect();

    if crossing.iter().any(|&(u, v)| constrained.contains(&undirected(u, v))) {
        return Err(KernelError::ConstraintRecovery { from: a, to: b });
    }

    while let Some((u, v)) = crossing.pop_front() {
        let Some(quad) = mesh.quad(u, v) else {
            continue;
        };
        let (_, c, _, d) = quad;

        if !segments_intersect_proper(points[u], points[v], points[c], points[d]) {
            if crossing.is_empty() {
                break;
            }
            crossing.push_back((u, v));
            if !budget.spend() {
                return Err(KernelError::FlipBudgetExhausted {
                    budget: budget.limit,
                });
            }
            continue;
        }

        if !budget.spend() {
            return Err(KernelError::FlipBudgetExhausted {
                budget: budget.limit,
            });
        }
        mesh.flip(u, v, quad);

        if segments_intersect_proper(pa, pb, points[c], points[d]) {
            crossing.push_back((c, d));
        }
    }

    if mesh.has_edge(a, b) {
        Ok(())
    } else {
        Err(KernelError::ConstraintRecovery { from: a, to: b })
    }
}

/// Lawson flips on unconstrained edges until every edge is locally Delaunay.
///
/// Fails once the budget runs out, as the mesh left behind is a valid
/// triangulation but not a Delaunay one.
fn restore_delaunay(
    mesh: &mut FlipMesh,
    points: &[DVec2],
    constrained: &HashSet<(usize, usize)>,
    budget: &mut FlipBudget,
) -> KernelResult<()> {
    let mut stack = mesh.undirected_edges();

    while let Some((a, b)) = stack.pop() {
        if constrained.contains(&undirected(a, b)) {
            continue;
        }
        let Some(quad) = mesh.quad(a, b) else {
            continue;
        };
        let (_, c, _, d) = quad;
        if in_circle(points[a], points[b], points[c], points[d]) <= 0.0 {
            continue;
        }
        if !budget.spend() {
            return Err(KernelError::FlipBudgetExhausted {
                budget: budget.limit,
            });
        }
        mesh.flip(a, b, quad);
        stack.extend([(a, d), (d, b), (b, c), (c, a)]);
    }
    Ok(())
}

/// Triangulates a polygon, preserving every boundary edge exactly.
///
/// `steiner` points add interior vertices; points lying on the boundary are
/// ignored. Consecutive repeated vertices are collapsed first. Polygons with
/// fewer than three distinct vertices or zero area yield an empty
/// triangulation.
///
/// # Errors
///
/// - [`KernelError::ConstraintRecovery`] when a boundary edge cannot be
///   restored, typically for self-intersecting polygons or polygons whose
///   vertices lie on other edges.
/// - [`KernelError::FlipBudgetExhausted`] when recovering the boundary and
///   restoring the Delaunay property together need more than `flip_guard`
///   flips.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use mesh_kernel::Polygon2D;
/// use mesh_kernel::triangulate::constrained_delaunay;
///
/// let square = Polygon2D::new(vec![
///     DVec2::new(-1.0, -1.0),
///     DVec2::new(1.0, -1.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(-1.0, 1.0),
/// ]);
/// let result = constrained_delaunay(&square, &[], 1_000).unwrap();
/// assert_eq!(result.triangles.len(), 2);
/// ```
pub fn constrained_delaunay(
    polygon: &Polygon2D,
    steiner: &[DVec2],
    flip_guard: usize,
) -> KernelResult<PlanarTriangulation> {
    let outline = polygon.without_repeats();
    if outline.is_degenerate() {
        debug!(points = outline.len(), "Degenerate polygon, nothing to triangulate");
        return Ok(PlanarTriangulation::default());
    }

    let n = outline.len();
    let mut points = outline.points.clone();
    points.extend(steiner.iter().copied().filter(|&p| !on_boundary(p, &outline)));

    let Some(enclosed) = enclosed_delaunay(&points) else {
        return Ok(PlanarTriangulation::default());
    };
    let input_count = enclosed.input_count();
    let all_points = enclosed.points;
    let mut mesh = FlipMesh::new(enclosed.triangles);
    let mut budget = FlipBudget {
        used: 0,
        limit: flip_guard,
    };

    let mut constrained = HashSet::with_capacity(n);
    for i in 0..n {
        let (a, b) = (i, (i + 1) % n);
        recover_edge(&mut mesh, &all_points, (a, b), &constrained, &mut budget)?;
        constrained.insert(undirected(a, b));
    }
    let recovery_flips = budget.used;

    restore_delaunay(&mut mesh, &all_points, &constrained, &mut budget)?;

    let triangles: Vec<[u32; 3]> = mesh
        .triangles
        .into_iter()
        .filter(|t| t.iter().all(|&v| v < input_count))
        .filter(|&[a, b, c]| {
            outline.contains((all_points[a] + all_points[b] + all_points[c]) / 3.0)
        })
        .map(|t| t.map(|v| v as u32))
        .collect();

    debug!(
        vertices = n,
        steiner = points.len() - n,
        recovery_flips,
        total_flips = budget.used,
        triangles = triangles.len(),
        "Constrained triangulation finished"
    );
    Ok(PlanarTriangulation { points, triangles })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles sharing the long diagonal of a flat kite; the diagonal
    /// fails the in-circle test.
    fn kite() -> (Vec<DVec2>, FlipMesh) {
        let points = vec![
            DVec2::new(-1.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 0.2),
            DVec2::new(0.0, -0.2),
        ];
        (points, FlipMesh::new(vec![[0, 1, 2], [1, 0, 3]]))
    }

    #[test]
    fn test_restore_delaunay_flips_bad_diagonal() {
        let (points, mut mesh) = kite();
        let mut budget = FlipBudget { used: 0, limit: 1 };
        restore_delaunay(&mut mesh, &points, &HashSet::new(), &mut budget).unwrap();
        assert!(mesh.has_edge(2, 3));
        assert!(!mesh.has_edge(0, 1));
        assert_eq!(budget.used, 1);
    }

    #[test]
    fn test_restore_delaunay_reports_exhausted_budget() {
        let (points, mut mesh) = kite();
        let mut budget = FlipBudget { used: 0, limit: 0 };
        let err = restore_delaunay(&mut mesh, &points, &HashSet::new(), &mut budget).unwrap_err();
        assert_eq!(err, KernelError::FlipBudgetExhausted { budget: 0 });
    }

    #[test]
    fn test_restore_delaunay_keeps_constrained_edges() {
        let (points, mut mesh) = kite();
        let constrained = HashSet::from([(0, 1)]);
        let mut budget = FlipBudget { used: 0, limit: 0 };
        restore_delaunay(&mut mesh, &points, &constrained, &mut budget).unwrap();
        assert!(mesh.has_edge(0, 1));
    }
}
