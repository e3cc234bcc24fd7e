//! # Triangulation
//!
//! Planar triangulators working on `(x, z)` points.
//!
//! ## Strategies
//!
//! | Module | Input | Boundary edges |
//! |--------|-------|----------------|
//! | [`delaunay`] | point cloud | convex hull only |
//! | [`earclip`] | simple polygon | exact, no added points |
//! | [`constrained::filtered`] | polygon + interior samples | approximated by densification |
//! | [`constrained::cdt`] | polygon + optional Steiner points | exact |
//!
//! Every triangulator emits counter-clockwise triangles in `(x, z)` and
//! indexes into the point list it was given (or returns).

pub mod constrained;
pub mod delaunay;
pub mod earclip;

pub use constrained::cdt::constrained_delaunay;
pub use constrained::filtered::boundary_respecting_delaunay;
pub use delaunay::delaunay;
pub use earclip::earclip;

use glam::DVec2;

use crate::mesh::MeshTri;

/// Points together with the triangles that index them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanarTriangulation {
    /// Vertex positions in `(x, z)`.
    pub points: Vec<DVec2>,
    /// Counter-clockwise triangles.
    pub triangles: Vec<[u32; 3]>,
}

impl PlanarTriangulation {
    /// Returns true if no triangle was produced.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Sum of the triangle areas.
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (
                    self.points[a as usize],
                    self.points[b as usize],
                    self.points[c as usize],
                );
                (b - a).perp_dot(c - a).abs() * 0.5
            })
            .sum()
    }

    /// Lifts the triangulation onto the X/Z plane as an upward-facing mesh.
    pub fn into_mesh(self) -> MeshTri {
        MeshTri::planar(&self.points, self.triangles)
    }
}
