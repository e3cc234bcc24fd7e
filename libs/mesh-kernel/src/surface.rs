//! # Parametric Surfaces
//!
//! Abstract surface descriptions produced by source nodes. A surface is not
//! geometry yet: consumers either sample it or convert it into a regular-grid
//! [`MeshTri`].

use glam::{DMat4, DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::mesh::MeshTri;

/// Shape family of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceBasis {
    /// A rectangle centered at the origin in the X/Z plane.
    Plane,
}

/// A parametric surface with a basis, a size and a placement transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Shape family.
    pub basis: SurfaceBasis,
    /// Width (X) and height (Z).
    pub size: DVec2,
    /// Placement applied to generated vertices.
    pub transform: DMat4,
}

impl Surface {
    /// A `width` x `height` plane centered at the origin with identity
    /// placement.
    pub fn plane(width: f64, height: f64) -> Self {
        Self {
            basis: SurfaceBasis::Plane,
            size: DVec2::new(width, height),
            transform: DMat4::IDENTITY,
        }
    }

    /// Converts the surface into a regular grid of `nx` x `ny` cells.
    ///
    /// Produces `(nx + 1) * (ny + 1)` vertices and `2 * nx * ny` triangles.
    /// Zero cell counts are treated as one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_kernel::Surface;
    ///
    /// let mesh = Surface::plane(1.0, 1.0).triangulate_grid(32, 32);
    /// assert_eq!(mesh.vertex_count(), 1089);
    /// assert_eq!(mesh.triangle_count(), 2048);
    /// ```
    pub fn triangulate_grid(&self, nx: u32, ny: u32) -> MeshTri {
        let (nx, ny) = (nx.max(1), ny.max(1));
        match self.basis {
            SurfaceBasis::Plane => self.plane_grid(nx, ny),
        }
    }

    fn plane_grid(&self, nx: u32, ny: u32) -> MeshTri {
        let (w, h) = (self.size.x, self.size.y);
        let row = nx + 1;

        let mut positions = Vec::with_capacity((row * (ny + 1)) as usize);
        for j in 0..=ny {
            let z = -h / 2.0 + h * f64::from(j) / f64::from(ny);
            for i in 0..=nx {
                let x = -w / 2.0 + w * f64::from(i) / f64::from(nx);
                positions.push(self.transform.transform_point3(DVec3::new(x, 0.0, z)));
            }
        }

        let mut indices = Vec::with_capacity((2 * nx * ny) as usize);
        for j in 0..ny {
            for i in 0..nx {
                let a = j * row + i;
                let b = a + 1;
                let c = a + row;
                let d = c + 1;
                indices.push([a, c, b]);
                indices.push([b, c, d]);
            }
        }

        MeshTri::from_valid(positions, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_grid_counts_and_bounds() {
        let mesh = Surface::plane(2.0, 4.0).triangulate_grid(4, 2);
        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh.triangle_count(), 16);
        assert_eq!(mesh.bounds().min, DVec3::new(-1.0, 0.0, -2.0));
        assert_eq!(mesh.bounds().max, DVec3::new(1.0, 0.0, 2.0));
        assert!(mesh.validate());
    }

    #[test]
    fn test_plane_grid_faces_up_without_flip() {
        let mut mesh = Surface::plane(1.0, 1.0).triangulate_grid(3, 3);
        assert!(!mesh.ensure_upward_normals());
        assert_eq!(mesh.indices()[0], [0, 4, 1]);
        for n in mesh.normals() {
            assert!((n.y - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_plane_grid_applies_transform() {
        let mut surface = Surface::plane(1.0, 1.0);
        surface.transform = DMat4::from_translation(DVec3::new(0.0, 2.0, 0.0));
        let mesh = surface.triangulate_grid(1, 1);
        assert_eq!(mesh.bounds().min.y, 2.0);
        assert_eq!(mesh.bounds().max.y, 2.0);
    }

    #[test]
    fn test_zero_cells_clamped() {
        let mesh = Surface::plane(1.0, 1.0).triangulate_grid(0, 0);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
