//! # Triangle Mesh
//!
//! The canonical triangulated-mesh value passed between pipeline nodes.

use config::constants::DEGENERATE_AREA_EPSILON;
use glam::{DVec2, DVec3};

use crate::error::{KernelError, KernelResult};
use crate::geometry::{self, Aabb, Trs};

/// A triangle mesh with per-vertex normals and a cached bounding box.
///
/// All geometry calculations use f64 internally. Export to f32 only happens
/// at the viewer boundary.
///
/// Every constructor upholds the same invariants: indices are in range,
/// `normals.len() == positions.len()`, `bounds` is the tight box of
/// `positions` and the area-weighted normal points up (non-negative Y).
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::MeshTri;
///
/// // Clockwise seen from above; the constructor flips it upward.
/// let mesh = MeshTri::new(vec![DVec3::ZERO, DVec3::X, DVec3::Z], vec![[0, 1, 2]]).unwrap();
/// assert_eq!(mesh.indices(), &[[0, 2, 1]]);
/// assert!(mesh.normals()[0].y > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshTri {
    positions: Vec<DVec3>,
    indices: Vec<[u32; 3]>,
    normals: Vec<DVec3>,
    bounds: Aabb,
}

impl MeshTri {
    /// Creates an empty mesh with a zero bounding box.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a mesh, validating every index.
    ///
    /// Normals, bounds and upward winding are derived from the input.
    pub fn new(positions: Vec<DVec3>, indices: Vec<[u32; 3]>) -> KernelResult<Self> {
        let vertex_count = positions.len();
        if let Some(&index) = indices
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(KernelError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(Self::from_valid(positions, indices))
    }

    /// Builds a mesh from indices already known to be in range.
    pub(crate) fn from_valid(positions: Vec<DVec3>, indices: Vec<[u32; 3]>) -> Self {
        let mut mesh = Self {
            normals: Vec::new(),
            bounds: geometry::compute_aabb(&positions),
            positions,
            indices,
        };
        mesh.recompute_normals();
        mesh.ensure_upward_normals();
        mesh
    }

    /// Lifts a 2D triangulation onto the X/Z plane (Y = 0).
    ///
    /// Triangle indices refer to `points`.
    pub(crate) fn planar(points: &[DVec2], triangles: Vec<[u32; 3]>) -> Self {
        Self::from_valid(geometry::lift_to_xz(points), triangles)
    }

    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Triangle index triples.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// Per-vertex normals, one per position.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Tight axis-aligned bounds of the positions.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn recompute_normals(&mut self) {
        self.normals = geometry::compute_flat_normals(&self.positions, &self.indices);
    }

    /// Reverses the winding of every triangle and negates the normals.
    pub fn flip_winding(&mut self) {
        geometry::flip_winding(&mut self.indices);
        for n in &mut self.normals {
            *n = -*n;
        }
    }

    /// Flips the mesh when its area-weighted normal points down.
    ///
    /// Returns true if a flip happened. A second call never flips again.
    pub fn ensure_upward_normals(&mut self) -> bool {
        if geometry::upward_weight(&self.positions, &self.indices) < 0.0 {
            self.flip_winding();
            true
        } else {
            false
        }
    }

    /// Returns a transformed copy with recomputed normals and bounds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use mesh_kernel::{MeshTri, Trs};
    ///
    /// let mesh = MeshTri::new(vec![DVec3::ZERO, DVec3::Z, DVec3::X], vec![[0, 1, 2]]).unwrap();
    /// let moved = mesh.transformed(&Trs { translate: DVec3::Y, ..Trs::IDENTITY });
    /// assert_eq!(moved.bounds().min.y, 1.0);
    /// assert_eq!(mesh.bounds().min.y, 0.0);
    /// ```
    pub fn transformed(&self, trs: &Trs) -> Self {
        if trs.is_identity() {
            return self.clone();
        }
        let mut positions = self.positions.clone();
        trs.apply_all(&mut positions);
        Self::from_valid(positions, self.indices.clone())
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats a vertex
    /// - No zero-area triangles
    pub fn validate(&self) -> bool {
        let vertex_count = self.positions.len() as u32;

        self.indices.iter().all(|&[a, b, c]| {
            if a >= vertex_count || b >= vertex_count || c >= vertex_count {
                return false;
            }
            if a == b || b == c || a == c {
                return false;
            }
            let normal = geometry::face_normal(
                self.positions[a as usize],
                self.positions[b as usize],
                self.positions[c as usize],
            );
            normal.length() >= DEGENERATE_AREA_EPSILON
        })
    }

    /// Exports positions as a flat `[x, y, z, ...]` f32 array.
    pub fn positions_f32(&self) -> Vec<f32> {
        flatten_f32(&self.positions)
    }

    /// Exports triangle indices as a flat `[i0, i1, i2, ...]` array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }

    /// Exports normals as a flat `[x, y, z, ...]` f32 array.
    pub fn normals_f32(&self) -> Vec<f32> {
        flatten_f32(&self.normals)
    }
}

fn flatten_f32(vectors: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(vectors.len() * 3);
    for v in vectors {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}
