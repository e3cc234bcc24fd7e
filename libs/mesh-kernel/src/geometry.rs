//! # Geometry Primitives
//!
//! Vector and matrix helpers shared by every mesh-producing kernel:
//! flat normals, bounding boxes, winding flips and the scale/rotate/translate
//! transform applied by transform nodes.

use config::constants::approx_equal;
use glam::{DMat3, DVec2, DVec3};
use serde::{Deserialize, Serialize};

// =============================================================================
// BOUNDS
// =============================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Aabb {
    /// Creates a box from its corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Extent along each axis.
    #[inline]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns true if `p` lies inside or on the box.
    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Computes the tight bounding box of a point set.
///
/// An empty point set yields a zero box at the origin.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::geometry::compute_aabb;
///
/// let aabb = compute_aabb(&[DVec3::new(-1.0, 2.0, 0.0), DVec3::new(1.0, -2.0, 3.0)]);
/// assert_eq!(aabb.min, DVec3::new(-1.0, -2.0, 0.0));
/// assert_eq!(aabb.max, DVec3::new(1.0, 2.0, 3.0));
/// ```
pub fn compute_aabb(positions: &[DVec3]) -> Aabb {
    let Some(&first) = positions.first() else {
        return Aabb::default();
    };

    let (min, max) = positions[1..]
        .iter()
        .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
    Aabb { min, max }
}

// =============================================================================
// NORMALS AND WINDING
// =============================================================================

/// Unnormalized face normal of a triangle; its length is twice the area.
#[inline]
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a)
}

/// Accumulates face normals onto their vertices and normalizes the result.
///
/// Every vertex of a triangle receives that triangle's area-weighted normal;
/// vertices used by no triangle keep a zero normal.
pub fn compute_flat_normals(positions: &[DVec3], indices: &[[u32; 3]]) -> Vec<DVec3> {
    let mut normals = vec![DVec3::ZERO; positions.len()];

    for tri in indices {
        let [a, b, c] = tri.map(|i| i as usize);
        let normal = face_normal(positions[a], positions[b], positions[c]);
        normals[a] += normal;
        normals[b] += normal;
        normals[c] += normal;
    }

    for normal in &mut normals {
        let len = normal.length();
        if len > 0.0 {
            *normal /= len;
        }
    }

    normals
}

/// Swaps the last two indices of every triangle, reversing its winding.
pub fn flip_winding(indices: &mut [[u32; 3]]) {
    for tri in indices {
        tri.swap(1, 2);
    }
}

/// Sum of the Y components of all face normals.
///
/// Each face contributes proportionally to its area, so the sign matches the
/// sign of the area-weighted average normal.
pub fn upward_weight(positions: &[DVec3], indices: &[[u32; 3]]) -> f64 {
    indices
        .iter()
        .map(|tri| {
            let [a, b, c] = tri.map(|i| positions[i as usize]);
            face_normal(a, b, c).y
        })
        .sum()
}

/// Lifts `(x, z)` points onto the Y = 0 plane.
pub fn lift_to_xz(points: &[DVec2]) -> Vec<DVec3> {
    points.iter().map(|p| DVec3::new(p.x, 0.0, p.y)).collect()
}

// =============================================================================
// TRANSFORM
// =============================================================================

/// Scale, then rotate (Euler XYZ in degrees, composed as Rz·Ry·Rx), then
/// translate.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::geometry::Trs;
///
/// let trs = Trs {
///     translate: DVec3::new(0.0, 1.0, 0.0),
///     scale: DVec3::splat(2.0),
///     ..Trs::IDENTITY
/// };
/// assert_eq!(trs.apply(DVec3::X), DVec3::new(2.0, 1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trs {
    /// Translation applied last.
    pub translate: DVec3,
    /// Rotation angles around X, Y and Z in degrees.
    pub rotate_degrees: DVec3,
    /// Per-axis scale applied first.
    pub scale: DVec3,
}

impl Default for Trs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Trs {
    /// The transform that leaves every point unchanged.
    pub const IDENTITY: Self = Self {
        translate: DVec3::ZERO,
        rotate_degrees: DVec3::ZERO,
        scale: DVec3::ONE,
    };

    /// Returns true when every component is within `EPSILON` of
    /// [`Trs::IDENTITY`].
    pub fn is_identity(&self) -> bool {
        let close = |a: DVec3, b: DVec3| {
            approx_equal(a.x, b.x) && approx_equal(a.y, b.y) && approx_equal(a.z, b.z)
        };
        close(self.translate, Self::IDENTITY.translate)
            && close(self.rotate_degrees, Self::IDENTITY.rotate_degrees)
            && close(self.scale, Self::IDENTITY.scale)
    }

    /// Rotation matrix `Rz * Ry * Rx`.
    pub fn rotation(&self) -> DMat3 {
        let r = DVec3::new(
            self.rotate_degrees.x.to_radians(),
            self.rotate_degrees.y.to_radians(),
            self.rotate_degrees.z.to_radians(),
        );
        DMat3::from_rotation_z(r.z) * DMat3::from_rotation_y(r.y) * DMat3::from_rotation_x(r.x)
    }

    /// Transforms a single point.
    #[inline]
    pub fn apply(&self, p: DVec3) -> DVec3 {
        self.rotation() * (p * self.scale) + self.translate
    }

    /// Transforms every point in place.
    pub fn apply_all(&self, positions: &mut [DVec3]) {
        let rotation = self.rotation();
        for p in positions {
            *p = rotation * (*p * self.scale) + self.translate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_detection() {
        assert!(Trs::IDENTITY.is_identity());
        assert!(Trs {
            scale: DVec3::splat(1.0 + 1e-12),
            ..Trs::IDENTITY
        }
        .is_identity());
        assert!(!Trs {
            rotate_degrees: DVec3::new(0.0, 1e-3, 0.0),
            ..Trs::IDENTITY
        }
        .is_identity());
    }

    #[test]
    fn test_compute_aabb_empty() {
        let aabb = compute_aabb(&[]);
        assert_eq!(aabb.min, DVec3::ZERO);
        assert_eq!(aabb.max, DVec3::ZERO);
    }

    #[test]
    fn test_aabb_contains() {
        let aabb = Aabb::new(DVec3::splat(-1.0), DVec3::splat(1.0));
        assert!(aabb.contains(DVec3::ZERO));
        assert!(aabb.contains(DVec3::ONE));
        assert!(!aabb.contains(DVec3::splat(1.5)));
        assert_eq!(aabb.center(), DVec3::ZERO);
        assert_eq!(aabb.size(), DVec3::splat(2.0));
    }

    #[test]
    fn test_flat_normals_xz_triangle() {
        // Counter-clockwise seen from +Y: (0,0,0) -> (0,0,1) -> (1,0,0)
        let positions = vec![DVec3::ZERO, DVec3::Z, DVec3::X];
        let normals = compute_flat_normals(&positions, &[[0, 1, 2]]);
        for n in normals {
            assert_relative_eq!(n.y, 1.0);
        }
    }

    #[test]
    fn test_unused_vertex_keeps_zero_normal() {
        let positions = vec![DVec3::ZERO, DVec3::Z, DVec3::X, DVec3::ONE];
        let normals = compute_flat_normals(&positions, &[[0, 1, 2]]);
        assert_eq!(normals[3], DVec3::ZERO);
    }

    #[test]
    fn test_flip_winding() {
        let mut indices = vec![[0, 1, 2], [3, 4, 5]];
        flip_winding(&mut indices);
        assert_eq!(indices, vec![[0, 2, 1], [3, 5, 4]]);
    }

    #[test]
    fn test_upward_weight_sign() {
        let positions = vec![DVec3::ZERO, DVec3::Z, DVec3::X];
        assert!(upward_weight(&positions, &[[0, 1, 2]]) > 0.0);
        assert!(upward_weight(&positions, &[[0, 2, 1]]) < 0.0);
    }

    #[test]
    fn test_trs_rotation_order() {
        // 90 degrees around Y maps +X to -Z
        let trs = Trs {
            rotate_degrees: DVec3::new(0.0, 90.0, 0.0),
            ..Trs::IDENTITY
        };
        let p = trs.apply(DVec3::X);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trs_scale_before_translate() {
        let trs = Trs {
            translate: DVec3::new(1.0, 0.0, 0.0),
            scale: DVec3::new(3.0, 1.0, 1.0),
            ..Trs::IDENTITY
        };
        let mut points = vec![DVec3::X];
        trs.apply_all(&mut points);
        assert_eq!(points[0], DVec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_trs_composition_is_z_y_x() {
        let trs = Trs {
            rotate_degrees: DVec3::new(90.0, 90.0, 0.0),
            ..Trs::IDENTITY
        };
        // Rx first: Y -> Z, then Ry: Z -> X
        let p = trs.apply(DVec3::Y);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }
}
