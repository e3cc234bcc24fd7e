//! # Pipeline Values
//!
//! The typed payload exchanged between nodes. Every consumer matches the
//! variants exhaustively; producers own their values outright and the
//! scheduler shares them read-only through the resource registry.

use mesh_kernel::{MeshTri, Polygon2D, Surface};

use crate::error::NodeError;

/// A value produced by a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value: the node has not run yet, or produces nothing.
    #[default]
    Empty,
    /// A parametric surface description.
    Surface(Surface),
    /// A closed polygon in the X/Z plane.
    Polygon2D(Polygon2D),
    /// A triangulated mesh.
    MeshTri(MeshTri),
}

impl Value {
    /// Returns the variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Empty => "Empty",
            Value::Surface(_) => "Surface",
            Value::Polygon2D(_) => "Polygon2D",
            Value::MeshTri(_) => "MeshTri",
        }
    }

    /// Returns true for [`Value::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns the mesh, if this is one.
    pub fn as_mesh(&self) -> Option<&MeshTri> {
        match self {
            Value::MeshTri(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Returns the polygon, if this is one.
    pub fn as_polygon(&self) -> Option<&Polygon2D> {
        match self {
            Value::Polygon2D(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Returns the surface, if this is one.
    pub fn as_surface(&self) -> Option<&Surface> {
        match self {
            Value::Surface(surface) => Some(surface),
            _ => None,
        }
    }

    /// Returns the polygon or the matching node error.
    ///
    /// `Empty` maps to [`NodeError::MissingInput`], any other variant to
    /// [`NodeError::InvalidInputType`].
    pub fn expect_polygon(&self) -> Result<&Polygon2D, NodeError> {
        match self {
            Value::Polygon2D(polygon) => Ok(polygon),
            Value::Empty => Err(NodeError::MissingInput),
            other => Err(NodeError::InvalidInputType {
                expected: "Polygon2D",
                found: other.kind(),
            }),
        }
    }
}

impl From<Surface> for Value {
    fn from(surface: Surface) -> Self {
        Value::Surface(surface)
    }
}

impl From<Polygon2D> for Value {
    fn from(polygon: Polygon2D) -> Self {
        Value::Polygon2D(polygon)
    }
}

impl From<MeshTri> for Value {
    fn from(mesh: MeshTri) -> Self {
        Value::MeshTri(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Empty.kind(), "Empty");
        assert_eq!(Value::from(Surface::plane(1.0, 1.0)).kind(), "Surface");
        assert_eq!(Value::from(MeshTri::empty()).kind(), "MeshTri");
        assert!(Value::default().is_empty());
    }

    #[test]
    fn test_expect_polygon() {
        let poly = Polygon2D::new(vec![DVec2::ZERO, DVec2::X, DVec2::Y]);
        let value = Value::from(poly.clone());
        assert_eq!(value.expect_polygon().unwrap(), &poly);

        assert!(matches!(
            Value::Empty.expect_polygon(),
            Err(NodeError::MissingInput)
        ));
        assert!(matches!(
            Value::from(Surface::plane(1.0, 1.0)).expect_polygon(),
            Err(NodeError::InvalidInputType {
                expected: "Polygon2D",
                found: "Surface"
            })
        ));
    }
}
