//! Wavefront OBJ geometry.
//!
//! Decoding is delegated to `tobj`. Faces are triangulated and every model
//! in the file is merged into one vertex and triangle list. Materials,
//! texture coordinates and file normals are ignored; normals are recomputed
//! from the triangles.

use glam::DVec3;
use mesh_kernel::KernelError;
use tobj::{LoadError, LoadOptions};

use crate::error::NodeError;

/// Vertex positions and triangles decoded from OBJ text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjGeometry {
    pub positions: Vec<DVec3>,
    pub triangles: Vec<[u32; 3]>,
}

fn load_options() -> LoadOptions {
    LoadOptions {
        triangulate: true,
        single_index: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Decodes OBJ text.
///
/// `mtllib` references are not followed.
///
/// # Errors
///
/// [`NodeError::Obj`] for unreadable records or face references to
/// vertices that do not exist.
///
/// # Example
///
/// ```rust
/// use mesh_pipeline::formats::parse_obj;
///
/// let geometry = parse_obj("v 0 0 0\nv 1 0 0\nv 1 0 1\nv 0 0 1\nf 1 2 3 4\n").unwrap();
/// assert_eq!(geometry.positions.len(), 4);
/// assert_eq!(geometry.triangles, vec![[0, 1, 2], [0, 2, 3]]);
/// ```
pub fn parse_obj(text: &str) -> Result<ObjGeometry, NodeError> {
    let mut reader = text.as_bytes();
    let (models, _materials) =
        tobj::load_obj_buf(&mut reader, &load_options(), |_| Err(LoadError::OpenFileFailed))?;

    let mut geometry = ObjGeometry::default();
    for model in models {
        let mesh = model.mesh;
        let vertex_count = geometry.positions.len();
        let offset = u32::try_from(vertex_count).map_err(|_| KernelError::IndexOutOfRange {
            index: u32::MAX,
            vertex_count,
        })?;

        geometry.positions.extend(mesh.positions.chunks_exact(3).map(|p| {
            DVec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
        }));
        geometry.triangles.extend(
            mesh.indices
                .chunks_exact(3)
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }
    Ok(geometry)
}
