//! # Viewer Seam
//!
//! Drawing nodes hand their geometry to a [`Viewer`] installed on the
//! runtime. The pipeline never depends on a concrete renderer.

use config::constants::{DEFAULT_LINE_COLOR, DEFAULT_MESH_COLOR};
use glam::DVec3;
use mesh_kernel::MeshTri;

use crate::params::Params;

/// Display options for a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshStyle {
    pub wireframe: bool,
    pub double_sided: bool,
    /// CSS-style hex color.
    pub color: String,
}

impl Default for MeshStyle {
    fn default() -> Self {
        Self {
            wireframe: false,
            double_sided: false,
            color: DEFAULT_MESH_COLOR.to_owned(),
        }
    }
}

impl MeshStyle {
    /// Reads `wireframe`, `doubleSided` and `color` from merged render
    /// options. A non-string color falls back to the default.
    pub fn from_params(render: &Params) -> Self {
        Self {
            wireframe: render.flag("wireframe"),
            double_sided: render.flag("doubleSided"),
            color: render
                .str_opt("color")
                .ok()
                .flatten()
                .unwrap_or(DEFAULT_MESH_COLOR)
                .to_owned(),
        }
    }
}

/// Display options for a polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    /// Connect the last point back to the first.
    pub closed: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_LINE_COLOR.to_owned(),
            closed: true,
        }
    }
}

/// Receives geometry from drawing nodes, keyed by node id.
///
/// Calls for an id replace whatever was shown for it before.
pub trait Viewer {
    /// Removes everything; called when a new graph is loaded.
    fn clear_all(&mut self);

    /// Shows or replaces the mesh drawn by node `id`.
    fn update_mesh(&mut self, id: &str, mesh: &MeshTri, style: &MeshStyle);

    /// Shows or replaces the polyline drawn by node `id`.
    fn update_lines(&mut self, id: &str, points: &[DVec3], style: &LineStyle);
}
