//! # Asset Formats
//!
//! Decoders used by the source nodes. They extract geometry only
//! and ignore everything else in the file.

pub mod obj;
pub mod svg;

pub use obj::parse_obj;
pub use svg::parse_svg_polygon;
