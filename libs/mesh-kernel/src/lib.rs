//! # Mesh Kernel
//!
//! Computational-geometry kernels for the procedural mesh pipeline.
//! Turns parametric surfaces and 2D polygons into triangle meshes on the
//! X/Z plane.
//!
//! ## Architecture
//!
//! ```text
//! Surface / Polygon2D → sampling → triangulate → MeshTri
//! ```
//!
//! ## Algorithms
//!
//! - **Sampling**: Bridson Poisson-disk sampling over rectangles and polygons
//! - **Delaunay**: Bowyer-Watson with a bounding super-triangle
//! - **Constrained**: densify-and-filter Delaunay, and flip-based CDT
//! - **Ear clipping**: simple polygons without added points
//!
//! All geometry is computed in `f64`; orientation and in-circle decisions use
//! adaptive-precision predicates.
//!
//! ## Usage
//!
//! ```rust
//! use mesh_kernel::{meshing, sampling::PoissonParams, Surface};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let grid = Surface::plane(1.0, 1.0).triangulate_grid(32, 32);
//! assert_eq!(grid.triangle_count(), 2048);
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let mesh = meshing::plane_poisson_delaunay(1.0, 1.0, &PoissonParams::new(0.1), &mut rng);
//! assert!(!mesh.is_empty());
//! ```

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod meshing;
pub mod polygon;
pub mod sampling;
pub mod surface;
pub mod triangulate;

pub use error::{KernelError, KernelResult};
pub use geometry::{Aabb, Trs};
pub use mesh::MeshTri;
pub use polygon::Polygon2D;
pub use surface::{Surface, SurfaceBasis};
