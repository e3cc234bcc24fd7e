//! # Configuration Constants
//!
//! Centralized constants for the mesh pipeline. Sampling, triangulation,
//! precision and guard values are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Sampling**: Poisson-disk defaults (radius, candidate attempts)
//! - **Triangulation**: Super-triangle margin, boundary densification, guards
//! - **Surfaces**: Regular-grid resolution for parametric surfaces
//! - **Viewer**: Default styling forwarded to drawing collaborators

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for general floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance used to decide whether two 2D points are the same polygon vertex.
///
/// Edges sharing an endpoint with a polygon edge are exempt from the proper
/// crossing test; this is the distance under which endpoints count as shared.
///
/// # Example
///
/// ```rust
/// use config::constants::SHARED_ENDPOINT_EPSILON;
/// assert!(SHARED_ENDPOINT_EPSILON < 1e-6);
/// ```
pub const SHARED_ENDPOINT_EPSILON: f64 = 1e-9;

/// Small offset added to the ray-casting denominator so horizontal polygon
/// edges never divide by zero.
pub const RAY_CAST_EPSILON: f64 = 1e-12;

/// Scale applied before rounding when deduplicating merged point sets.
///
/// Two points whose coordinates agree to six decimal places collapse into one.
///
/// # Example
///
/// ```rust
/// use config::constants::DEDUP_SCALE;
///
/// let key = |v: f64| (v * DEDUP_SCALE).round() as i64;
/// assert_eq!(key(0.1234561), key(0.1234564));
/// ```
pub const DEDUP_SCALE: f64 = 1e6;

/// Area below which a triangle is considered degenerate by mesh validation.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-14;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Number of candidate points tried around an active sample before it is
/// retired (Bridson's `k`).
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_POISSON_ATTEMPTS;
///
/// let user_k: Option<u32> = None;
/// assert_eq!(user_k.unwrap_or(DEFAULT_POISSON_ATTEMPTS), 30);
/// ```
pub const DEFAULT_POISSON_ATTEMPTS: u32 = 30;

/// Number of uniformly random draws attempted when seeding a Poisson sampler
/// inside a polygon before giving up with an empty result.
pub const POISSON_SEED_ATTEMPTS: u32 = 1000;

/// Default minimum distance between Poisson samples.
pub const DEFAULT_SAMPLE_RADIUS: f64 = 0.05;

/// Smallest radius accepted by the rectangle sampler.
///
/// Smaller requests are clamped up to keep the sample count bounded.
pub const PLANE_MIN_RADIUS: f64 = 1e-3;

/// Smallest radius accepted by the polygon samplers.
pub const POLYGON_MIN_RADIUS: f64 = 1e-5;

/// Upper bound on the cells of a Bridson background grid.
///
/// Fits a unit square sampled at [`PLANE_MIN_RADIUS`]. Requests needing a
/// finer grid sample with a larger radius instead.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_POISSON_GRID_CELLS, PLANE_MIN_RADIUS};
///
/// let side = (std::f64::consts::SQRT_2 / PLANE_MIN_RADIUS).ceil() as usize;
/// assert!(side * side <= MAX_POISSON_GRID_CELLS);
/// ```
pub const MAX_POISSON_GRID_CELLS: usize = 1 << 21;

// =============================================================================
// TRIANGULATION CONSTANTS
// =============================================================================

/// Margin of the Bowyer-Watson super-triangle, as a multiple of the larger
/// side of the input's bounding box.
pub const SUPER_TRIANGLE_SCALE: f64 = 10.0;

/// Boundary densification step as a fraction of the sampling radius.
///
/// # Example
///
/// ```rust
/// use config::constants::BOUNDARY_STEP_FACTOR;
///
/// let radius = 0.1;
/// let step = radius * BOUNDARY_STEP_FACTOR;
/// assert!((step - 0.06).abs() < 1e-12);
/// ```
pub const BOUNDARY_STEP_FACTOR: f64 = 0.6;

/// Lower bound on the boundary densification step.
pub const MIN_BOUNDARY_STEP: f64 = 1e-6;

/// Divisor of the shorter rectangle side used to space seeded edge points on
/// a plane. The effective step is `max(radius, min(w, h) / PLANE_EDGE_DIVISIONS)`.
pub const PLANE_EDGE_DIVISIONS: f64 = 16.0;

/// Maximum number of scan passes performed by ear clipping before it gives up
/// on degenerate or self-intersecting input.
pub const EARCLIP_MAX_PASSES: usize = 10_000;

/// Maximum number of edge flips performed while recovering constraint edges
/// and restoring the Delaunay property in the constrained triangulator.
pub const CDT_FLIP_GUARD: usize = 1_000_000;

// =============================================================================
// SURFACE CONSTANTS
// =============================================================================

/// Subdivisions per axis used when a parametric surface is converted into a
/// regular-grid mesh.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_GRID_SEGMENTS;
///
/// let vertices = (DEFAULT_GRID_SEGMENTS + 1).pow(2);
/// assert_eq!(vertices, 1089);
/// ```
pub const DEFAULT_GRID_SEGMENTS: u32 = 32;

/// Default plane side length for plane source nodes.
pub const DEFAULT_PLANE_SIZE: f64 = 1.0;

// =============================================================================
// VIEWER CONSTANTS
// =============================================================================

/// Default mesh color handed to drawing collaborators.
pub const DEFAULT_MESH_COLOR: &str = "#66aaff";

/// Default polyline color handed to drawing collaborators.
pub const DEFAULT_LINE_COLOR: &str = "#ffffff";

/// Height above the X/Z plane at which polygon outlines are drawn so they do
/// not z-fight with meshes lying on the plane.
pub const LINE_LIFT: f64 = 0.001;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of tunable settings threaded through the pipeline
/// runtime into every node.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// assert_eq!(config.grid_segments, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Numeric tolerance propagated into geometry kernels.
    pub tolerance: f64,
    /// Bridson candidate attempts per active sample.
    pub poisson_attempts: u32,
    /// Grid subdivisions used when meshing parametric surfaces.
    pub grid_segments: u32,
    /// Attempts made to seed a polygon-constrained sampler.
    pub seed_attempts: u32,
    /// Scan passes allowed before ear clipping stops early.
    pub earclip_max_passes: usize,
    /// Flip budget for the constrained triangulator.
    pub flip_guard: usize,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of every field.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-9, 20, 16).expect("valid config");
    /// assert_eq!(cfg.grid_segments, 16);
    /// assert_eq!(cfg.poisson_attempts, 20);
    /// ```
    pub fn new(
        tolerance: f64,
        poisson_attempts: u32,
        grid_segments: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            tolerance,
            poisson_attempts,
            grid_segments,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Overrides the guard limits, validating them.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::default().with_guards(10, 500, 1_000).unwrap();
    /// assert_eq!(cfg.earclip_max_passes, 500);
    /// ```
    pub fn with_guards(
        self,
        seed_attempts: u32,
        earclip_max_passes: usize,
        flip_guard: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            seed_attempts,
            earclip_max_passes,
            flip_guard,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.poisson_attempts == 0 {
            return Err(ConfigError::InvalidAttempts(self.poisson_attempts));
        }
        if self.seed_attempts == 0 {
            return Err(ConfigError::InvalidAttempts(self.seed_attempts));
        }
        if self.grid_segments == 0 {
            return Err(ConfigError::InvalidSegments(self.grid_segments));
        }
        if self.earclip_max_passes == 0 {
            return Err(ConfigError::InvalidGuard(self.earclip_max_passes));
        }
        if self.flip_guard == 0 {
            return Err(ConfigError::InvalidGuard(self.flip_guard));
        }
        Ok(())
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            poisson_attempts: DEFAULT_POISSON_ATTEMPTS,
            grid_segments: DEFAULT_GRID_SEGMENTS,
            seed_attempts: POISSON_SEED_ATTEMPTS,
            earclip_max_passes: EARCLIP_MAX_PASSES,
            flip_guard: CDT_FLIP_GUARD,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when an attempt count is zero.
    InvalidAttempts(u32),
    /// Raised when the grid would have no cells.
    InvalidSegments(u32),
    /// Raised when a loop guard would stop every loop immediately.
    InvalidGuard(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidAttempts(value) => {
                write!(f, "attempt counts must be >= 1: {value}")
            }
            ConfigError::InvalidSegments(value) => {
                write!(f, "grid_segments must be >= 1: {value}")
            }
            ConfigError::InvalidGuard(value) => {
                write!(f, "guard limits must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
