//! # Config Crate
//!
//! Centralized configuration constants for the procedural mesh pipeline.
//! All magic numbers and tunable parameters used by the geometry kernels and
//! the graph scheduler are defined here so every crate agrees on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, DEFAULT_POISSON_ATTEMPTS, DEFAULT_GRID_SEGMENTS};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Bridson candidate count and surface grid resolution
//! assert_eq!(DEFAULT_POISSON_ATTEMPTS, 30);
//! assert_eq!(DEFAULT_GRID_SEGMENTS, 32);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Safe to depend on from every crate in the workspace
//! - **Validated Overrides**: `GlobalConfig::new` rejects out-of-domain values

pub mod constants;

#[cfg(test)]
mod tests;
