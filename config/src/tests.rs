//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

#[test]
fn test_dedup_scale_keeps_six_decimals() {
    assert_eq!(DEDUP_SCALE, 1e6);
}

// =============================================================================
// SAMPLING TESTS
// =============================================================================

#[test]
fn test_default_attempts_matches_bridson() {
    // Bridson's paper suggests k = 30
    assert_eq!(DEFAULT_POISSON_ATTEMPTS, 30);
}

#[test]
fn test_min_radii_ordering() {
    assert!(POLYGON_MIN_RADIUS < PLANE_MIN_RADIUS);
    assert!(DEFAULT_SAMPLE_RADIUS > PLANE_MIN_RADIUS);
}

// =============================================================================
// TRIANGULATION TESTS
// =============================================================================

#[test]
fn test_boundary_step_shorter_than_radius() {
    // Boundary points must be denser than interior samples
    assert!(BOUNDARY_STEP_FACTOR < 1.0);
    assert!(BOUNDARY_STEP_FACTOR > 0.0);
}

#[test]
fn test_super_triangle_encloses_input() {
    assert!(SUPER_TRIANGLE_SCALE >= 2.0);
}

#[test]
fn test_grid_matches_reference_plane() {
    let segments = DEFAULT_GRID_SEGMENTS as usize;
    assert_eq!((segments + 1) * (segments + 1), 1089);
    assert_eq!(segments * segments * 2, 2048);
}

// =============================================================================
// HELPER TESTS
// =============================================================================

#[test]
fn test_approx_equal_within_epsilon() {
    let small_diff = EPSILON / 2.0;
    assert!(approx_equal(1.0, 1.0 + small_diff));
    assert!(approx_equal(1.0, 1.0 - small_diff));
}

#[test]
fn test_approx_equal_outside_epsilon() {
    let large_diff = EPSILON * 2.0;
    assert!(!approx_equal(1.0, 1.0 + large_diff));
    assert!(!approx_equal(1.0, 1.0 - large_diff));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(EPSILON / 2.0));
    assert!(!approx_zero(-1.0));
}
