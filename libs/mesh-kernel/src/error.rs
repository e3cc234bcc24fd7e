//! # Kernel Errors
//!
//! Error types for sampling and triangulation kernels.
//!
//! Degenerate-but-valid inputs (too few points, zero-area polygons) are not
//! errors: kernels return empty results for them. The variants below describe
//! inputs a kernel cannot honor at all.

use thiserror::Error;

/// Errors that can occur inside a geometry kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// A triangle references a vertex that does not exist.
    #[error("Triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// A boundary edge could not be recovered by the constrained triangulator.
    ///
    /// Happens when the polygon self-intersects or another vertex lies exactly
    /// on the boundary edge.
    #[error("Constraint edge {from} -> {to} could not be recovered")]
    ConstraintRecovery { from: usize, to: usize },

    /// The flip budget ran out before the triangulation settled.
    #[error("Flip budget of {budget} exhausted")]
    FlipBudgetExhausted { budget: usize },
}

/// Result type alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;
