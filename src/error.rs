//! Error types for the packing engine.

use crate::shape::Coord;
use thiserror::Error;

/// Errors surfaced by the packing runners.
///
/// Placement attempts that simply do not fit a skyline segment are not
/// errors; they are reported as `None` by the scorer and resolved by filling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A shape descriptor has inconsistent or non-positive edge lengths.
    #[error("invalid shape {index}: {reason}")]
    InvalidShape { index: usize, reason: String },

    /// The requested bin width is not positive.
    #[error("bin width must be positive, got {0}")]
    InvalidWidth(Coord),

    /// A shape cannot be placed even alone in an empty bin of this width.
    #[error("shape {index} does not fit an empty bin of width {width}")]
    Infeasible { index: usize, width: Coord },

    /// A construction reached a height above the active bin-height bound.
    #[error("packing height {height} exceeds bound {bound}")]
    HeightBoundExceeded { height: Coord, bound: Coord },

    /// The search was stopped before any candidate width finished.
    #[error("search stopped before any width was evaluated")]
    Stopped,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PackError>;
