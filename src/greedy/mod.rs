//! Greedy bottom-left constructor.
//!
//! Repeatedly takes the lowest skyline segment, asks the scorer for the
//! best remaining shape there and commits it. When nothing fits, the
//! segment is filled up to its lower neighbor and the loop retries.
//!
//! Shape selection is global over all remaining shapes:
//! - the best rectangle is the one with the highest score,
//! - the best L/T/U is picked by waste then segment delta for L shapes
//!   and by segment delta alone for T and U shapes,
//! - if both a rectangle and an L/T/U qualify, the larger shape wins
//!   (the L/T/U on equal area).

mod constructor;
mod types;

pub use constructor::{ensure_feasible, select_best, Choice, GreedyConstructor};
pub use types::Construction;
