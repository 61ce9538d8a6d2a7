//! Candidate-width search.
//!
//! The outermost loop. Generates a range of bin widths around the square
//! root of the total shape area (or between the longest shape and all
//! shapes side by side), runs one optimizer per width and keeps the width
//! whose packing has the smallest `width * height`.
//!
//! Widths are independent: with the `parallel` feature they are spread over
//! the rayon pool. Every width is seeded from the same base seed and the
//! results are folded in width order, so parallel and sequential searches
//! agree. A width on which some shape cannot be placed at all is logged
//! and skipped.

mod config;
mod runner;

pub use config::{CandidateWidths, Optimizer, WidthConfig};
pub use runner::{SearchResult, WidthRecord, WidthSearch};
