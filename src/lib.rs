//! Skyline-based strip packing of rectangles and L, T and U shapes.
//!
//! Packs a list of rectilinear shapes into a bin of fixed width while
//! minimizing the height, then searches over bin widths to minimize the
//! bin area:
//!
//! - **Skyline**: the upper contour of packed material as merged
//!   horizontal segments.
//! - **Scorer**: per-family fit tests and rankings of every admissible
//!   rotation on one skyline segment.
//! - **Greedy constructor**: bottom-left placement that always serves the
//!   lowest segment with the best remaining shape.
//! - **RLS**: random local search over placement orderings.
//! - **Beam search**: branches on which shape goes next, ranked by greedy
//!   lookahead.
//! - **Width search**: one optimizer run per candidate bin width.
//!
//! # Example
//!
//! ```
//! use u_strippack::shape::Shape;
//! use u_strippack::width::{WidthConfig, WidthSearch};
//!
//! let shapes = vec![
//!     Shape::rectangle(4, 3),
//!     Shape::l_shape(2, 5, 3, 2),
//!     Shape::rectangle(3, 3),
//! ];
//! let result = WidthSearch::run(&shapes, &WidthConfig::default().with_seed(1)).unwrap();
//! assert_eq!(result.placements.len(), 3);
//! assert_eq!(result.area, result.width * result.height);
//! ```
//!
//! # Architecture
//!
//! All coordinates are integers ([`shape::Coord`]). Every search driver
//! owns one seeded generator, so runs are reproducible for a fixed seed.
//! The library logs through the `log` facade and installs no logger.

pub mod beam;
pub mod error;
pub mod greedy;
pub mod random;
pub mod rls;
pub mod scorer;
pub mod shape;
pub mod skyline;
pub mod width;

pub use error::{PackError, Result};
