//! Beam search over placement decisions.
//!
//! Instead of fixing one ordering up front, each generation branches on
//! which remaining shape goes onto the lowest skyline segment next.
//!
//! 1. Every shape, taken in a shuffled order, is placed alone on an empty
//!    bin; the `beam_width` starts with the best area utilization become
//!    the first parents.
//! 2. A parent tries each remaining shape on its lowest segment. A shape
//!    that does not fit yields a child with that segment filled instead.
//!    The `filter_width` children with the best utilization survive.
//! 3. Every surviving child is completed greedily (no branching) to get
//!    its lookahead height. The `beam_width` children with the lowest
//!    lookahead heights become the next parents.
//! 4. The search stops once every parent has placed all shapes.
//!
//! The lowest lookahead height is remembered the moment it is seen, along
//! with its complete packing, since pruning may later drop the child that
//! produced it. All pools break exact ties on a coin flip.

mod config;
mod ranking;
mod runner;
mod types;

pub use config::BeamConfig;
pub use runner::{BeamResult, BeamRunner};
pub use types::PartialSolution;
