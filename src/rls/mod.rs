//! Random Local Search (RLS) over placement orderings.
//!
//! Keeps four sort rules (input order, area descending, longest edge
//! descending, random), each a permutation of the shapes plus the bin area
//! its greedy construction reached. The search runs in rounds; round `r`
//! picks one rule with weights `2, 4, 6, 8` by rank (rules are kept worst
//! first) and evaluates `r` perturbations of it. Every fourth perturbation
//! rotates the sequence, the others swap two positions.
//!
//! A perturbation replaces the picked rule when it strictly improves the
//! rule's own area. When it also beats the global best, the height bound
//! tightens to the new incumbent height, so later constructions are cut
//! short as soon as they can no longer win.

mod config;
mod runner;
mod types;

pub use config::RlsConfig;
pub use runner::{RlsResult, RlsRunner};
pub use types::SortRule;
