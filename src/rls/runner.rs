//! RLS execution loop.

use super::config::RlsConfig;
use super::types::{rank_weights, sort_worst_first, Move, SortRule};
use crate::error::{PackError, Result};
use crate::greedy::{ensure_feasible, Construction, GreedyConstructor};
use crate::random::{create_rng, resolve_seed, weighted_index};
use crate::shape::{validate_shapes, Coord, Shape};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a random local search run on one bin width.
#[derive(Debug, Clone)]
pub struct RlsResult {
    /// Best construction found.
    pub best: Construction,

    /// `bin_width * best.height`.
    pub best_area: Coord,

    /// Height of the best construction.
    pub best_height: Coord,

    /// Final sort rules, worst first.
    pub rules: Vec<SortRule>,

    /// Perturbed orderings evaluated (seed rules excluded).
    pub iterations: usize,

    /// Iteration at which the best was found; 0 if a seed rule holds it.
    pub best_iteration: usize,

    /// Completed or interrupted rounds.
    pub rounds: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best area after each global improvement, non-increasing.
    pub area_history: Vec<Coord>,
}

/// Executes random local search over placement orderings.
pub struct RlsRunner;

impl RlsRunner {
    /// Runs RLS on a bin of `bin_width`.
    pub fn run(shapes: &[Shape], bin_width: Coord, config: &RlsConfig) -> Result<RlsResult> {
        Self::run_with_cancel(shapes, bin_width, config, None)
    }

    /// Runs RLS with an optional cancellation token.
    ///
    /// The token is checked before every perturbed construction.
    pub fn run_with_cancel(
        shapes: &[Shape],
        bin_width: Coord,
        config: &RlsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RlsResult> {
        config.validate().map_err(PackError::InvalidConfig)?;
        validate_shapes(shapes)?;
        ensure_feasible(shapes, bin_width)?;

        let mut rng = create_rng(resolve_seed(config.seed));

        let mut bound = config.max_height;
        let mut best: Option<Construction> = None;
        let mut best_area = Coord::MAX;
        let mut violation: Option<PackError> = None;
        let mut area_history = Vec::new();

        // Seed rules
        let mut rules = SortRule::seeds(shapes, &mut rng);
        for rule in rules.iter_mut() {
            let constructor = GreedyConstructor::new(shapes).with_height_bound(bound);
            match constructor.construct(&rule.sequence, bin_width) {
                Ok(construction) => {
                    rule.target_area = construction.area();
                    if rule.target_area < best_area {
                        best_area = rule.target_area;
                        best = Some(construction);
                        area_history.push(best_area);
                    }
                }
                Err(err @ PackError::HeightBoundExceeded { .. }) => violation = Some(err),
                Err(err) => return Err(err),
            }
        }
        sort_worst_first(&mut rules);

        let weights = rank_weights(rules.len());
        let mut iterations = 0usize;
        let mut best_iteration = 0usize;
        let mut rounds = 0usize;
        let mut cancelled = false;

        'search: while iterations < config.max_iterations && !shapes.is_empty() {
            rounds += 1;
            let picked = weighted_index(&weights, &mut rng);
            let neighborhood = Move::for_round(rounds);

            for _ in 0..rounds {
                if iterations >= config.max_iterations {
                    break 'search;
                }
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break 'search;
                    }
                }

                let mut candidate = rules[picked].clone();
                neighborhood.apply(&mut candidate, &mut rng);
                iterations += 1;

                let constructor = GreedyConstructor::new(shapes).with_height_bound(bound);
                let construction = match constructor.construct(&candidate.sequence, bin_width) {
                    Ok(construction) => construction,
                    Err(PackError::HeightBoundExceeded { .. }) => continue,
                    Err(err) => return Err(err),
                };

                candidate.target_area = construction.area();
                if candidate.target_area >= rules[picked].target_area {
                    continue;
                }
                let area = candidate.target_area;
                rules[picked] = candidate;

                if area < best_area {
                    log::info!(
                        "width {bin_width}: new best area {area} (height {}) at iteration {iterations}",
                        construction.height
                    );
                    best_area = area;
                    bound = Some(construction.height);
                    best = Some(construction);
                    best_iteration = iterations;
                    area_history.push(best_area);
                }
            }

            sort_worst_first(&mut rules);
            log::debug!(
                "width {bin_width}: round {rounds} done, {iterations} iterations, best area {best_area}"
            );
        }

        // an interrupted round leaves the rules unsorted
        sort_worst_first(&mut rules);

        let best = match (best, violation) {
            (Some(best), _) => best,
            (None, Some(err)) => return Err(err),
            (None, None) => unreachable!("every seed rule yields a construction or a violation"),
        };

        Ok(RlsResult {
            best_height: best.height,
            best_area,
            best,
            rules,
            iterations,
            best_iteration,
            rounds,
            cancelled,
            area_history,
        })
    }
}
