//! Beam search execution loop.

use super::config::BeamConfig;
use super::ranking::Ranked;
use super::types::PartialSolution;
use crate::error::{PackError, Result};
use crate::greedy::{ensure_feasible, GreedyConstructor};
use crate::random::{create_rng, resolve_seed, shuffle};
use crate::shape::{validate_shapes, Coord, Placement, Shape};
use rand::Rng;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a beam search on one bin width.
#[derive(Debug, Clone)]
pub struct BeamResult {
    /// Lowest lookahead height seen in any generation.
    pub best_height: Coord,

    /// `bin_width * best_height`.
    pub best_area: Coord,

    /// The complete packing behind `best_height`.
    pub placements: Vec<Placement>,

    /// Generations expanded.
    pub generations: usize,

    /// Generation in which `best_height` was first seen.
    pub best_generation: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best height after each generation, non-increasing.
    pub height_history: Vec<Coord>,
}

/// Executes beam search over placement decisions.
pub struct BeamRunner;

impl BeamRunner {
    /// Runs beam search on a bin of `bin_width`.
    pub fn run(shapes: &[Shape], bin_width: Coord, config: &BeamConfig) -> Result<BeamResult> {
        Self::run_with_cancel(shapes, bin_width, config, None)
    }

    /// Runs beam search with an optional cancellation token.
    ///
    /// The token is checked between generations. At least one generation
    /// always runs, so a cancelled search still returns a complete packing.
    pub fn run_with_cancel(
        shapes: &[Shape],
        bin_width: Coord,
        config: &BeamConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BeamResult> {
        config.validate().map_err(PackError::InvalidConfig)?;
        validate_shapes(shapes)?;
        ensure_feasible(shapes, bin_width)?;

        if shapes.is_empty() {
            return Ok(BeamResult {
                best_height: 0,
                best_area: 0,
                placements: Vec::new(),
                generations: 0,
                best_generation: 0,
                cancelled: false,
                height_history: Vec::new(),
            });
        }

        let mut rng = create_rng(resolve_seed(config.seed));

        let mut order: Vec<usize> = (0..shapes.len()).collect();
        shuffle(&mut order, &mut rng);

        let mut starts = Ranked::with_capacity(config.beam_width);
        for position in 0..order.len() {
            let start = PartialSolution::start(shapes, &order, position, bin_width).ok_or(
                PackError::Infeasible {
                    index: order[position],
                    width: bin_width,
                },
            )?;
            starts.offer(start.area_percentage, start, &mut rng);
        }
        let mut parents = starts.into_ranked();

        let lookahead = GreedyConstructor::new(shapes);
        let mut best_height = Coord::MAX;
        let mut best_placements = Vec::new();
        let mut best_generation = 0usize;
        let mut generations = 0usize;
        let mut cancelled = false;
        let mut height_history = Vec::new();

        loop {
            generations += 1;
            let mut next = Ranked::with_capacity(config.beam_width);

            for parent in &parents {
                for mut child in expand(shapes, parent, config.filter_width, &mut rng) {
                    let completion = lookahead.complete(
                        child.skyline.clone(),
                        child.remaining.clone(),
                        child.placements.clone(),
                    )?;
                    child.future_height = completion.height;

                    // kept even if this child is pruned below
                    if completion.height < best_height {
                        best_height = completion.height;
                        best_placements = completion.placements;
                        best_generation = generations;
                    }
                    next.offer(Reverse(child.future_height), child, &mut rng);
                }
            }

            log::trace!(
                "width {bin_width}: generation {generations}, {} parents, best height {best_height}",
                next.len()
            );
            parents = next.into_ranked();
            height_history.push(best_height);

            if parents.iter().all(PartialSolution::is_complete) {
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
        }

        Ok(BeamResult {
            best_height,
            best_area: best_height * bin_width,
            placements: best_placements,
            generations,
            best_generation,
            cancelled,
            height_history,
        })
    }
}

/// The `filter_width` children of `parent` with the highest utilization.
///
/// A complete parent is its own sole child.
fn expand<R: Rng>(
    shapes: &[Shape],
    parent: &PartialSolution,
    filter_width: usize,
    rng: &mut R,
) -> Vec<PartialSolution> {
    if parent.is_complete() {
        return vec![parent.clone()];
    }

    let mut children = Ranked::with_capacity(filter_width);
    for position in 0..parent.remaining.len() {
        if let Some(child) = parent.child(shapes, position) {
            children.offer(child.area_percentage, child, rng);
        }
    }
    children.into_ranked()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn mixed_shapes() -> Vec<Shape> {
        vec![
            Shape::rectangle(6, 4),
            Shape::rectangle(3, 7),
            Shape::l_shape(3, 6, 4, 2),
            Shape::t_shape(2, 2, 2, 3, 5, 3),
            Shape::concave(2, 3, 2, 5, 2, 4),
            Shape::rectangle(5, 5),
            Shape::rectangle(2, 9),
            Shape::l_shape(2, 5, 3, 3),
        ]
    }

    #[test]
    fn test_beam_places_every_shape() {
        let shapes = mixed_shapes();
        let config = BeamConfig::default().with_seed(42);
        let result = BeamRunner::run(&shapes, 14, &config).unwrap();

        assert_eq!(result.placements.len(), shapes.len());
        let mut indices: Vec<usize> = result.placements.iter().map(|p| p.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..shapes.len()).collect::<Vec<_>>());

        assert_eq!(result.best_area, 14 * result.best_height);
        let placed: Coord = shapes.iter().map(Shape::area).sum();
        assert!(placed <= result.best_area);
        assert!(!result.cancelled);
        assert!(result.best_generation >= 1 && result.best_generation <= result.generations);
    }

    #[test]
    fn test_beam_history_non_increasing() {
        let shapes = mixed_shapes();
        let config = BeamConfig::default().with_beam_width(4).with_seed(9);
        let result = BeamRunner::run(&shapes, 12, &config).unwrap();
        assert_eq!(result.height_history.len(), result.generations);
        for w in result.height_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert_eq!(*result.height_history.last().unwrap(), result.best_height);
    }

    #[test]
    fn test_beam_deterministic() {
        let shapes = mixed_shapes();
        let config = BeamConfig::default().with_seed(123);
        let a = BeamRunner::run(&shapes, 13, &config).unwrap();
        let b = BeamRunner::run(&shapes, 13, &config).unwrap();
        assert_eq!(a.best_height, b.best_height);
        assert_eq!(a.placements, b.placements);
        assert_eq!(a.generations, b.generations);
    }

    #[test]
    fn test_beam_identical_squares() {
        let shapes = vec![Shape::rectangle(10, 10), Shape::rectangle(10, 10)];
        let result = BeamRunner::run(&shapes, 20, &BeamConfig::default().with_seed(1)).unwrap();
        assert_eq!(result.best_height, 10);
        assert_eq!(result.best_area, 200);
    }

    #[test]
    fn test_narrow_beam_matches_greedy_on_uniform_shapes() {
        // with one parent and one child per generation the search follows a
        // single path; on identical squares that path is the greedy packing
        let shapes = vec![Shape::rectangle(5, 5); 6];
        let config = BeamConfig::default()
            .with_beam_width(1)
            .with_filter_width(1)
            .with_seed(77);
        let beam = BeamRunner::run(&shapes, 10, &config).unwrap();
        let greedy = GreedyConstructor::new(&shapes)
            .construct(&[0, 1, 2, 3, 4, 5], 10)
            .unwrap();
        assert_eq!(beam.best_height, greedy.height);
        assert_eq!(beam.best_height, 15);
    }

    #[test]
    fn test_single_shape() {
        let shapes = vec![Shape::l_shape(3, 6, 4, 2)];
        let result = BeamRunner::run(&shapes, 10, &BeamConfig::default().with_seed(5)).unwrap();
        assert_eq!(result.generations, 1);
        assert_eq!(result.best_height, 6);
        assert_eq!(result.placements.len(), 1);
    }

    #[test]
    fn test_cancel_after_first_generation() {
        let shapes = mixed_shapes();
        let cancel = Arc::new(AtomicBool::new(true));
        let config = BeamConfig::default().with_seed(2);
        let result = BeamRunner::run_with_cancel(&shapes, 14, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 1);
        assert_eq!(result.placements.len(), shapes.len());
    }

    #[test]
    fn test_infeasible_width() {
        let shapes = vec![Shape::rectangle(3, 3), Shape::concave(2, 3, 2, 5, 2, 4)];
        let err = BeamRunner::run(&shapes, 6, &BeamConfig::default().with_seed(1)).unwrap_err();
        assert_eq!(err, PackError::Infeasible { index: 1, width: 6 });
    }

    #[test]
    fn test_empty_instance() {
        let result = BeamRunner::run(&[], 10, &BeamConfig::default()).unwrap();
        assert_eq!(result.best_area, 0);
        assert!(result.placements.is_empty());
    }

    #[test]
    fn test_expand_complete_parent() {
        let shapes = [Shape::rectangle(2, 2)];
        let parent = PartialSolution::start(&shapes, &[0], 0, 4).unwrap();
        let mut rng = create_rng(0);
        let children = expand(&shapes, &parent, 2, &mut rng);
        assert_eq!(children, vec![parent]);
    }

    #[test]
    fn test_expand_keeps_filter_width_best() {
        let shapes = [
            Shape::rectangle(4, 4),
            Shape::rectangle(1, 1),
            Shape::rectangle(4, 4),
            Shape::rectangle(2, 2),
        ];
        let parent = PartialSolution::start(&shapes, &[0, 1, 2, 3], 0, 8).unwrap();
        let mut rng = create_rng(0);
        let children = expand(&shapes, &parent, 2, &mut rng);
        assert_eq!(children.len(), 2);
        // the second 4x4 fills the row completely
        assert_eq!(children[0].placements[1].index, 2);
        assert!((children[0].area_percentage - 1.0).abs() < 1e-12);
        assert!(children[0].area_percentage >= children[1].area_percentage);
    }
}
