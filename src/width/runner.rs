//! Candidate-width search execution.

use super::config::{Optimizer, WidthConfig};
use crate::beam::BeamRunner;
use crate::error::{PackError, Result};
use crate::random::resolve_seed;
use crate::rls::RlsRunner;
use crate::shape::{total_area, validate_shapes, Coord, Placement, Shape};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of one candidate width.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidthRecord {
    pub width: Coord,
    pub height: Coord,
    /// `width * height`.
    pub area: Coord,
}

/// Result of a candidate-width search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Bin width of the best packing.
    pub width: Coord,

    /// `area / width`.
    pub height: Coord,

    /// Lowest `width * height` over all candidate widths.
    pub area: Coord,

    /// Total shape area over `area`.
    pub fill_ratio: f64,

    /// `max(width, height) / min(width, height)`.
    pub aspect_ratio: f64,

    /// The best packing.
    pub placements: Vec<Placement>,

    /// One record per evaluated width, ascending by width.
    pub records: Vec<WidthRecord>,

    /// Widths skipped because some shape cannot be placed on them.
    pub skipped: Vec<Coord>,

    /// Index into `records` of the best width.
    pub best_index: usize,

    /// Wall-clock time of the whole search.
    pub elapsed: Duration,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Whether the time limit stopped the search early.
    pub timed_out: bool,
}

/// Runs one optimizer per candidate width and keeps the smallest area.
pub struct WidthSearch;

impl WidthSearch {
    /// Runs the search.
    pub fn run(shapes: &[Shape], config: &WidthConfig) -> Result<SearchResult> {
        Self::run_with_cancel(shapes, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The token is forwarded to every per-width optimizer and also checked
    /// between widths, together with the time limit.
    pub fn run_with_cancel(
        shapes: &[Shape],
        config: &WidthConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult> {
        config.validate().map_err(PackError::InvalidConfig)?;
        validate_shapes(shapes)?;
        let started = Instant::now();

        if shapes.is_empty() {
            return Ok(SearchResult {
                width: 0,
                height: 0,
                area: 0,
                fill_ratio: 0.0,
                aspect_ratio: 1.0,
                placements: Vec::new(),
                records: Vec::new(),
                skipped: Vec::new(),
                best_index: 0,
                elapsed: started.elapsed(),
                cancelled: false,
                timed_out: false,
            });
        }

        let widths = config.candidates.generate(shapes, config.width_bounds);
        if widths.is_empty() {
            return Err(PackError::InvalidConfig(format!(
                "no candidate width within {:?}",
                config.width_bounds
            )));
        }

        let seed = resolve_seed(config.base_seed());
        log::debug!(
            "searching {} widths in [{}, {}] with seed {seed}",
            widths.len(),
            widths[0],
            widths[widths.len() - 1]
        );

        let attempt = |width: Coord| -> Attempt {
            if let Some(stop) = stop_reason(cancel.as_ref(), started, config.time_limit_ms) {
                return Attempt::Stopped(stop);
            }
            Attempt::Solved(solve_width(shapes, width, &config.optimizer, seed, cancel.clone()))
        };
        let attempts = evaluate_widths(&widths, config.parallel, attempt);

        let mut records = Vec::with_capacity(widths.len());
        let mut skipped = Vec::new();
        let mut best: Option<(usize, Vec<Placement>)> = None;
        let mut best_area = Coord::MAX;
        let mut first_failure: Option<PackError> = None;
        let mut cancelled = false;
        let mut timed_out = false;

        for (width, attempt) in widths.iter().copied().zip(attempts) {
            let solved = match attempt {
                Attempt::Stopped(Stop::Cancelled) => {
                    cancelled = true;
                    continue;
                }
                Attempt::Stopped(Stop::TimeLimit) => {
                    timed_out = true;
                    continue;
                }
                Attempt::Solved(solved) => solved,
            };

            let solved = match solved {
                Ok(solved) => solved,
                Err(err @ (PackError::Infeasible { .. } | PackError::HeightBoundExceeded { .. })) => {
                    log::warn!("skipping width {width}: {err}");
                    skipped.push(width);
                    first_failure.get_or_insert(err);
                    continue;
                }
                Err(err) => return Err(err),
            };

            cancelled |= solved.cancelled;
            let area = width * solved.height;
            log::debug!("width {width}: height {}, area {area}", solved.height);
            records.push(WidthRecord {
                width,
                height: solved.height,
                area,
            });
            if area < best_area {
                log::info!("new best area {area} at width {width}");
                best_area = area;
                best = Some((records.len() - 1, solved.placements));
            }
        }

        let Some((best_index, placements)) = best else {
            return Err(first_failure.unwrap_or(PackError::Stopped));
        };

        let record = &records[best_index];
        let (width, area) = (record.width, record.area);
        let height = area / width;
        Ok(SearchResult {
            width,
            height,
            area,
            fill_ratio: if area > 0 {
                total_area(shapes) as f64 / area as f64
            } else {
                0.0
            },
            aspect_ratio: aspect_ratio(width, height),
            placements,
            records,
            skipped,
            best_index,
            elapsed: started.elapsed(),
            cancelled,
            timed_out,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Cancelled,
    TimeLimit,
}

enum Attempt {
    Stopped(Stop),
    Solved(Result<Solved>),
}

struct Solved {
    height: Coord,
    placements: Vec<Placement>,
    cancelled: bool,
}

fn stop_reason(cancel: Option<&Arc<AtomicBool>>, started: Instant, limit_ms: u64) -> Option<Stop> {
    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return Some(Stop::Cancelled);
    }
    if limit_ms > 0 && started.elapsed() >= Duration::from_millis(limit_ms) {
        return Some(Stop::TimeLimit);
    }
    None
}

/// Results in the order of `widths`, whichever way they were computed.
fn evaluate_widths<F>(widths: &[Coord], parallel: bool, attempt: F) -> Vec<Attempt>
where
    F: Fn(Coord) -> Attempt + Sync,
{
    #[cfg(feature = "parallel")]
    if parallel {
        return widths.par_iter().map(|&width| attempt(width)).collect();
    }
    #[cfg(not(feature = "parallel"))]
    if parallel {
        log::debug!("parallel width search requested without the `parallel` feature");
    }

    widths.iter().map(|&width| attempt(width)).collect()
}

fn solve_width(
    shapes: &[Shape],
    width: Coord,
    optimizer: &Optimizer,
    seed: u64,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<Solved> {
    match optimizer {
        Optimizer::Beam(config) => {
            let config = config.clone().with_seed(seed);
            let result = BeamRunner::run_with_cancel(shapes, width, &config, cancel)?;
            Ok(Solved {
                height: result.best_height,
                placements: result.placements,
                cancelled: result.cancelled,
            })
        }
        Optimizer::Rls(config) => {
            let config = config.clone().with_seed(seed);
            let result = RlsRunner::run_with_cancel(shapes, width, &config, cancel)?;
            Ok(Solved {
                height: result.best_height,
                placements: result.best.placements,
                cancelled: result.cancelled,
            })
        }
    }
}

fn aspect_ratio(width: Coord, height: Coord) -> f64 {
    let (lo, hi) = (width.min(height), width.max(height));
    if lo <= 0 {
        return 1.0;
    }
    hi as f64 / lo as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::BeamConfig;
    use crate::rls::RlsConfig;
    use crate::width::CandidateWidths;

    fn shapes() -> Vec<Shape> {
        vec![
            Shape::rectangle(6, 4),
            Shape::rectangle(3, 7),
            Shape::l_shape(3, 6, 4, 2),
            Shape::t_shape(2, 2, 2, 3, 5, 3),
            Shape::concave(2, 3, 2, 5, 2, 4),
            Shape::rectangle(5, 5),
        ]
    }

    #[test]
    fn test_search_beam() {
        let shapes = shapes();
        let config = WidthConfig::default().with_seed(42);
        let result = WidthSearch::run(&shapes, &config).unwrap();

        assert_eq!(result.area, result.width * result.height);
        assert_eq!(result.placements.len(), shapes.len());
        assert_eq!(result.records[result.best_index].area, result.area);
        assert!(result.records.iter().all(|r| r.area >= result.area));
        assert!(result.fill_ratio > 0.0 && result.fill_ratio <= 1.0);
        assert!(result.aspect_ratio >= 1.0);
        assert!(!result.cancelled && !result.timed_out);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_search_rls() {
        let shapes = shapes();
        let config = WidthConfig::default()
            .with_optimizer(Optimizer::Rls(RlsConfig::default().with_max_iterations(60)))
            .with_seed(3);
        let result = WidthSearch::run(&shapes, &config).unwrap();
        assert_eq!(result.placements.len(), shapes.len());
        assert_eq!(result.area, result.width * result.height);
    }

    #[test]
    fn test_records_ascending_by_width() {
        let shapes = shapes();
        let config = WidthConfig::default()
            .with_candidates(CandidateWidths::MaxLength { step: 3 })
            .with_seed(1);
        let result = WidthSearch::run(&shapes, &config).unwrap();
        assert!(result.records.len() > 1);
        for w in result.records.windows(2) {
            assert!(w[0].width < w[1].width);
        }
    }

    #[test]
    fn test_first_width_wins_ties() {
        // 2 x 2 squares: widths 2 and 4 both give area 8
        let shapes = vec![Shape::rectangle(2, 2), Shape::rectangle(2, 2)];
        let config = WidthConfig::default()
            .with_candidates(CandidateWidths::MaxLength { step: 2 })
            .with_seed(5);
        let result = WidthSearch::run(&shapes, &config).unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.best_index, 0);
        assert_eq!(result.width, 2);
        assert_eq!(result.area, 8);
    }

    #[test]
    fn test_empty_instance() {
        let result = WidthSearch::run(&[], &WidthConfig::default()).unwrap();
        assert_eq!(result.area, 0);
        assert_eq!(result.aspect_ratio, 1.0);
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = Arc::new(AtomicBool::new(true));
        let err = WidthSearch::run_with_cancel(&shapes(), &WidthConfig::default(), Some(cancel))
            .unwrap_err();
        assert_eq!(err, PackError::Stopped);
    }

    #[test]
    fn test_bounds_excluding_everything() {
        let config = WidthConfig::default().with_width_bounds(1, 3);
        let err = WidthSearch::run(&shapes(), &config).unwrap_err();
        assert!(matches!(err, PackError::InvalidConfig(_)));
    }

    #[test]
    fn test_same_seed_same_result() {
        let shapes = shapes();
        let config = WidthConfig::default()
            .with_optimizer(Optimizer::Beam(BeamConfig::default().with_seed(11)));
        let a = WidthSearch::run(&shapes, &config).unwrap();
        let b = WidthSearch::run(&shapes, &config).unwrap();
        assert_eq!(a.records, b.records);
        assert_eq!(a.placements, b.placements);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(10, 5), 2.0);
        assert_eq!(aspect_ratio(4, 8), 2.0);
        assert_eq!(aspect_ratio(0, 0), 1.0);
    }
}
