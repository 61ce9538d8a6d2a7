//! Candidate-width search configuration.

use crate::beam::BeamConfig;
use crate::rls::RlsConfig;
use crate::shape::{Coord, Shape};

/// How the candidate bin widths are generated.
///
/// Widths never go below the largest shape dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CandidateWidths {
    /// `[floor(lower_scale * sqrt(A)), ceil(upper_scale * sqrt(A))]` where
    /// `A` is the total shape area. Suited to near-square packings.
    SquareRoot {
        lower_scale: f64,
        upper_scale: f64,
        step: Coord,
    },

    /// `[max max_length, sum of max_length]`: from the narrowest usable bin
    /// up to one that fits every shape side by side.
    MaxLength { step: Coord },
}

impl Default for CandidateWidths {
    fn default() -> Self {
        CandidateWidths::SquareRoot {
            lower_scale: 0.9,
            upper_scale: 1.1,
            step: 1,
        }
    }
}

impl CandidateWidths {
    /// Candidate widths for `shapes`, ascending, clamped to `bounds`.
    ///
    /// Empty if the bounds exclude every usable width.
    pub fn generate(&self, shapes: &[Shape], bounds: Option<(Coord, Coord)>) -> Vec<Coord> {
        let longest = shapes.iter().map(Shape::max_length).max().unwrap_or(0);

        let (lo, hi, step) = match *self {
            CandidateWidths::SquareRoot {
                lower_scale,
                upper_scale,
                step,
            } => {
                let root = (crate::shape::total_area(shapes) as f64).sqrt();
                let lo = ((lower_scale * root).floor() as Coord).max(longest);
                let hi = ((upper_scale * root).ceil() as Coord).max(lo);
                (lo, hi, step)
            }
            CandidateWidths::MaxLength { step } => {
                let sum: Coord = shapes.iter().map(Shape::max_length).sum();
                (longest, sum.max(longest), step)
            }
        };

        let (lo, hi) = match bounds {
            Some((min, max)) => (lo.max(min).max(longest), hi.min(max)),
            None => (lo, hi),
        };
        if lo > hi || lo <= 0 {
            return Vec::new();
        }
        (lo..=hi).step_by(step.max(1) as usize).collect()
    }

    fn step(&self) -> Coord {
        match *self {
            CandidateWidths::SquareRoot { step, .. } | CandidateWidths::MaxLength { step } => step,
        }
    }
}

/// The per-width optimizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Optimizer {
    Beam(BeamConfig),
    Rls(RlsConfig),
}

impl Default for Optimizer {
    fn default() -> Self {
        Optimizer::Beam(BeamConfig::default())
    }
}

impl Optimizer {
    fn seed(&self) -> Option<u64> {
        match self {
            Optimizer::Beam(config) => config.seed,
            Optimizer::Rls(config) => config.seed,
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Optimizer::Beam(config) => config.validate(),
            Optimizer::Rls(config) => config.validate(),
        }
    }
}

/// Configuration for the candidate-width search.
///
/// # Examples
///
/// ```
/// use u_strippack::beam::BeamConfig;
/// use u_strippack::width::{CandidateWidths, Optimizer, WidthConfig};
///
/// let config = WidthConfig::default()
///     .with_candidates(CandidateWidths::MaxLength { step: 2 })
///     .with_optimizer(Optimizer::Beam(BeamConfig::default().with_beam_width(4)))
///     .with_time_limit_ms(5_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidthConfig {
    pub candidates: CandidateWidths,

    /// Inclusive `(min, max)` clamp on the generated widths.
    pub width_bounds: Option<(Coord, Coord)>,

    pub optimizer: Optimizer,

    /// Evaluate widths on the rayon pool (requires the `parallel` feature).
    pub parallel: bool,

    /// Wall-clock budget in milliseconds, checked between widths. 0 = no limit.
    pub time_limit_ms: u64,

    /// Seed shared by every width. Falls back to the optimizer's seed.
    pub seed: Option<u64>,
}

impl Default for WidthConfig {
    fn default() -> Self {
        Self {
            candidates: CandidateWidths::default(),
            width_bounds: None,
            optimizer: Optimizer::default(),
            parallel: false,
            time_limit_ms: 0,
            seed: None,
        }
    }
}

impl WidthConfig {
    pub fn with_candidates(mut self, candidates: CandidateWidths) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_width_bounds(mut self, min: Coord, max: Coord) -> Self {
        self.width_bounds = Some((min, max));
        self
    }

    pub fn with_optimizer(mut self, optimizer: Optimizer) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured seed, or the optimizer's.
    pub(crate) fn base_seed(&self) -> Option<u64> {
        self.seed.or_else(|| self.optimizer.seed())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.candidates.step() <= 0 {
            return Err(format!(
                "candidate width step must be positive, got {}",
                self.candidates.step()
            ));
        }
        if let CandidateWidths::SquareRoot {
            lower_scale,
            upper_scale,
            ..
        } = self.candidates
        {
            if !(lower_scale > 0.0 && lower_scale <= 1.0) {
                return Err(format!("lower_scale must be in (0, 1], got {lower_scale}"));
            }
            if !(upper_scale >= 1.0 && upper_scale.is_finite()) {
                return Err(format!("upper_scale must be finite and >= 1, got {upper_scale}"));
            }
        }
        if let Some((min, max)) = self.width_bounds {
            if min <= 0 || min > max {
                return Err(format!("invalid width bounds ({min}, {max})"));
            }
        }
        self.optimizer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidthConfig::default();
        assert!(config.validate().is_ok());
        assert!(matches!(config.optimizer, Optimizer::Beam(_)));
        assert_eq!(config.base_seed(), None);
    }

    #[test]
    fn test_square_root_widths() {
        // total area 500, sqrt ~22.36: [floor(20.12), ceil(24.60)]
        let shapes = vec![Shape::rectangle(10, 10); 5];
        let widths = CandidateWidths::default().generate(&shapes, None);
        assert_eq!(widths, vec![20, 21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_square_root_raised_to_longest_shape() {
        // sqrt(2 * 30) ~ 7.7: the 30 long bar pushes the whole range up
        let shapes = vec![Shape::rectangle(30, 1), Shape::rectangle(30, 1)];
        let widths = CandidateWidths::default().generate(&shapes, None);
        assert_eq!(widths, vec![30]);
    }

    #[test]
    fn test_max_length_widths_with_step() {
        let shapes = vec![Shape::rectangle(4, 2), Shape::rectangle(3, 3)];
        let widths = CandidateWidths::MaxLength { step: 2 }.generate(&shapes, None);
        assert_eq!(widths, vec![4, 6]);
    }

    #[test]
    fn test_bounds_clamp_but_never_below_longest() {
        let shapes = vec![Shape::rectangle(10, 10); 5];
        let widths = CandidateWidths::default().generate(&shapes, Some((5, 21)));
        assert_eq!(widths, vec![20, 21]);

        let shapes = vec![Shape::rectangle(12, 1), Shape::rectangle(2, 2)];
        let widths = CandidateWidths::MaxLength { step: 1 }.generate(&shapes, Some((1, 13)));
        assert_eq!(widths, vec![12, 13]);

        let widths = CandidateWidths::MaxLength { step: 1 }.generate(&shapes, Some((1, 8)));
        assert!(widths.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_step = WidthConfig::default().with_candidates(CandidateWidths::MaxLength { step: 0 });
        assert!(bad_step.validate().is_err());

        let bad_scale = WidthConfig::default().with_candidates(CandidateWidths::SquareRoot {
            lower_scale: 1.2,
            upper_scale: 1.5,
            step: 1,
        });
        assert!(bad_scale.validate().is_err());

        assert!(WidthConfig::default().with_width_bounds(10, 5).validate().is_err());

        let bad_beam = WidthConfig::default()
            .with_optimizer(Optimizer::Beam(BeamConfig::default().with_beam_width(0)));
        assert!(bad_beam.validate().is_err());
    }

    #[test]
    fn test_seed_falls_back_to_optimizer() {
        let config = WidthConfig::default()
            .with_optimizer(Optimizer::Rls(RlsConfig::default().with_seed(8)));
        assert_eq!(config.base_seed(), Some(8));
        assert_eq!(config.with_seed(3).base_seed(), Some(3));
    }
}
