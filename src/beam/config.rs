//! Beam search configuration.

/// Configuration for the beam search driver.
///
/// # Examples
///
/// ```
/// use u_strippack::beam::BeamConfig;
///
/// let config = BeamConfig::default()
///     .with_beam_width(5)
///     .with_filter_width(3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeamConfig {
    /// Partial solutions kept per generation, ranked by lookahead height.
    pub beam_width: usize,

    /// Children kept per parent, ranked by area utilization.
    pub filter_width: usize,

    /// Random seed for the start order and tie-breaking.
    pub seed: Option<u64>,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            beam_width: 3,
            filter_width: 2,
            seed: None,
        }
    }
}

impl BeamConfig {
    pub fn with_beam_width(mut self, width: usize) -> Self {
        self.beam_width = width;
        self
    }

    pub fn with_filter_width(mut self, width: usize) -> Self {
        self.filter_width = width;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.beam_width == 0 {
            return Err("beam_width must be at least 1".into());
        }
        if self.filter_width == 0 {
            return Err("filter_width must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BeamConfig::default();
        assert_eq!(config.beam_width, 3);
        assert_eq!(config.filter_width, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_widths() {
        assert!(BeamConfig::default().with_beam_width(0).validate().is_err());
        assert!(BeamConfig::default().with_filter_width(0).validate().is_err());
    }
}
