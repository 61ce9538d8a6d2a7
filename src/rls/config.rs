//! RLS configuration.

use crate::shape::Coord;

/// Configuration for the random local search driver.
///
/// # Examples
///
/// ```
/// use u_strippack::rls::RlsConfig;
///
/// let config = RlsConfig::default()
///     .with_max_iterations(2000)
///     .with_max_height(120)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RlsConfig {
    /// Total number of perturbed orderings evaluated after the seed rules.
    /// 0 evaluates the seed rules only.
    pub max_iterations: usize,

    /// Initial height bound. Constructions whose shapes rise above it are
    /// discarded. The bound tightens to the incumbent height on every
    /// global improvement.
    pub max_height: Option<Coord>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for RlsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 9999,
            max_height: None,
            seed: None,
        }
    }
}

impl RlsConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_max_height(mut self, height: Coord) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(height) = self.max_height {
            if height <= 0 {
                return Err(format!("max_height must be positive, got {height}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RlsConfig::default();
        assert_eq!(config.max_iterations, 9999);
        assert!(config.max_height.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_height() {
        assert!(RlsConfig::default().with_max_height(0).validate().is_err());
        assert!(RlsConfig::default().with_max_height(-3).validate().is_err());
    }
}
