//! Branch-and-bound configuration.

use crate::logging::VERBOSITY_DEBUG;

/// Default cap on branch operations (child constructions).
pub const DEFAULT_MAX_BRANCHES: u64 = 200_000_000;

/// Configuration for the branch-and-bound search.
///
/// # Examples
///
/// ```
/// use u_flowshop::bnb::BnbConfig;
///
/// let config = BnbConfig::default()
///     .with_max_branches(1_000_000)
///     .with_verbosity(1);
/// assert_eq!(config.max_branches, 1_000_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbConfig {
    /// Safety cap on branch operations. Once reached, the search stops and
    /// reports the best sequence so far as non-exhaustive.
    pub max_branches: u64,

    /// Whether to compute the bounds of sibling children in parallel using
    /// rayon. Ignored unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Logging level, see [`crate::logging`].
    pub verbosity: u8,

    /// Whether to record the bound of every improving candidate.
    pub record_history: bool,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            max_branches: DEFAULT_MAX_BRANCHES,
            parallel: false,
            verbosity: 0,
            record_history: true,
        }
    }
}

impl BnbConfig {
    pub fn with_max_branches(mut self, n: u64) -> Self {
        self.max_branches = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_branches == 0 {
            return Err("max_branches must be positive".into());
        }
        if self.verbosity > VERBOSITY_DEBUG {
            return Err(format!(
                "verbosity must be at most {VERBOSITY_DEBUG}, got {}",
                self.verbosity
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BnbConfig::default();
        assert_eq!(config.max_branches, 200_000_000);
        assert!(!config.parallel);
        assert_eq!(config.verbosity, 0);
        assert!(config.record_history);
    }

    #[test]
    fn test_validate_ok() {
        assert!(BnbConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_branches() {
        let config = BnbConfig::default().with_max_branches(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_verbosity_too_high() {
        let config = BnbConfig::default().with_verbosity(9);
        assert!(config.validate().is_err());
    }
}
