//! Analyzer configuration.
//!
//! Every value has a default, so an empty TOML file is a valid
//! configuration:
//!
//! ```toml
//! [complexity]
//! elevated_above = 5
//! split_above = 10
//!
//! [progress]
//! bar_width = 40
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Widest progress bar accepted by [`AnalyzerConfig::validate`].
pub const MAX_BAR_WIDTH: usize = 1000;

/// Main configuration structure for the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Step-count thresholds for complexity classification.
    pub complexity: ComplexityThresholds,
    /// Progress summary settings.
    pub progress: ProgressConfig,
}

/// Step-count thresholds.
///
/// A task with zero steps is always flagged. Above `elevated_above` steps it
/// is tagged elevated, above `split_above` it is flagged for splitting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ComplexityThresholds {
    /// Largest step count still considered normal.
    pub elevated_above: usize,
    /// Largest step count not flagged for splitting.
    pub split_above: usize,
}

impl Default for ComplexityThresholds {
    fn default() -> Self {
        Self {
            elevated_above: 5,
            split_above: 10,
        }
    }
}

/// Progress summary settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressConfig {
    /// Number of segments in the progress bar.
    pub bar_width: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { bar_width: 40 }
    }
}

impl AnalyzerConfig {
    /// Parse and validate a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] for malformed TOML or unknown keys and
    /// [`Error::InvalidConfig`] for inconsistent values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|source| Error::ConfigParse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `split_above` is below
    /// `elevated_above` or the bar width is zero or above [`MAX_BAR_WIDTH`].
    pub fn validate(&self) -> Result<()> {
        if self.complexity.split_above < self.complexity.elevated_above {
            return Err(Error::invalid_config(format!(
                "complexity.split_above ({}) must not be below complexity.elevated_above ({})",
                self.complexity.split_above, self.complexity.elevated_above
            )));
        }
        if self.progress.bar_width == 0 {
            return Err(Error::invalid_config("progress.bar_width must be at least 1"));
        }
        if self.progress.bar_width > MAX_BAR_WIDTH {
            return Err(Error::invalid_config(format!(
                "progress.bar_width ({}) must not exceed {MAX_BAR_WIDTH}",
                self.progress.bar_width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.complexity.elevated_above, 5);
        assert_eq!(config.complexity.split_above, 10);
        assert_eq!(config.progress.bar_width, 40);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = AnalyzerConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = AnalyzerConfig::from_toml_str("[progress]\nbar_width = 20\n").unwrap();
        assert_eq!(config.progress.bar_width, 20);
        assert_eq!(config.complexity, ComplexityThresholds::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = AnalyzerConfig::from_toml_str("[progress]\nwidth = 20\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_inverted_thresholds_are_rejected() {
        let err = AnalyzerConfig::from_toml_str(
            "[complexity]\nelevated_above = 8\nsplit_above = 4\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_zero_bar_width_is_rejected() {
        let err = AnalyzerConfig::from_toml_str("[progress]\nbar_width = 0\n").unwrap_err();
        assert!(err.to_string().contains("bar_width"));
    }

    #[test]
    fn test_bar_width_upper_bound() {
        let config = AnalyzerConfig::from_toml_str("[progress]\nbar_width = 1000\n").unwrap();
        assert_eq!(config.progress.bar_width, MAX_BAR_WIDTH);

        let err = AnalyzerConfig::from_toml_str("[progress]\nbar_width = 1001\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
        assert!(err.to_string().contains("must not exceed 1000"));
    }
}
