use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Component;

/// Historical-normalization tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Minimum trailing days required before rolling statistics apply.
    #[serde(default = "default_min_days_for_stats")]
    pub min_days_for_stats: u32,
    /// Trailing window length in days; `0` disables rolling normalization.
    #[serde(default)]
    pub rolling_days: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            min_days_for_stats: default_min_days_for_stats(),
            rolling_days: 0,
        }
    }
}

/// Engine tunables loaded once per run from `settings.yaml`.
///
/// `alpha`, `bias_threshold`, and `components` have no defaults: they are
/// load-bearing, and a missing key fails the load rather than silently
/// skewing every downstream number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scale factor inside the bounding `tanh`.
    pub alpha: f64,
    /// Bias concentration above which the penalty starts to bite, in `[0, 1)`.
    pub bias_threshold: f64,
    /// Penalty strength in `[0, 1]`.
    #[serde(default = "default_bias_lambda")]
    pub bias_lambda: f64,
    /// Anchor-similarity threshold for joining a headline cluster
    /// (normalized edit-distance ratio).
    #[serde(default = "default_cluster_threshold")]
    pub cluster_threshold: f64,
    /// Per-component weights; need not sum to 1. Components absent here
    /// contribute weight 0.
    pub components: BTreeMap<Component, f64>,
    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_min_days_for_stats() -> u32 {
    14
}

fn default_bias_lambda() -> f64 {
    0.6
}

fn default_cluster_threshold() -> f64 {
    0.70
}

impl EngineConfig {
    /// Check every tunable against its valid range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "alpha must be a finite number > 0, got {}",
                self.alpha
            )));
        }
        if !self.bias_threshold.is_finite()
            || !(0.0..1.0).contains(&self.bias_threshold)
        {
            return Err(ConfigError::Validation(format!(
                "bias_threshold must be in [0, 1), got {}",
                self.bias_threshold
            )));
        }
        if !self.bias_lambda.is_finite() || !(0.0..=1.0).contains(&self.bias_lambda) {
            return Err(ConfigError::Validation(format!(
                "bias_lambda must be in [0, 1], got {}",
                self.bias_lambda
            )));
        }
        if !self.cluster_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.cluster_threshold)
        {
            return Err(ConfigError::Validation(format!(
                "cluster_threshold must be in [0, 1], got {}",
                self.cluster_threshold
            )));
        }
        if self.components.is_empty() {
            return Err(ConfigError::Validation(
                "components must configure at least one weight".to_string(),
            ));
        }
        for (component, weight) in &self.components {
            if !weight.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "weight for component {component} must be finite, got {weight}"
                )));
            }
        }
        if self.history.min_days_for_stats == 0 {
            return Err(ConfigError::Validation(
                "history.min_days_for_stats must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Weight for a component, `0.0` when unconfigured.
    #[must_use]
    pub fn weight(&self, component: Component) -> f64 {
        self.components.get(&component).copied().unwrap_or(0.0)
    }
}

/// Load and validate the engine settings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_settings(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: EngineConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}
