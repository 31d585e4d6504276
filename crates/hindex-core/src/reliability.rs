use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{BiasBin, ReliabilityEntry};

/// One row of the source table in `sources.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Publishing domain, stored lowercase.
    pub domain: String,
    pub bias: BiasBin,
    /// Reliability score in `[0, 1]`.
    pub reliability: f64,
}

#[derive(Debug, Deserialize)]
struct SourcesFile {
    sources: Vec<SourceEntry>,
}

/// Static domain -> (bias, reliability) lookup, loaded once per run.
///
/// Domains absent from the table resolve to the documented default of
/// `(center, 0.8)`.
#[derive(Debug, Clone, Default)]
pub struct ReliabilityMap {
    entries: HashMap<String, ReliabilityEntry>,
}

impl ReliabilityMap {
    #[must_use]
    pub fn new(entries: Vec<SourceEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| {
                (
                    e.domain.to_lowercase(),
                    ReliabilityEntry {
                        bias: e.bias,
                        reliability: e.reliability,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Look up a domain, falling back to the default entry.
    #[must_use]
    pub fn lookup(&self, domain: &str) -> ReliabilityEntry {
        self.entries
            .get(&domain.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load and validate the source-reliability table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_sources(path: &Path) -> Result<ReliabilityMap, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: SourcesFile = serde_yaml::from_str(&content)?;
    validate_sources(&file)?;

    Ok(ReliabilityMap::new(file.sources))
}

fn validate_sources(file: &SourcesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &file.sources {
        if entry.domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source domain must be non-empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&entry.reliability) || !entry.reliability.is_finite() {
            return Err(ConfigError::Validation(format!(
                "source '{}' has reliability {}; must be in [0, 1]",
                entry.domain, entry.reliability
            )));
        }
        if !seen.insert(entry.domain.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source domain: '{}'",
                entry.domain
            )));
        }
    }

    Ok(())
}
