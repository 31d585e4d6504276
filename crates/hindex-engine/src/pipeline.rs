//! End-to-end scoring: headlines in, daily HI series out.

use hindex_core::{EngineConfig, HeadlineRecord, IndexPoint, ReliabilityMap, ScoredEvent};

use crate::categorize::Categorizer;
use crate::cluster::cluster;
use crate::error::EngineError;
use crate::model::compute;
use crate::summarize::summarize;

/// Everything one scoring run produces. The run is atomic: either a full
/// outcome exists, or the run failed and nothing downstream should change.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    /// Date-ordered HI series.
    pub series: Vec<IndexPoint>,
    /// Last point of the series, when any.
    pub latest: Option<IndexPoint>,
    /// Transparency rows: one scored event per cluster, in cluster order,
    /// for auditing why the index moved.
    pub events: Vec<ScoredEvent>,
}

/// Run the full scoring pipeline over one batch of headlines.
///
/// Clusters the records at the configured threshold, summarizes each
/// cluster into a scored event, and aggregates the events into the daily
/// index. Pure and deterministic: the same records, reliability table, and
/// configuration always produce the same outcome.
///
/// # Errors
///
/// Returns [`EngineError`] on invalid configuration, a rule-table compile
/// failure, or a malformed event row. Zero headlines is not an error.
pub fn score_headlines(
    records: Vec<HeadlineRecord>,
    reliability: &ReliabilityMap,
    config: &EngineConfig,
) -> Result<ScoringOutcome, EngineError> {
    let categorizer = Categorizer::new()?;

    let clusters = cluster(records, config.cluster_threshold);
    tracing::debug!(clusters = clusters.len(), "clustered headline batch");

    let events: Vec<ScoredEvent> = clusters
        .iter()
        .filter_map(|members| summarize(members, reliability, &categorizer))
        .collect();

    let series = compute(&events, config)?;
    let latest = series.last().copied();

    tracing::info!(
        events = events.len(),
        days = series.len(),
        latest = latest.map(|p| p.hi),
        "scoring run complete"
    );

    Ok(ScoringOutcome {
        series,
        latest,
        events,
    })
}
