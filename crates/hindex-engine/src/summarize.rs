//! Collapses one headline cluster into a single scored event row.

use std::collections::{BTreeMap, HashMap};

use hindex_core::{BiasBin, HeadlineRecord, ReliabilityMap, ScoredEvent};

use crate::categorize::Categorizer;

/// Summarize a cluster into one [`ScoredEvent`].
///
/// - Representative title: the longest member title, ties broken by first
///   occurrence (longer headlines tend to carry more context — a heuristic,
///   not a guarantee).
/// - Date: majority vote over member dates, ties broken by earliest date.
/// - Reliability: arithmetic mean of per-member lookups (unknown domains
///   default to 0.8).
/// - `bias_max_share`: the dominant bias bin's share of members; 1.0 means
///   every member leans the same way.
///
/// Returns `None` for an empty cluster; the clusterer never produces one.
#[must_use]
pub fn summarize(
    members: &[HeadlineRecord],
    reliability: &ReliabilityMap,
    categorizer: &Categorizer,
) -> Option<ScoredEvent> {
    let representative = members.iter().reduce(|best, candidate| {
        if candidate.title.len() > best.title.len() {
            candidate
        } else {
            best
        }
    })?;

    let categorization = categorizer.categorize(&representative.title);

    // BTreeMap iterates dates in ascending order, so keeping only strictly
    // larger counts resolves ties toward the earliest date.
    let mut date_counts = BTreeMap::new();
    for member in members {
        *date_counts.entry(member.observed_date).or_insert(0usize) += 1;
    }
    let date = date_counts
        .iter()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(date, _)| *date)?;

    #[allow(clippy::cast_precision_loss)]
    let member_count = members.len() as f64;

    let mut bias_counts: HashMap<BiasBin, usize> = HashMap::new();
    let mut reliability_sum = 0.0;
    for member in members {
        let entry = reliability.lookup(&member.source_domain);
        reliability_sum += entry.reliability;
        *bias_counts.entry(entry.bias).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let max_bin = bias_counts.values().copied().max().unwrap_or(0) as f64;

    Some(ScoredEvent {
        date,
        component: categorization.component,
        sign: categorization.sign,
        magnitude: categorization.magnitude,
        reliability: reliability_sum / member_count,
        bias_max_share: max_bin / member_count,
        representative_title: representative.title.clone(),
    })
}
