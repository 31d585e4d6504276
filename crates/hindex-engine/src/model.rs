//! Index model: turns scored event rows into the bounded daily HI series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hindex_core::{Component, EngineConfig, IndexPoint, ScoredEvent};

use crate::error::EngineError;

/// Floor applied to standard deviations and to the penalty denominator so
/// near-constant history cannot divide by zero.
const EPS: f64 = 1e-6;

/// Source-concentration penalty for one event, in `[0.5, 1.0]`.
///
/// Monotone non-increasing in `bias_max_share`; the 0.5 floor keeps a
/// single event from being zeroed out by concentration alone.
#[must_use]
pub fn bias_penalty(bias_max_share: f64, config: &EngineConfig) -> f64 {
    let excess = (bias_max_share - config.bias_threshold).max(0.0);
    let denom = (1.0 - config.bias_threshold).max(EPS);
    (1.0 - config.bias_lambda * excess / denom).clamp(0.5, 1.0)
}

/// Compute the daily HI series from scored event rows.
///
/// Steps: per-event bias penalty and signed delta, daily per-component
/// totals (absent components zero-filled), historical normalization
/// (trailing-window z-scores, global z-scores, or the short-run magnitude
/// scale depending on available history), weighted composite, and the
/// bounding `tanh`. Output is ordered by date; the "latest" artifact is the
/// last element.
///
/// # Errors
///
/// - [`EngineError::Config`] if any tunable is outside its valid range —
///   checked before any computation.
/// - [`EngineError::DataShape`] if a row carries an out-of-range or
///   non-finite field, which indicates a summarizer bug.
///
/// Empty `rows` is not an error and produces an empty series.
pub fn compute(rows: &[ScoredEvent], config: &EngineConfig) -> Result<Vec<IndexPoint>, EngineError> {
    config
        .validate()
        .map_err(|e| EngineError::Config(e.to_string()))?;

    if rows.is_empty() {
        return Ok(Vec::new());
    }
    validate_rows(rows)?;

    let totals = daily_component_totals(rows, config);
    let dates: Vec<NaiveDate> = totals.keys().copied().collect();
    let values: Vec<[f64; 5]> = totals.into_values().collect();

    let normalized = if dates.len() < 3 {
        scale_normalize(&values)
    } else if config.history.rolling_days > 0
        && dates.len() >= config.history.min_days_for_stats as usize
    {
        rolling_z_scores(
            &values,
            config.history.rolling_days as usize,
            config.history.min_days_for_stats as usize,
        )
    } else {
        global_z_scores(&values)
    };

    let weights = Component::ALL.map(|c| config.weight(c));

    let series = dates
        .into_iter()
        .zip(normalized)
        .map(|(date, row)| {
            let composite: f64 = row.iter().zip(weights.iter()).map(|(z, w)| z * w).sum();
            IndexPoint {
                date,
                hi: bounded_index(composite, config.alpha),
            }
        })
        .collect();

    Ok(series)
}

/// `round(100 × tanh(alpha × z))`; tanh saturates, so the result is always
/// an integer in `[-100, 100]` for any finite input.
fn bounded_index(composite: f64, alpha: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let hi = (100.0 * (alpha * composite).tanh()).round() as i64;
    hi
}

fn validate_rows(rows: &[ScoredEvent]) -> Result<(), EngineError> {
    for (index, row) in rows.iter().enumerate() {
        if row.sign != -1 && row.sign != 1 {
            return Err(EngineError::DataShape(format!(
                "row {index}: sign must be -1 or +1, got {}",
                row.sign
            )));
        }
        if !row.magnitude.is_finite() || !(0.3..=1.0).contains(&row.magnitude) {
            return Err(EngineError::DataShape(format!(
                "row {index}: magnitude must be in [0.3, 1.0], got {}",
                row.magnitude
            )));
        }
        if !row.reliability.is_finite() || !(0.0..=1.0).contains(&row.reliability) {
            return Err(EngineError::DataShape(format!(
                "row {index}: reliability must be in [0, 1], got {}",
                row.reliability
            )));
        }
        if !row.bias_max_share.is_finite() || !(0.0..=1.0).contains(&row.bias_max_share) {
            return Err(EngineError::DataShape(format!(
                "row {index}: bias_max_share must be in [0, 1], got {}",
                row.bias_max_share
            )));
        }
    }
    Ok(())
}

/// Sum signed, penalized deltas into a date × component table. Every date
/// present in the input carries all five components, zero-defaulted, so
/// later statistics see explicit zeros rather than missing cells.
fn daily_component_totals(
    rows: &[ScoredEvent],
    config: &EngineConfig,
) -> BTreeMap<NaiveDate, [f64; 5]> {
    let mut totals: BTreeMap<NaiveDate, [f64; 5]> = BTreeMap::new();
    for row in rows {
        let penalty = bias_penalty(row.bias_max_share, config);
        let delta = f64::from(row.sign) * row.magnitude * row.reliability * penalty;
        totals.entry(row.date).or_insert([0.0; 5])[component_index(row.component)] += delta;
    }
    totals
}

fn component_index(component: Component) -> usize {
    match component {
        Component::A => 0,
        Component::B => 1,
        Component::C => 2,
        Component::D => 3,
        Component::E => 4,
    }
}

/// Short-history fallback: with fewer than 3 distinct dates there is no
/// usable variance estimate, so divide by the median daily absolute mass
/// (floored at 1) instead of z-scoring.
fn scale_normalize(values: &[[f64; 5]]) -> Vec<[f64; 5]> {
    let mut day_mass: Vec<f64> = values
        .iter()
        .map(|row| row.iter().map(|v| v.abs()).sum())
        .collect();
    let scale = median(&mut day_mass).max(1.0);
    values.iter().map(|row| row.map(|v| v / scale)).collect()
}

/// Trailing-window z-scores, shifted by one day so the current date never
/// contributes to its own statistics (no look-ahead leakage). Dates with
/// fewer than `min_days` trailing observations get z = 0.
fn rolling_z_scores(values: &[[f64; 5]], window: usize, min_days: usize) -> Vec<[f64; 5]> {
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(window);
            let trailing = &values[start..i];
            let mut row = [0.0; 5];
            if trailing.len() >= min_days && trailing.len() >= 2 {
                for c in 0..5 {
                    let series: Vec<f64> = trailing.iter().map(|r| r[c]).collect();
                    let mu = mean(&series);
                    let sigma = sample_std(&series, mu).max(EPS);
                    row[c] = (values[i][c] - mu) / sigma;
                }
            }
            row
        })
        .collect()
}

/// Z-scores against the mean and standard deviation of the entire series,
/// per component.
fn global_z_scores(values: &[[f64; 5]]) -> Vec<[f64; 5]> {
    let mut stats = [(0.0, EPS); 5];
    for (c, stat) in stats.iter_mut().enumerate() {
        let series: Vec<f64> = values.iter().map(|r| r[c]).collect();
        let mu = mean(&series);
        *stat = (mu, sample_std(&series, mu).max(EPS));
    }
    values
        .iter()
        .map(|row| {
            let mut out = [0.0; 5];
            for c in 0..5 {
                let (mu, sigma) = stats[c];
                out[c] = (row[c] - mu) / sigma;
            }
            out
        })
        .collect()
}

fn mean(series: &[f64]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = series.len() as f64;
    series.iter().sum::<f64>() / n
}

/// Sample standard deviation (n − 1 denominator); 0.0 for series shorter
/// than two observations.
fn sample_std(series: &[f64], mu: f64) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = (series.len() - 1) as f64;
    let variance = series.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / denom;
    variance.sqrt()
}

/// Median of an unsorted slice; the even case averages the two middle
/// values. 0.0 for an empty slice.
fn median(series: &mut [f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.sort_by(f64::total_cmp);
    let mid = series.len() / 2;
    if series.len() % 2 == 1 {
        series[mid]
    } else {
        (series[mid - 1] + series[mid]) / 2.0
    }
}
