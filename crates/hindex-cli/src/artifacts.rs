//! Atomic JSON artifact writing.
//!
//! A failed run must leave prior artifacts untouched, so everything is
//! serialized up front, staged to temporary files in the same directory,
//! and only then renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use hindex_core::artifacts::{EVENTS_FILE, INDEX_SERIES_FILE, LATEST_FILE};
use hindex_engine::ScoringOutcome;
use serde::Serialize;

/// Write the index series, latest point, and transparency events.
///
/// An empty outcome still writes (empty) series and events files, but
/// `latest.json` is only written when a latest point exists.
pub(crate) fn write_artifacts(dir: &Path, outcome: &ScoringOutcome) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating artifact directory {}", dir.display()))?;

    let mut staged = vec![
        stage_json(dir, INDEX_SERIES_FILE, &outcome.series)?,
        stage_json(dir, EVENTS_FILE, &outcome.events)?,
    ];
    if let Some(latest) = &outcome.latest {
        staged.push(stage_json(dir, LATEST_FILE, latest)?);
    }

    // All staging succeeded; renames on the same filesystem are atomic.
    for (tmp, path) in staged {
        fs::rename(&tmp, &path)
            .with_context(|| format!("replacing artifact {}", path.display()))?;
    }

    tracing::info!(dir = %dir.display(), "artifacts written");
    Ok(())
}

fn stage_json<T: Serialize>(
    dir: &Path,
    file_name: &str,
    value: &T,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    let path = dir.join(file_name);
    let tmp = dir.join(format!("{file_name}.tmp"));
    let json =
        serde_json::to_vec_pretty(value).with_context(|| format!("serializing {file_name}"))?;
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    Ok((tmp, path))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hindex_core::IndexPoint;

    use super::*;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hindex-{label}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn outcome() -> ScoringOutcome {
        let point = IndexPoint {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            hi: 17,
        };
        ScoringOutcome {
            series: vec![point],
            latest: Some(point),
            events: Vec::new(),
        }
    }

    #[test]
    fn writes_all_three_artifacts() {
        let dir = scratch_dir("artifacts-full");
        write_artifacts(&dir, &outcome()).unwrap();

        let series: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.join(INDEX_SERIES_FILE)).unwrap()).unwrap();
        assert_eq!(series[0]["HI"], 17);
        assert_eq!(series[0]["date"], "2025-06-01");

        let latest: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.join(LATEST_FILE)).unwrap()).unwrap();
        assert_eq!(latest["HI"], 17);

        assert!(dir.join(EVENTS_FILE).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_outcome_skips_latest_but_writes_series() {
        let dir = scratch_dir("artifacts-empty");
        let empty = ScoringOutcome {
            series: Vec::new(),
            latest: None,
            events: Vec::new(),
        };
        write_artifacts(&dir, &empty).unwrap();
        assert!(dir.join(INDEX_SERIES_FILE).exists());
        assert!(dir.join(EVENTS_FILE).exists());
        assert!(!dir.join(LATEST_FILE).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn rewriting_replaces_previous_artifacts() {
        let dir = scratch_dir("artifacts-replace");
        write_artifacts(&dir, &outcome()).unwrap();

        let mut second = outcome();
        second.series[0].hi = -5;
        second.latest = Some(second.series[0]);
        write_artifacts(&dir, &second).unwrap();

        let latest: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.join(LATEST_FILE)).unwrap()).unwrap();
        assert_eq!(latest["HI"], -5);
        let _ = fs::remove_dir_all(&dir);
    }
}
