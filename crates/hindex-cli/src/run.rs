//! The `run` command: one full fetch → score → write cycle.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use hindex_core::AppConfig;
use hindex_engine::score_headlines;
use hindex_gdelt::{sample_headlines, GdeltClient};

use crate::artifacts::write_artifacts;

pub(crate) async fn run(
    config: &AppConfig,
    output_dir: Option<PathBuf>,
    days: u32,
    max_records: u32,
    offline: bool,
) -> anyhow::Result<()> {
    let settings = hindex_core::load_settings(&config.settings_path).with_context(|| {
        format!("loading engine settings from {}", config.settings_path.display())
    })?;
    let sources = hindex_core::load_sources(&config.sources_path).with_context(|| {
        format!("loading source table from {}", config.sources_path.display())
    })?;
    tracing::debug!(sources = sources.len(), "configuration loaded");

    let today = Utc::now().date_naive();

    let records = if offline {
        tracing::info!("offline mode: scoring the built-in sample batch");
        sample_headlines(today)
    } else {
        let client = GdeltClient::new(config.gdelt_timeout_secs, &config.gdelt_user_agent)?;
        let fetched = client
            .fetch_headlines_with_retry(
                days,
                max_records,
                today,
                config.gdelt_max_retries,
                config.gdelt_backoff_base_ms,
            )
            .await
            .context("fetching headlines from GDELT")?;
        if fetched.is_empty() {
            tracing::warn!("source returned no headlines; using the sample batch");
            sample_headlines(today)
        } else {
            tracing::info!(count = fetched.len(), "fetched headlines");
            fetched
        }
    };

    let outcome = score_headlines(records, &sources, &settings)?;

    let dir = output_dir.unwrap_or_else(|| config.data_dir.clone());
    write_artifacts(&dir, &outcome)?;

    match outcome.latest {
        Some(latest) => println!("{}  HI {:+}", latest.date, latest.hi),
        None => println!("no scored days in this run"),
    }
    Ok(())
}
