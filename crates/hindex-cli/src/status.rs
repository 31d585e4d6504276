//! The `status` command: report the latest written index point.

use std::path::PathBuf;

use anyhow::Context;
use hindex_core::artifacts::LATEST_FILE;
use hindex_core::{AppConfig, IndexPoint};

pub(crate) fn run(config: &AppConfig, data_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
    let path = dir.join(LATEST_FILE);

    if !path.exists() {
        println!("no data yet — run `hindex run` first");
        return Ok(());
    }

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let latest: IndexPoint =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    println!("{}  HI {:+}", latest.date, latest.hi);
    Ok(())
}
