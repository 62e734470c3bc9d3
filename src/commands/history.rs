//! Add the History entry for a release.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

use super::config::Config;
use crate::{
    document::{build_history_entry, update_history},
    notes::{history_body_from_assets, history_body_from_notes},
    runtime::{Runtime, replace_file},
    wheel::{ReleaseAssets, WheelParser},
};

/// Where the body of the History entry comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySource {
    /// `gh release view --json assets` output.
    Assets(PathBuf),
    /// Existing release notes; `None` reads them from stdin.
    Notes(Option<PathBuf>),
}

impl HistorySource {
    /// Build from the `--assets` / `--notes` pair; `-` means stdin.
    pub fn from_args(assets: Option<PathBuf>, notes: Option<String>) -> Result<Self> {
        match (notes, assets) {
            (Some(notes), _) if notes == "-" => Ok(HistorySource::Notes(None)),
            (Some(notes), _) => Ok(HistorySource::Notes(Some(PathBuf::from(notes)))),
            (None, Some(assets)) => Ok(HistorySource::Assets(assets)),
            (None, None) => anyhow::bail!("Either --notes or --assets must be provided"),
        }
    }
}

/// Outcome of a History update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutcome {
    Inserted,
    Unchanged,
}

pub(crate) fn read_existing<R: Runtime>(runtime: &R, path: &Path, what: &str) -> Result<String> {
    if !runtime.exists(path) {
        anyhow::bail!("{} file not found: {:?}", what, path);
    }
    runtime
        .read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))
}

fn history_body<R: Runtime>(runtime: &R, source: &HistorySource) -> Result<String> {
    match source {
        HistorySource::Notes(path) => {
            let notes = match path {
                Some(path) => read_existing(runtime, path, "Notes")?,
                None => runtime.read_stdin()?,
            };
            Ok(history_body_from_notes(&notes))
        }
        HistorySource::Assets(path) => {
            let assets = ReleaseAssets::from_json(&read_existing(runtime, path, "Assets")?)?;
            debug!("Loaded {} asset(s) from {:?}", assets.assets.len(), path);
            history_body_from_assets(&WheelParser::new()?, &assets)
        }
    }
}

/// Insert (or replace) the History entry for `tag` in the document.
#[tracing::instrument(skip(config))]
pub fn history<R: Runtime>(
    config: &Config<R>,
    tag: &str,
    repo: Option<&str>,
    source: &HistorySource,
) -> Result<HistoryOutcome> {
    let repo = config.repo(repo)?;
    let body = history_body(&config.runtime, source)?;
    let entry = build_history_entry(tag, &repo, &body);

    let content = config.read_readme()?;
    let updated = update_history(&content, tag, &entry)?;

    if updated == content {
        debug!("History entry for {} already present", tag);
        return Ok(HistoryOutcome::Unchanged);
    }

    replace_file(&config.runtime, &config.readme, &updated)?;
    info!("Inserted history for {} into {:?}", tag, config.readme);
    Ok(HistoryOutcome::Inserted)
}
