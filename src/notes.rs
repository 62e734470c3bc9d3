//! Per-release summaries of the wheels attached to a release.
//!
//! The same tables serve as GitHub release notes (`## <platform>` headings)
//! and as the body of a History entry (`#### <platform>` headings).

use anyhow::{Result, bail};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{COMPONENT_LABEL, FRAMEWORK_LABEL, RUNTIME_LABEL, TOOLKIT_LABEL, compare_asc};
use crate::wheel::{ReleaseAssets, WheelParser, normalize_platform_name};

/// Versions seen for one platform within a release.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformVersions {
    pub components: BTreeSet<String>,
    pub runtimes: BTreeSet<String>,
    pub frameworks: BTreeSet<String>,
    pub toolkits: BTreeSet<String>,
}

/// Group the wheel assets of a release by display platform name.
///
/// Assets that are not wheels, or whose names do not parse, are skipped.
pub fn collect_versions(
    parser: &WheelParser,
    assets: &ReleaseAssets,
) -> BTreeMap<String, PlatformVersions> {
    let mut aggregated: BTreeMap<String, PlatformVersions> = BTreeMap::new();

    for asset in assets.wheels() {
        let info = match parser.parse(&asset.name) {
            Ok(info) => info,
            Err(e) => {
                debug!("Skipping asset: {}", e);
                continue;
            }
        };

        let data = aggregated
            .entry(normalize_platform_name(&info.platform))
            .or_default();
        data.components.insert(info.component_version);
        data.runtimes.insert(info.runtime_version);
        data.frameworks.insert(info.framework_version);
        data.toolkits.insert(info.toolkit_version);
    }

    aggregated
}

/// Comma-join versions oldest first, or `-` when there are none.
fn format_versions(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| compare_asc(a, b));
    sorted.join(", ")
}

/// Render one summary table per platform under a heading of the given level.
pub fn render_platform_tables(
    aggregated: &BTreeMap<String, PlatformVersions>,
    heading_level: usize,
) -> Result<String> {
    if aggregated.is_empty() {
        bail!("No wheel assets found");
    }

    let hashes = "#".repeat(heading_level);
    let mut lines: Vec<String> = Vec::new();
    for (platform, data) in aggregated {
        lines.push(format!("{} {}", hashes, platform));
        lines.push(String::new());
        lines.push(format!(
            "| {} | {} | {} | {} |",
            COMPONENT_LABEL, RUNTIME_LABEL, FRAMEWORK_LABEL, TOOLKIT_LABEL
        ));
        lines.push("| --- | --- | --- | --- |".to_string());
        lines.push(format!(
            "| {} | {} | {} | {} |",
            format_versions(&data.components),
            format_versions(&data.runtimes),
            format_versions(&data.frameworks),
            format_versions(&data.toolkits)
        ));
        lines.push(String::new());
    }

    Ok(lines.join("\n").trim().to_string())
}

/// Release notes for a GitHub release page.
pub fn release_notes(parser: &WheelParser, assets: &ReleaseAssets) -> Result<String> {
    render_platform_tables(&collect_versions(parser, assets), 2)
}

/// History entry body built from a release's assets.
pub fn history_body_from_assets(parser: &WheelParser, assets: &ReleaseAssets) -> Result<String> {
    render_platform_tables(&collect_versions(parser, assets), 4)
}

/// Demote the `## <platform>` headings of existing release notes to `####`.
pub fn history_body_from_notes(notes: &str) -> String {
    notes
        .lines()
        .map(|line| match line.strip_prefix("## ") {
            Some(rest) => format!("#### {}", rest),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
