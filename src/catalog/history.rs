//! Extraction of package records from the History section of a README.
//!
//! The History section is a chronological log. Each release looks like:
//!
//! ```markdown
//! ### v0.3.0
//!
//! [Release](https://github.com/owner/repo/releases/tag/v0.3.0)
//!
//! #### Linux x86_64
//!
//! | Flash-Attention | Python | PyTorch | CUDA |
//! | --- | --- | --- | --- |
//! | 2.7.4, 2.7.3 | 3.11, 3.12 | 2.6 | 12.4 |
//! ```
//!
//! Every table row is expanded into the cross product of its comma-separated
//! cells.

use log::{debug, warn};

use super::record::{COMPONENT_LABEL, DEFAULT_OS, PackageRecord};
use crate::error::CatalogError;

/// Marker preceding the release URL of the current log entry.
const RELEASE_LINK_MARKER: &str = "[Release](";

/// Release-level context that applies to every table row below it.
#[derive(Debug, Clone)]
struct ReleaseScope {
    link: Option<String>,
    os_name: String,
}

impl Default for ReleaseScope {
    fn default() -> Self {
        Self {
            link: None,
            os_name: DEFAULT_OS.to_string(),
        }
    }
}

/// Returns the line index of the History heading, if any.
///
/// Only level-2 headings qualify, and "History" must appear as a whole word
/// (`## History`, `## Release History`, but not `## Histories`).
pub fn find_history_heading(text: &str) -> Option<usize> {
    text.lines().position(is_history_heading)
}

pub fn has_history_section(text: &str) -> bool {
    find_history_heading(text).is_some()
}

fn is_history_heading(line: &str) -> bool {
    line.trim()
        .strip_prefix("## ")
        .is_some_and(|title| {
            title
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == "History")
        })
}

/// Extract every package record from the History section.
///
/// Returns an empty list when there is no History heading or it contains no
/// package tables.
#[tracing::instrument(skip(text))]
pub fn extract_packages(text: &str) -> Vec<PackageRecord> {
    let lines: Vec<&str> = text.lines().collect();

    let Some(start) = lines.iter().position(|l| is_history_heading(l)) else {
        debug!("No History heading found");
        return Vec::new();
    };
    debug!("History section starts at line {}", start + 1);

    let mut packages = Vec::new();
    let mut scope = ReleaseScope::default();

    let mut i = start + 1;
    while i < lines.len() {
        let line = lines[i].trim();

        if line.starts_with("### ") {
            scope = ReleaseScope::default();
        } else if line.contains(RELEASE_LINK_MARKER) {
            if let Some(url) = release_link(line) {
                scope.link = Some(url.to_string());
            }
        } else if let Some(os_name) = line.strip_prefix("#### ") {
            let os_name = os_name.trim();
            scope.os_name = if os_name.is_empty() {
                DEFAULT_OS.to_string()
            } else {
                os_name.to_string()
            };
        } else if is_table_header(line) {
            i += 1;
            if i < lines.len() && is_separator_row(lines[i].trim()) {
                i += 1;
            }

            while i < lines.len() {
                let row = lines[i].trim();
                if !row.starts_with('|') {
                    break;
                }
                packages.extend(expand_row(row, &scope));
                i += 1;
            }
            continue;
        }

        i += 1;
    }

    debug!("Extracted {} package record(s)", packages.len());
    packages
}

/// The URL inside `[Release](<url>)`, if non-empty.
fn release_link(line: &str) -> Option<&str> {
    let start = line.find(RELEASE_LINK_MARKER)? + RELEASE_LINK_MARKER.len();
    let rest = &line[start..];
    let end = rest.find(')')?;
    let url = &rest[..end];
    (!url.is_empty()).then_some(url)
}

fn table_cells(row: &str) -> Vec<&str> {
    row.split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

/// A four-column data table header. The flat catalog header also starts with
/// the component label but carries OS and package columns, so it never matches.
fn is_table_header(line: &str) -> bool {
    if !line.starts_with('|') {
        return false;
    }
    let cells = table_cells(line);
    cells.len() == 4 && cells[0] == COMPONENT_LABEL
}

fn is_separator_row(line: &str) -> bool {
    line.starts_with('|')
        && line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Split a comma-separated cell into its version tokens.
fn split_versions(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .inspect(|v| {
            if let Some(err) = version_warning(v) {
                warn!("{}; it will sort after all numbered versions", err);
            }
        })
        .map(String::from)
        .collect()
}

/// The error logged for a version token with no digit run.
fn version_warning(token: &str) -> Option<CatalogError> {
    (!token.chars().any(|c| c.is_ascii_digit())).then(|| CatalogError::UnparseableVersion {
        token: token.to_string(),
    })
}

/// Expand one table row into the cross product of its four cells.
///
/// Iteration follows the column order, so the first column varies slowest.
fn expand_row(row: &str, scope: &ReleaseScope) -> Vec<PackageRecord> {
    let cells = table_cells(row);
    if cells.len() < 4 {
        debug!("Skipping table row with {} cell(s): {}", cells.len(), row);
        return Vec::new();
    }

    let components = split_versions(cells[0]);
    let runtimes = split_versions(cells[1]);
    let frameworks = split_versions(cells[2]);
    let toolkits = split_versions(cells[3]);

    let mut records = Vec::with_capacity(
        components.len() * runtimes.len() * frameworks.len() * toolkits.len(),
    );
    for component in &components {
        for runtime in &runtimes {
            for framework in &frameworks {
                for toolkit in &toolkits {
                    records.push(PackageRecord {
                        component_version: component.clone(),
                        runtime_version: runtime.clone(),
                        framework_version: framework.clone(),
                        toolkit_version: toolkit.clone(),
                        os_name: scope.os_name.clone(),
                        link: scope.link.clone(),
                    });
                }
            }
        }
    }
    records
}
