//! Package catalog derived from the README History section.
//!
//! The pipeline is: extract records from the History log, sort them, merge
//! duplicate identities, then render markdown. Every stage is a pure function
//! of its input.

mod dedup;
mod history;
mod record;
mod render;
mod sort;
mod version;

pub use dedup::merge_duplicates;
pub use history::{extract_packages, find_history_heading, has_history_section};
pub use record::{
    AggregatedEntry, COMPONENT_LABEL, DEFAULT_OS, FRAMEWORK_LABEL, IdentityKey, PackageRecord,
    RUNTIME_LABEL, TOOLKIT_LABEL,
};
pub use render::{RenderMode, package_cell, render, render_flat, render_hierarchical};
pub use sort::{SortFields, SortKey, compare_rows, release_tag_key, sort_rows};
pub use version::{VersionKey, compare_asc, compare_desc};

use log::debug;

use crate::error::{CatalogError, Result};

/// Sort and merge flat records into catalog entries.
pub fn aggregate(mut records: Vec<PackageRecord>) -> Vec<AggregatedEntry> {
    sort_rows(&mut records);
    merge_duplicates(&records)
}

/// Run the whole pipeline on a README and return the rendered catalog.
///
/// Fails with [`CatalogError::MalformedDocument`] when there is no History
/// heading and with [`CatalogError::EmptyInput`] when the section holds no
/// package rows.
#[tracing::instrument(skip(text))]
pub fn build_catalog(text: &str, mode: RenderMode) -> Result<String> {
    if !has_history_section(text) {
        return Err(CatalogError::missing_heading("## History"));
    }

    let records = extract_packages(text);
    if records.is_empty() {
        return Err(CatalogError::EmptyInput);
    }

    let entries = aggregate(records);
    debug!("Rendering {} catalog row(s) as {:?}", entries.len(), mode);
    Ok(render(&entries, mode))
}
