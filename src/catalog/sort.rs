//! Compound ordering of catalog rows.
//!
//! Rows are ordered by:
//!
//! 1. OS name, ascending, case-insensitive
//! 2. Flash-Attention version, newest first
//! 3. Python version, newest first
//! 4. PyTorch version, newest first
//! 5. CUDA version, newest first
//! 6. Release tag in the link, newest first; rows without a tag last
//!
//! The renderer applies [`sort_rows`] again inside every group it creates, so
//! the same key has to work for flat records and merged entries alike.

use std::cmp::Ordering;

use super::record::{AggregatedEntry, PackageRecord};
use super::version::VersionKey;

/// Fields the sort key is computed from.
pub trait SortFields {
    fn os_name(&self) -> &str;
    fn component_version(&self) -> &str;
    fn runtime_version(&self) -> &str;
    fn framework_version(&self) -> &str;
    fn toolkit_version(&self) -> &str;
    /// Link used for the release-tag tie-break.
    fn sort_link(&self) -> Option<&str>;
}

impl SortFields for PackageRecord {
    fn os_name(&self) -> &str {
        &self.os_name
    }
    fn component_version(&self) -> &str {
        &self.component_version
    }
    fn runtime_version(&self) -> &str {
        &self.runtime_version
    }
    fn framework_version(&self) -> &str {
        &self.framework_version
    }
    fn toolkit_version(&self) -> &str {
        &self.toolkit_version
    }
    fn sort_link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

impl SortFields for AggregatedEntry {
    fn os_name(&self) -> &str {
        &self.key.os_name
    }
    fn component_version(&self) -> &str {
        &self.key.component_version
    }
    fn runtime_version(&self) -> &str {
        &self.key.runtime_version
    }
    fn framework_version(&self) -> &str {
        &self.key.framework_version
    }
    fn toolkit_version(&self) -> &str {
        &self.key.toolkit_version
    }
    fn sort_link(&self) -> Option<&str> {
        self.links.first().map(String::as_str)
    }
}

impl<T: SortFields + ?Sized> SortFields for &T {
    fn os_name(&self) -> &str {
        (**self).os_name()
    }
    fn component_version(&self) -> &str {
        (**self).component_version()
    }
    fn runtime_version(&self) -> &str {
        (**self).runtime_version()
    }
    fn framework_version(&self) -> &str {
        (**self).framework_version()
    }
    fn toolkit_version(&self) -> &str {
        (**self).toolkit_version()
    }
    fn sort_link(&self) -> Option<&str> {
        (**self).sort_link()
    }
}

/// Version wrapper whose natural order is newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Newest(VersionKey);

impl Ord for Newest {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_desc(&other.0)
    }
}

impl PartialOrd for Newest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Materialized sort key for one row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    os_folded: String,
    // Keeps spellings that differ only in case contiguous.
    os_exact: String,
    component: Newest,
    runtime: Newest,
    framework: Newest,
    toolkit: Newest,
    release: Newest,
}

impl SortKey {
    pub fn of<T: SortFields + ?Sized>(row: &T) -> Self {
        Self {
            os_folded: row.os_name().to_lowercase(),
            os_exact: row.os_name().to_string(),
            component: Newest(VersionKey::parse(row.component_version())),
            runtime: Newest(VersionKey::parse(row.runtime_version())),
            framework: Newest(VersionKey::parse(row.framework_version())),
            toolkit: Newest(VersionKey::parse(row.toolkit_version())),
            release: Newest(release_tag_key(row.sort_link())),
        }
    }
}

/// Version of the release tag at the end of a `.../tag/<tag>` link.
///
/// An empty key means "no parseable tag" and sorts after every real tag.
pub fn release_tag_key(link: Option<&str>) -> VersionKey {
    link.and_then(|url| url.rsplit_once("/tag/"))
        .map(|(_, tag)| tag)
        .filter(|tag| !tag.is_empty() && !tag.contains('/'))
        .map(VersionKey::parse)
        .unwrap_or_default()
}

pub fn compare_rows<T: SortFields + ?Sized>(a: &T, b: &T) -> Ordering {
    SortKey::of(a).cmp(&SortKey::of(b))
}

/// Sort rows in place by the compound catalog key. Stable.
pub fn sort_rows<T: SortFields>(rows: &mut [T]) {
    rows.sort_by_cached_key(|row| SortKey::of(row));
}
