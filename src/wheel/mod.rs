//! Wheel filename parsing and release asset lists.
//!
//! A wheel such as `flash_attn-2.6.3+cu124torch2.5-cp311-cp311-linux_x86_64.whl`
//! encodes every version the catalog needs. Asset lists come from
//! `gh release view <tag> --json assets`.

mod assets;
mod platform;

pub use assets::{ReleaseAsset, ReleaseAssets};
pub use platform::normalize_platform_name;

use anyhow::Result;
use regex::Regex;
use std::str::FromStr;

use crate::catalog::PackageRecord;
use crate::error::CatalogError;

// ASCII digits only: version runs are split at byte offsets.
const WHEEL_PATTERN: &str = r"^([A-Za-z0-9_]+)-([0-9]+\.[0-9]+\.[0-9]+)\+cu([0-9]+)([A-Za-z]+)([0-9]+\.[0-9]+)-cp([0-9]+)-cp[0-9]+-([A-Za-z0-9_]+)\.whl$";

/// Versions encoded in a wheel filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelInfo {
    /// Distribution name (e.g., "flash_attn")
    pub package: String,
    pub component_version: String,
    /// CUDA version, dotted (e.g., "12.4")
    pub toolkit_version: String,
    /// Framework tag (e.g., "torch")
    pub framework: String,
    pub framework_version: String,
    /// Python version, dotted (e.g., "3.11")
    pub runtime_version: String,
    /// Raw platform tag (e.g., "linux_x86_64")
    pub platform: String,
}

impl WheelInfo {
    /// Convert into a catalog record for the given release link.
    pub fn to_record(&self, link: Option<&str>) -> PackageRecord {
        PackageRecord {
            component_version: self.component_version.clone(),
            runtime_version: self.runtime_version.clone(),
            framework_version: self.framework_version.clone(),
            toolkit_version: self.toolkit_version.clone(),
            os_name: normalize_platform_name(&self.platform),
            link: link.map(String::from),
        }
    }
}

/// Compiled wheel filename matcher.
pub struct WheelParser {
    pattern: Regex,
}

impl WheelParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(WHEEL_PATTERN)?,
        })
    }

    /// Parse a wheel filename.
    pub fn parse(&self, name: &str) -> Result<WheelInfo, CatalogError> {
        let unparseable = || CatalogError::UnparseableFilename {
            name: name.to_string(),
        };

        let caps = self.pattern.captures(name).ok_or_else(unparseable)?;
        let toolkit_version = split_digits(&caps[3], 2).ok_or_else(unparseable)?;
        let runtime_version = split_digits(&caps[6], 1).ok_or_else(unparseable)?;

        Ok(WheelInfo {
            package: caps[1].to_string(),
            component_version: caps[2].to_string(),
            toolkit_version,
            framework: caps[4].to_string(),
            framework_version: caps[5].to_string(),
            runtime_version,
            platform: caps[7].to_string(),
        })
    }
}

impl FromStr for WheelInfo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WheelParser::new()?.parse(s)?)
    }
}

/// Insert a dot after the first `major_len` digits (`124` → `12.4`, `311` → `3.11`).
///
/// Returns `None` when there are no digits left for the minor part.
fn split_digits(digits: &str, major_len: usize) -> Option<String> {
    if digits.len() <= major_len || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (major, minor) = digits.split_at(major_len);
    Some(format!("{}.{}", major, minor))
}
