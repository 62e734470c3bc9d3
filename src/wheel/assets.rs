use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub url: String,
}

impl ReleaseAsset {
    pub fn is_wheel(&self) -> bool {
        self.name.ends_with(".whl")
    }
}

/// Output of `gh release view --json assets`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReleaseAssets {
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseAssets {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse release assets JSON")
    }

    pub fn wheels(&self) -> impl Iterator<Item = &ReleaseAsset> {
        self.assets.iter().filter(|a| a.is_wheel())
    }
}
