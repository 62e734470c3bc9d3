use anyhow::Result;
use log::debug;
use std::path::Path;

use super::history::read_existing;
use crate::{
    notes::release_notes,
    runtime::Runtime,
    wheel::{ReleaseAssets, WheelParser},
};

/// Build release notes from an asset list file.
#[tracing::instrument(skip(runtime))]
pub fn notes<R: Runtime>(runtime: &R, assets_path: &Path) -> Result<String> {
    let assets = ReleaseAssets::from_json(&read_existing(runtime, assets_path, "Assets")?)?;
    debug!("Loaded {} asset(s)", assets.assets.len());

    if assets.wheels().next().is_none() {
        anyhow::bail!("No wheel assets in {:?}", assets_path);
    }

    release_notes(&WheelParser::new()?, &assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;

    fn runtime_with(json: &'static str) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(move |_| Ok(json.to_string()));
        runtime
    }

    #[test]
    fn test_notes_renders_platform_tables() {
        let runtime = runtime_with(
            r#"{"assets": [
                {"name": "flash_attn-2.6.3+cu124torch2.5-cp311-cp311-linux_x86_64.whl"},
                {"name": "flash_attn-2.6.3+cu124torch2.5-cp311-cp311-win_amd64.whl"}
            ]}"#,
        );
        let text = notes(&runtime, Path::new("assets.json")).unwrap();
        assert!(text.starts_with("## Linux x86_64\n"));
        assert!(text.contains("## Windows x86_64\n"));
        assert!(text.contains("| 2.6.3 | 3.11 | 2.5 | 12.4 |"));
    }

    #[test]
    fn test_notes_without_wheels_fails() {
        let runtime = runtime_with(r#"{"assets": [{"name": "source.tar.gz"}]}"#);
        let err = notes(&runtime, Path::new("assets.json")).unwrap_err();
        assert!(err.to_string().contains("No wheel assets"));
    }

    #[test]
    fn test_notes_only_unparseable_wheels_fails() {
        let runtime = runtime_with(r#"{"assets": [{"name": "other-1.0-py3-none-any.whl"}]}"#);
        let err = notes(&runtime, Path::new("assets.json")).unwrap_err();
        assert!(err.to_string().contains("No wheel assets"));
    }

    #[test]
    fn test_notes_missing_file() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| false);
        let err = notes(&runtime, Path::new("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Assets file not found"));
    }
}
