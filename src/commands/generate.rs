//! Regenerate the Packages catalog from the History section.

use anyhow::Result;
use log::{debug, info};

use super::config::Config;
use crate::{
    catalog::{RenderMode, build_catalog},
    document::splice_packages,
    runtime::{Runtime, replace_file},
};

/// What `generate` did with the rendered catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The catalog text, for printing.
    Rendered(String),
    /// The document was rewritten.
    Updated,
    /// The document already contained this catalog.
    Unchanged,
}

/// Render the catalog and either return it or splice it into the document.
#[tracing::instrument(skip(config))]
pub fn generate<R: Runtime>(
    config: &Config<R>,
    mode: RenderMode,
    update_readme: bool,
) -> Result<GenerateOutcome> {
    let text = config.read_readme()?;
    let catalog = build_catalog(&text, mode)?;

    if !update_readme {
        return Ok(GenerateOutcome::Rendered(catalog));
    }

    let updated = splice_packages(&text, &catalog)?;
    if updated == text {
        debug!("Packages section already up to date");
        return Ok(GenerateOutcome::Unchanged);
    }

    replace_file(&config.runtime, &config.readme, &updated)?;
    info!("Updated Packages section in {:?}", config.readme);
    Ok(GenerateOutcome::Updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::runtime::MockRuntime;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    const README: &str = "\
# Wheels

## Packages

## History

### v0.1.0

[Release](https://github.com/owner/repo/releases/tag/v0.1.0)

| Flash-Attention | Python | PyTorch | CUDA |
| --- | --- | --- | --- |
| 2.7.4 | 3.11 | 2.6 | 12.4 |
";

    fn runtime_with(doc: impl Into<String>) -> MockRuntime {
        let doc = doc.into();
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(move |_| Ok(doc.clone()));
        runtime
    }

    #[test]
    fn test_generate_prints_without_writing() {
        let mut runtime = runtime_with(README);
        runtime.expect_write().never();
        let config = Config::new(runtime, None);

        let outcome = generate(&config, RenderMode::Hierarchical, false).unwrap();
        match outcome {
            GenerateOutcome::Rendered(text) => {
                assert!(text.starts_with("### Linux x86_64\n"));
                assert!(text.contains("| 3.11 | 2.6 | 12.4 | [Release1]("));
            }
            other => panic!("Expected rendered catalog, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_updates_readme_atomically() {
        let mut runtime = runtime_with(README);
        let written = Arc::new(Mutex::new(String::new()));
        let written_clone = written.clone();

        runtime
            .expect_write()
            .withf(|path, _| path == Path::new("README.md.tmp"))
            .times(1)
            .returning(move |_, contents| {
                *written_clone.lock().unwrap() = String::from_utf8(contents.to_vec()).unwrap();
                Ok(())
            });
        runtime
            .expect_rename()
            .withf(|from, to| {
                from == Path::new("README.md.tmp") && to == Path::new("README.md")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let config = Config::new(runtime, None);

        let outcome = generate(&config, RenderMode::Hierarchical, true).unwrap();
        assert_eq!(outcome, GenerateOutcome::Updated);

        let doc = written.lock().unwrap().clone();
        assert!(doc.starts_with("# Wheels\n\n## Packages\n\n### Linux x86_64\n"));
        assert!(doc.ends_with(&README[README.find("## History").unwrap()..]));
    }

    #[test]
    fn test_generate_unchanged_document_is_not_rewritten() {
        let catalog = build_catalog(README, RenderMode::Hierarchical).unwrap();
        let spliced = splice_packages(README, &catalog).unwrap();

        let mut runtime = runtime_with(spliced);
        runtime.expect_write().never();
        runtime.expect_rename().never();
        let config = Config::new(runtime, None);

        let outcome = generate(&config, RenderMode::Hierarchical, true).unwrap();
        assert_eq!(outcome, GenerateOutcome::Unchanged);
    }

    #[test]
    fn test_generate_empty_history_is_distinguishable() {
        let mut runtime = runtime_with("## Packages\n\n## History\n");
        runtime.expect_write().never();
        let config = Config::new(runtime, None);

        let err = generate(&config, RenderMode::Hierarchical, true).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::EmptyInput)
        );
    }

    #[test]
    fn test_generate_missing_packages_heading_aborts_write() {
        let doc = "## History\n\n| Flash-Attention | Python | PyTorch | CUDA |\n| --- | --- | --- | --- |\n| 2.7.4 | 3.11 | 2.6 | 12.4 |\n";
        let mut runtime = runtime_with(doc);
        runtime.expect_write().never();
        let config = Config::new(runtime, None);

        let err = generate(&config, RenderMode::Hierarchical, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_generate_read_failure() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Err(anyhow::anyhow!("No such file")));
        let config = Config::new(runtime, Some(PathBuf::from("missing.md")));

        let err = generate(&config, RenderMode::Flat, false).unwrap_err();
        assert!(err.to_string().contains("missing.md"));
    }
}
