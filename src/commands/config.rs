use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::{repo::RepoId, runtime::Runtime};

/// Default document, relative to the working directory.
pub const DEFAULT_README: &str = "README.md";

/// Set by GitHub Actions to `owner/repo`.
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub readme: PathBuf,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, readme: Option<PathBuf>) -> Self {
        let readme = readme.unwrap_or_else(|| PathBuf::from(DEFAULT_README));
        debug!("Using document {:?}", readme);
        Self { runtime, readme }
    }

    /// Resolve the repository from the command line, falling back to
    /// `GITHUB_REPOSITORY`.
    pub fn repo(&self, explicit: Option<&str>) -> Result<RepoId> {
        let value = match explicit {
            Some(repo) => repo.to_string(),
            None => self.runtime.env_var(REPOSITORY_ENV).with_context(|| {
                format!("No repository given; pass --repo or set {}", REPOSITORY_ENV)
            })?,
        };
        value.parse()
    }

    pub fn read_readme(&self) -> Result<String> {
        self.runtime
            .read_to_string(&self.readme)
            .with_context(|| format!("Failed to read {:?}", self.readme))
    }
}
