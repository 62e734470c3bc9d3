//! Runtime abstraction for system operations.
//!
//! Commands only touch the outside world through [`Runtime`], so they can be
//! tested against a mock.
//!
//! # Structure
//!
//! - `env` - Environment variables
//! - `fs` - File system operations (read, write, rename, atomic replace)
//! - `stdin` - Reading piped input

mod env;
mod fs;
mod stdin;

use anyhow::{Context, Result};
use log::debug;
use std::env as std_env;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    // Input
    /// Read all of standard input.
    fn read_stdin(&self) -> Result<String>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename_impl(from, to)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn read_stdin(&self) -> Result<String> {
        self.read_stdin_impl()
    }
}

/// Sibling path used while replacing `path`.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the file at `path` with `contents` in one step.
///
/// The new contents are written next to the target and renamed over it, so
/// readers see either the old or the new document, never a partial one.
#[tracing::instrument(skip(runtime, contents))]
pub fn replace_file<R: Runtime + ?Sized>(runtime: &R, path: &Path, contents: &str) -> Result<()> {
    let staging = staging_path(path);
    debug!("Writing {} byte(s) to {:?}", contents.len(), staging);
    runtime
        .write(&staging, contents.as_bytes())
        .with_context(|| format!("Failed to write {:?}", staging))?;

    if let Err(e) = runtime.rename(&staging, path) {
        if let Err(cleanup) = runtime.remove_file(&staging) {
            debug!("Failed to remove {:?}: {}", staging, cleanup);
        }
        return Err(e).with_context(|| format!("Failed to replace {:?}", path));
    }
    Ok(())
}
