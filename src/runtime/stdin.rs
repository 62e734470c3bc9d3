//! Reading piped input (release notes passed as `--notes -`).

use anyhow::{Context, Result};

use super::RealRuntime;

use std::io::{self, Read};

/// Read everything from any reader as UTF-8 text.
pub(crate) fn read_all<R: Read>(input: &mut R) -> Result<String> {
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .context("Failed to read input as UTF-8 text")?;
    Ok(buf)
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_stdin_impl(&self) -> Result<String> {
        let stdin = io::stdin();
        let mut stdin_lock = stdin.lock();
        read_all(&mut stdin_lock)
    }
}
