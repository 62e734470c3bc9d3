//! Command implementations behind the CLI subcommands.

pub mod config;
mod generate;
mod history;
mod notes;

pub use config::Config;
pub use generate::{GenerateOutcome, generate};
pub use history::{HistoryOutcome, HistorySource, history};
pub use notes::notes;
