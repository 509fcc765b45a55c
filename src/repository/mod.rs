//! File-backed input sources
//!
//! All three inputs are newline-delimited text files read once at startup.
//! Parsing is split from file access so the line handling is testable
//! without touching the filesystem.

pub mod accounts;
pub mod agents;
pub mod proxies;

pub use accounts::{load_credential_lines, pair_with_accounts};
pub use agents::load_user_agents;
pub use proxies::load_proxies;

use crate::error::{BotError, Result};

/// Read a required input file, mapping failures to a configuration error
pub(crate) fn read_required(path: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| BotError::InvalidConfig(format!("cannot read {}: {}", path, e)))
}

/// Trimmed, non-empty lines of an input file
pub(crate) fn lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
