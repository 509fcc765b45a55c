//! Proxy list source

use tracing::warn;

use super::{lines, read_required};
use crate::error::Result;
use crate::models::ProxyRecord;

/// Parse proxy descriptors, skipping malformed lines with a warning
pub fn parse_proxies(contents: &str) -> Vec<ProxyRecord> {
    lines(contents)
        .iter()
        .filter_map(|line| match ProxyRecord::parse(line) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping malformed proxy line");
                None
            }
        })
        .collect()
}

/// Load the proxy list file
pub fn load_proxies(path: &str) -> Result<Vec<ProxyRecord>> {
    Ok(parse_proxies(&read_required(path)?))
}
