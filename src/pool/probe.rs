//! Proxy liveness probing
//!
//! A proxy is considered alive when an IP-echo request routed through it
//! returns a success status and a structured success indicator in the body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::PoolConfig;
use crate::models::ProxyRecord;

/// Body shape returned by the IP-echo endpoint
#[derive(Debug, Deserialize)]
struct EchoStatus {
    status: String,
}

/// Liveness verdict for one proxy record
#[async_trait]
pub trait Prober: Send + Sync {
    async fn check(&self, record: &ProxyRecord) -> bool;
}

/// Probes proxies with a bounded-timeout HTTP GET through each candidate
pub struct HttpProber {
    echo_url: String,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            echo_url: config.probe_url.clone(),
            timeout: config.probe_timeout,
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn check(&self, record: &ProxyRecord) -> bool {
        let proxy = match record.to_proxy() {
            Ok(proxy) => proxy,
            Err(_) => return false,
        };

        let client = match Client::builder().proxy(proxy).timeout(self.timeout).build() {
            Ok(client) => client,
            Err(_) => return false,
        };

        match client.get(&self.echo_url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<EchoStatus>().await {
                    Ok(body) => {
                        let alive = body.status == "success";
                        debug!(proxy = %record, alive, "Probe completed");
                        alive
                    }
                    Err(_) => false,
                }
            }
            _ => false,
        }
    }
}
