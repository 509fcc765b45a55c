//! Upstream proxy pool
//!
//! Owns the loaded proxy records and the subset that passed the startup
//! liveness probe. Proxies rejected in use never re-enter the valid set.

pub mod probe;

pub use probe::{HttpProber, Prober};

use std::sync::Arc;

use futures::future::join_all;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::models::ProxyRecord;

/// Pool of upstream proxies with a mutex-guarded valid subset
///
/// `acquire` and `reject` are safe under concurrent invocation from many
/// account tasks; the valid set is always a subset of the loaded set.
pub struct ProxyPool {
    loaded: Vec<Arc<ProxyRecord>>,
    valid: RwLock<Vec<Arc<ProxyRecord>>>,
}

impl ProxyPool {
    /// Create a pool from parsed records; the valid set starts empty until
    /// `validate_all` runs
    pub fn new(records: Vec<ProxyRecord>) -> Self {
        Self {
            loaded: records.into_iter().map(Arc::new).collect(),
            valid: RwLock::new(Vec::new()),
        }
    }

    /// Number of records loaded from the source list
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of currently usable proxies
    pub fn available_count(&self) -> usize {
        self.valid.read().len()
    }

    /// Probe every loaded record concurrently and keep the ones that pass
    ///
    /// Runs once at startup; blocks until all probes complete.
    pub async fn validate_all<P: Prober>(&self, prober: &P) {
        info!("Validating {} proxies", self.loaded.len());

        let checks = self.loaded.iter().map(|record| {
            let record = Arc::clone(record);
            async move {
                let alive = prober.check(&record).await;
                (record, alive)
            }
        });

        let results = join_all(checks).await;

        let mut valid = Vec::new();
        for (record, alive) in results {
            if alive {
                valid.push(record);
            } else {
                warn!(proxy = %record, "Proxy failed liveness probe");
            }
        }

        info!(
            "Proxy validation complete: {}/{} usable",
            valid.len(),
            self.loaded.len()
        );

        *self.valid.write() = valid;
    }

    /// Uniformly random usable proxy, or `None` when the pool is exhausted
    pub fn acquire(&self) -> Option<Arc<ProxyRecord>> {
        let valid = self.valid.read();
        valid.choose(&mut rand::thread_rng()).cloned()
    }

    /// Permanently remove a proxy from the valid set
    ///
    /// Idempotent: rejecting an already-absent record is a no-op.
    pub fn reject(&self, record: &ProxyRecord) {
        let mut valid = self.valid.write();
        let before = valid.len();
        valid.retain(|candidate| candidate.as_ref() != record);

        if valid.len() < before {
            warn!(proxy = %record, remaining = valid.len(), "Proxy rejected");
            if valid.is_empty() {
                warn!("Proxy pool exhausted");
            }
        }
    }
}
