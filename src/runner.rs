//! Fleet orchestration
//!
//! Scans every account, then plays each one under a bounded concurrency cap,
//! then idles and re-scans forever. Account tasks are isolated: a failing or
//! panicking account is logged and the batch continues.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::client::Executor;
use crate::config::Config;
use crate::game::{Driver, GameApi};
use crate::models::account::TaggedAccount;
use crate::models::game::UserProfile;
use crate::pool::ProxyPool;

pub struct Runner {
    config: Arc<Config>,
    executor: Arc<Executor>,
    accounts: Vec<TaggedAccount>,
}

impl Runner {
    pub fn new(config: Arc<Config>, pool: Arc<ProxyPool>, accounts: Vec<TaggedAccount>) -> Self {
        let executor = Arc::new(Executor::new(pool, &config.client));
        Self {
            config,
            executor,
            accounts,
        }
    }

    /// Run the account loop forever
    pub async fn run(&self) {
        loop {
            self.run_pass().await;

            info!(
                "All accounts processed, idling for {}s",
                self.config.runner.idle_interval.as_secs()
            );
            sleep(self.config.runner.idle_interval).await;
        }
    }

    /// One full pass over every account
    async fn run_pass(&self) {
        let ready = self.check_accounts().await;
        info!("{}/{} accounts ready", ready.len(), self.accounts.len());

        let semaphore = Arc::new(Semaphore::new(self.config.runner.max_concurrent_accounts));
        let mut handles = Vec::with_capacity(ready.len());

        for (account, profile) in ready {
            let semaphore = Arc::clone(&semaphore);
            let executor = Arc::clone(&self.executor);
            let config = Arc::clone(&self.config);

            handles.push(tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };

                let tag = format!(
                    "{}: {} {}",
                    account.tag(),
                    profile.first_name,
                    profile.last_name
                );
                let api = GameApi::new(executor, config.client.clone(), account);
                let driver = Driver::new(api, config.runner.clone());

                if let Err(e) = driver.run_pass().await {
                    warn!(account = %tag, error = %e, "Account pass abandoned");
                }
            }));
        }

        // One account's panic never aborts the batch.
        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Account task panicked");
            }
        }
    }

    /// Concurrently fetch every account's profile, dropping the ones whose
    /// credentials the backend rejects
    async fn check_accounts(&self) -> Vec<(TaggedAccount, UserProfile)> {
        let checks = self.accounts.iter().map(|account| {
            let api = GameApi::new(
                Arc::clone(&self.executor),
                self.config.client.clone(),
                account.clone(),
            );
            async move {
                match api.me().await {
                    Ok(profile) => Some((account.clone(), profile)),
                    Err(e) => {
                        warn!(account = %account.tag(), error = %e, "Profile check failed, skipping account");
                        None
                    }
                }
            }
        });

        join_all(checks).await.into_iter().flatten().collect()
    }
}
