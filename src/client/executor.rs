//! Resilient request execution with proxy failover
//!
//! Every outbound call in the bot goes through [`Executor::execute`]: acquire
//! a random proxy, post the payload, and on any transport or application
//! failure permanently reject that proxy and retry with a fresh one, up to a
//! fixed attempt budget. The executor carries opaque JSON and never
//! interprets game semantics.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::client::graphql;
use crate::config::ClientConfig;
use crate::error::{BotError, Result};
use crate::models::ProxyRecord;
use crate::pool::ProxyPool;

/// One logical outbound call: target, headers, JSON body, per-attempt timeout
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    pub headers: HeaderMap,
    pub body: Value,
    pub timeout: Duration,
}

/// One attempt through one proxy
///
/// Implementations return the parsed response body on a 2xx status; anything
/// else is an error. Application-level error markers are the executor's
/// concern, not the transport's.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, proxy: &ProxyRecord, spec: &RequestSpec) -> Result<Value>;
}

/// Production transport: a fresh reqwest client per attempt, routed through
/// the acquired proxy
pub struct HttpTransport;

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, proxy: &ProxyRecord, spec: &RequestSpec) -> Result<Value> {
        let client = reqwest::Client::builder()
            .proxy(proxy.to_proxy()?)
            .timeout(spec.timeout)
            .build()?;

        let response = client
            .post(&spec.url)
            .headers(spec.headers.clone())
            .json(&spec.body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }
}

/// Executes calls with automatic proxy rotation and a fixed attempt budget
pub struct Executor {
    pool: Arc<ProxyPool>,
    transport: Arc<dyn Transport>,
    max_attempts: u32,
    backoff: Duration,
}

impl Executor {
    pub fn new(pool: Arc<ProxyPool>, config: &ClientConfig) -> Self {
        Self {
            pool,
            transport: Arc::new(HttpTransport),
            max_attempts: config.max_attempts,
            backoff: config.retry_backoff,
        }
    }

    /// Build an executor over a custom transport
    pub fn with_transport(
        pool: Arc<ProxyPool>,
        transport: Arc<dyn Transport>,
        max_attempts: u32,
        backoff: Duration,
    ) -> Self {
        Self {
            pool,
            transport,
            max_attempts,
            backoff,
        }
    }

    /// Execute one logical call with proxy failover
    ///
    /// Returns the parsed response body on the first successful attempt. A
    /// pool exhausted mid-call aborts immediately; a consumed attempt budget
    /// maps to `AllProxiesExhausted`. Either way the caller abandons the
    /// current action chain.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<Value> {
        for attempt in 1..=self.max_attempts {
            let Some(proxy) = self.pool.acquire() else {
                warn!("No proxies available, aborting call");
                return Err(BotError::NoProxiesAvailable);
            };

            match self.transport.send(&proxy, spec).await {
                Ok(body) if !graphql::has_errors(&body) => {
                    debug!(attempt, proxy = %proxy, "Call succeeded");
                    return Ok(body);
                }
                Ok(_) => {
                    warn!(attempt, proxy = %proxy, "Response carried errors, rotating proxy");
                    self.pool.reject(&proxy);
                }
                Err(e) => {
                    warn!(attempt, proxy = %proxy, error = %e, "Attempt failed, rotating proxy");
                    self.pool.reject(&proxy);
                }
            }

            if attempt < self.max_attempts {
                sleep(self.backoff).await;
            }
        }

        Err(BotError::AllProxiesExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Prober;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct AlwaysUp;

    #[async_trait]
    impl Prober for AlwaysUp {
        async fn check(&self, _record: &ProxyRecord) -> bool {
            true
        }
    }

    async fn test_pool(count: usize) -> Arc<ProxyPool> {
        let records = (0..count)
            .map(|i| ProxyRecord::parse(&format!("10.0.0.{}:8080", i + 1)).unwrap())
            .collect();
        let pool = Arc::new(ProxyPool::new(records));
        pool.validate_all(&AlwaysUp).await;
        pool
    }

    fn spec() -> RequestSpec {
        RequestSpec {
            url: "https://game.example/graphql".to_string(),
            headers: HeaderMap::new(),
            body: json!({ "operationName": "Test" }),
            timeout: Duration::from_secs(1),
        }
    }

    struct FailingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(&self, _proxy: &ProxyRecord, _spec: &RequestSpec) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(BotError::Graphql("connection refused".to_string()))
        }
    }

    struct SucceedAt {
        at: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for SucceedAt {
        async fn send(&self, _proxy: &ProxyRecord, _spec: &RequestSpec) -> Result<Value> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.at {
                Ok(json!({ "data": { "ok": true } }))
            } else {
                Err(BotError::Graphql("connection refused".to_string()))
            }
        }
    }

    struct ErrorBodyTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for ErrorBodyTransport {
        async fn send(&self, _proxy: &ProxyRecord, _spec: &RequestSpec) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "errors": [{ "message": "unauthorized" }] }))
        }
    }

    #[tokio::test]
    async fn test_attempt_budget_consumed() {
        let pool = test_pool(5).await;
        let transport = Arc::new(FailingTransport {
            calls: AtomicUsize::new(0),
        });
        let executor = Executor::with_transport(
            Arc::clone(&pool),
            Arc::clone(&transport) as Arc<dyn Transport>,
            3,
            Duration::from_millis(0),
        );

        let result = executor.execute(&spec()).await;

        assert!(matches!(
            result,
            Err(BotError::AllProxiesExhausted { attempts: 3 })
        ));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
        // Each failed attempt permanently rejected its proxy.
        assert_eq!(pool.available_count(), 2);
    }

    #[tokio::test]
    async fn test_success_short_circuits() {
        let pool = test_pool(5).await;
        let transport = Arc::new(SucceedAt {
            at: 2,
            calls: AtomicUsize::new(0),
        });
        let executor = Executor::with_transport(
            Arc::clone(&pool),
            Arc::clone(&transport) as Arc<dyn Transport>,
            3,
            Duration::from_millis(0),
        );

        let body = executor.execute(&spec()).await.unwrap();

        assert_eq!(body["data"]["ok"], true);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
        assert_eq!(pool.available_count(), 4);
    }

    #[tokio::test]
    async fn test_empty_pool_aborts_without_attempts() {
        let pool = Arc::new(ProxyPool::new(Vec::new()));
        let transport = Arc::new(FailingTransport {
            calls: AtomicUsize::new(0),
        });
        let executor = Executor::with_transport(
            pool,
            Arc::clone(&transport) as Arc<dyn Transport>,
            3,
            Duration::from_millis(0),
        );

        let result = executor.execute(&spec()).await;

        assert!(matches!(result, Err(BotError::NoProxiesAvailable)));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_application_errors_rotate_proxies() {
        let pool = test_pool(5).await;
        let transport = Arc::new(ErrorBodyTransport {
            calls: AtomicUsize::new(0),
        });
        let executor = Executor::with_transport(
            Arc::clone(&pool),
            Arc::clone(&transport) as Arc<dyn Transport>,
            3,
            Duration::from_millis(0),
        );

        let result = executor.execute(&spec()).await;

        assert!(matches!(result, Err(BotError::AllProxiesExhausted { .. })));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
        assert_eq!(pool.available_count(), 2);
    }

    #[tokio::test]
    async fn test_mid_call_exhaustion_aborts() {
        // Two proxies, three attempts: the third acquisition finds an empty
        // pool and aborts instead of retrying without a proxy.
        let pool = test_pool(2).await;
        let transport = Arc::new(FailingTransport {
            calls: AtomicUsize::new(0),
        });
        let executor = Executor::with_transport(
            Arc::clone(&pool),
            Arc::clone(&transport) as Arc<dyn Transport>,
            3,
            Duration::from_millis(0),
        );

        let result = executor.execute(&spec()).await;

        assert!(matches!(result, Err(BotError::NoProxiesAvailable)));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
        assert_eq!(pool.available_count(), 0);
    }
}
