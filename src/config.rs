use crate::error::{BotError, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Outbound client configuration
    pub client: ClientConfig,
    /// Proxy pool configuration
    pub pool: PoolConfig,
    /// Account runner configuration
    pub runner: RunnerConfig,
    /// Input file locations
    pub files: FileConfig,
    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL endpoint all game calls are posted to
    pub endpoint: String,
    /// Per-attempt request timeout
    pub request_timeout: Duration,
    /// Attempt budget for one logical call
    pub max_attempts: u32,
    /// Fixed backoff between failed attempts
    pub retry_backoff: Duration,
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// IP-echo endpoint used for liveness probes
    pub probe_url: String,
    /// Timeout for each liveness probe
    pub probe_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Maximum number of accounts processed simultaneously
    pub max_concurrent_accounts: usize,
    /// Idle time between full account passes
    pub idle_interval: Duration,
    /// Energy level below which tapping stops
    pub energy_floor: i64,
    /// Smallest taps-batch size
    pub taps_min: u64,
    /// Largest taps-batch size
    pub taps_max: u64,
}

#[derive(Debug, Clone)]
pub struct FileConfig {
    /// Newline-delimited proxy descriptors
    pub proxies: String,
    /// Newline-delimited account credential lines
    pub accounts: String,
    /// Newline-delimited user agents, one per account line
    pub user_agents: String,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Config {
            client: ClientConfig {
                endpoint: get_env_or("GAME_ENDPOINT", "https://api-gw-tg.memefi.club/graphql"),
                request_timeout: Duration::from_secs(
                    get_env_or("REQUEST_TIMEOUT", "10").parse().unwrap_or(10),
                ),
                max_attempts: get_env_or("MAX_ATTEMPTS", "3").parse().map_err(|_| {
                    BotError::InvalidConfig("MAX_ATTEMPTS must be a valid number".into())
                })?,
                retry_backoff: Duration::from_millis(
                    get_env_or("RETRY_BACKOFF_MS", "500").parse().unwrap_or(500),
                ),
            },
            pool: PoolConfig {
                probe_url: get_env_or("PROBE_URL", "http://ip-api.com/json"),
                probe_timeout: Duration::from_secs(
                    get_env_or("PROBE_TIMEOUT", "10").parse().unwrap_or(10),
                ),
            },
            runner: RunnerConfig {
                max_concurrent_accounts: get_env_or("MAX_CONCURRENT_ACCOUNTS", "30")
                    .parse()
                    .map_err(|_| {
                        BotError::InvalidConfig(
                            "MAX_CONCURRENT_ACCOUNTS must be a valid number".into(),
                        )
                    })?,
                idle_interval: Duration::from_secs(
                    get_env_or("IDLE_INTERVAL", "600").parse().unwrap_or(600),
                ),
                energy_floor: get_env_or("ENERGY_FLOOR", "500").parse().unwrap_or(500),
                taps_min: get_env_or("TAPS_MIN", "100").parse().unwrap_or(100),
                taps_max: get_env_or("TAPS_MAX", "200").parse().unwrap_or(200),
            },
            files: FileConfig {
                proxies: get_env_or("PROXY_FILE", "proxy.txt"),
                accounts: get_env_or("ACCOUNTS_FILE", "data.txt"),
                user_agents: get_env_or("USER_AGENTS_FILE", "useragent.txt"),
            },
            log: LogConfig {
                level: get_env_or("LOG_LEVEL", "info"),
                format: get_env_or("LOG_FORMAT", "pretty"),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.client.endpoint).map_err(|e| {
            BotError::InvalidConfig(format!("GAME_ENDPOINT must be a valid URL: {}", e))
        })?;
        Url::parse(&self.pool.probe_url).map_err(|e| {
            BotError::InvalidConfig(format!("PROBE_URL must be a valid URL: {}", e))
        })?;

        if self.client.max_attempts == 0 {
            return Err(BotError::InvalidConfig(
                "MAX_ATTEMPTS must be at least 1".into(),
            ));
        }
        if self.runner.max_concurrent_accounts == 0 {
            return Err(BotError::InvalidConfig(
                "MAX_CONCURRENT_ACCOUNTS must be at least 1".into(),
            ));
        }
        if self.runner.taps_min > self.runner.taps_max {
            return Err(BotError::InvalidConfig(
                "TAPS_MIN must not exceed TAPS_MAX".into(),
            ));
        }

        Ok(())
    }
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
