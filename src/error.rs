use thiserror::Error;

/// Unified error type for the Tapgrind application
#[derive(Error, Debug)]
pub enum BotError {
    // Proxy errors
    #[error("No proxies available")]
    NoProxiesAvailable,

    #[error("All proxies exhausted after {attempts} attempts")]
    AllProxiesExhausted { attempts: u32 },

    #[error("Invalid proxy address: {0}")]
    InvalidProxyAddress(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Account errors
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    // Request/response errors
    #[error("GraphQL errors in response: {0}")]
    Graphql(String),

    #[error("Missing response field: {0}")]
    MissingField(&'static str),

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Tapgrind operations
pub type Result<T> = std::result::Result<T, BotError>;

impl BotError {
    /// Check if this error only ends the current account's action chain
    ///
    /// Recoverable errors abandon the account's current pass; the process
    /// keeps looping. Non-recoverable errors are startup conditions.
    pub fn is_recoverable(&self) -> bool {
        match self {
            BotError::NoProxiesAvailable
            | BotError::AllProxiesExhausted { .. }
            | BotError::Graphql(_)
            | BotError::MissingField(_)
            | BotError::Header(_)
            | BotError::Http(_)
            | BotError::Json(_) => true,

            BotError::InvalidProxyAddress(_)
            | BotError::InvalidConfig(_)
            | BotError::InvalidAccountData(_)
            | BotError::Io(_) => false,
        }
    }
}
