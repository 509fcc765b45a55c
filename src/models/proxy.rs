use crate::error::{BotError, Result};
use std::fmt;

/// One upstream proxy descriptor
///
/// Parsed from a newline-delimited list; credentials are optional and never
/// included in the display form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyRecord {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxyRecord {
    /// Parse a `host:port` or `host:port:username:password` descriptor
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let parts: Vec<&str> = line.split(':').collect();

        let (host, port, username, password) = match parts.as_slice() {
            [host, port] => (*host, *port, None, None),
            [host, port, username, password] => {
                (*host, *port, Some(username.to_string()), Some(password.to_string()))
            }
            _ => return Err(BotError::InvalidProxyAddress(line.to_string())),
        };

        if host.is_empty() {
            return Err(BotError::InvalidProxyAddress(line.to_string()));
        }

        let port: u16 = port
            .parse()
            .map_err(|_| BotError::InvalidProxyAddress(line.to_string()))?;

        Ok(ProxyRecord {
            host: host.to_string(),
            port,
            username,
            password,
        })
    }

    /// The `http://host:port` form used to route requests
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Build a reqwest proxy routing all traffic through this record
    pub fn to_proxy(&self) -> Result<reqwest::Proxy> {
        let proxy = reqwest::Proxy::all(self.url())
            .map_err(|e| BotError::InvalidProxyAddress(e.to_string()))?;

        Ok(match (&self.username, &self.password) {
            (Some(username), Some(password)) => proxy.basic_auth(username, password),
            _ => proxy,
        })
    }

    pub fn has_auth(&self) -> bool {
        self.username.is_some()
    }
}

impl fmt::Display for ProxyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
