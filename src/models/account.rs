use crate::error::{BotError, Result};
use percent_encoding::percent_decode_str;
use serde::Deserialize;

/// Placeholder for accounts that never set a username
pub const UNSET_USERNAME: &str = "username_not_set";

/// User object embedded in a credential line
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub allows_write_to_pm: bool,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub language_code: String,
}

/// One account's login credentials
///
/// Credential lines arrive doubly URL-encoded: decoding twice yields the
/// query string, whose `user` value needs one more decode before it parses
/// as JSON.
#[derive(Debug, Clone)]
pub struct Account {
    pub query_id: String,
    pub auth_date: i64,
    pub hash: String,
    /// Fully decoded JSON text of the user object, kept verbatim for the
    /// login check string
    pub user_json: String,
    pub user: TelegramUser,
}

impl Account {
    /// Parse one credential line
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(BotError::InvalidAccountData("empty line".to_string()));
        }

        let once = percent_decode_str(line)
            .decode_utf8()
            .map_err(|e| BotError::InvalidAccountData(e.to_string()))?;
        let decoded = percent_decode_str(&once)
            .decode_utf8()
            .map_err(|e| BotError::InvalidAccountData(e.to_string()))?
            .into_owned();

        let query_id = field(&decoded, "query_id")?.to_string();
        let user_raw = field(&decoded, "user")?;
        let auth_date_raw = field(&decoded, "auth_date")?;
        let hash = field(&decoded, "hash")?.to_string();

        let auth_date: i64 = auth_date_raw.parse().map_err(|_| {
            BotError::InvalidAccountData(format!("auth_date is not a number: {}", auth_date_raw))
        })?;

        let user_json = percent_decode_str(user_raw)
            .decode_utf8()
            .map_err(|e| BotError::InvalidAccountData(e.to_string()))?
            .into_owned();
        let user: TelegramUser = serde_json::from_str(&user_json)
            .map_err(|e| BotError::InvalidAccountData(format!("user object: {}", e)))?;

        Ok(Account {
            query_id,
            auth_date,
            hash,
            user_json,
            user,
        })
    }

    /// Signed-data string the login mutation expects
    pub fn check_data_string(&self) -> String {
        format!(
            "auth_date={}\nquery_id={}\nuser={}",
            self.auth_date, self.query_id, self.user_json
        )
    }

    /// Username with the unset placeholder applied
    pub fn username(&self) -> &str {
        self.user.username.as_deref().unwrap_or(UNSET_USERNAME)
    }
}

/// Extract one `key=value` field from a query string
fn field<'a>(query: &'a str, key: &str) -> Result<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .ok_or_else(|| BotError::InvalidAccountData(format!("missing field: {}", key)))
}

/// An account paired with its per-account user agent
#[derive(Debug, Clone)]
pub struct TaggedAccount {
    /// Zero-based position in the credential file
    pub index: usize,
    pub account: Account,
    pub user_agent: String,
}

impl TaggedAccount {
    /// Account-scoped log label
    pub fn tag(&self) -> String {
        format!("account {}", self.index + 1)
    }
}
