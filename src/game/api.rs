//! Account-scoped operations against the game backend
//!
//! Every operation authenticates first (tokens are re-fetched per call, not
//! cached), stamps a fresh randomized header set, and goes through the
//! resilient executor.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::client::executor::{Executor, RequestSpec};
use crate::client::{graphql, headers, queries, GraphqlRequest};
use crate::config::ClientConfig;
use crate::error::{BotError, Result};
use crate::models::account::TaggedAccount;
use crate::models::game::{BoosterResult, GameState, TapsBatchResult, UserProfile};

/// Booster kinds accepted by the activation mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoosterKind {
    Recharge,
    Turbo,
}

impl BoosterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoosterKind::Recharge => "Recharge",
            BoosterKind::Turbo => "Turbo",
        }
    }
}

/// One account's view of the backend
pub struct GameApi {
    executor: Arc<Executor>,
    config: ClientConfig,
    account: TaggedAccount,
}

impl GameApi {
    pub fn new(executor: Arc<Executor>, config: ClientConfig, account: TaggedAccount) -> Self {
        Self {
            executor,
            config,
            account,
        }
    }

    /// Account-scoped log label
    pub fn tag(&self) -> String {
        self.account.tag()
    }

    fn spec(&self, headers: reqwest::header::HeaderMap, body: Value) -> RequestSpec {
        RequestSpec {
            url: self.config.endpoint.clone(),
            headers,
            body,
            timeout: self.config.request_timeout,
        }
    }

    /// Authenticate and return a fresh bearer token
    pub async fn login(&self) -> Result<String> {
        let account = &self.account.account;
        let variables = json!({
            "webAppData": {
                "auth_date": account.auth_date,
                "hash": account.hash,
                "query_id": account.query_id,
                "checkDataString": account.check_data_string(),
                "user": {
                    "id": account.user.id,
                    "allows_write_to_pm": account.user.allows_write_to_pm,
                    "first_name": account.user.first_name,
                    "last_name": account.user.last_name,
                    "username": account.username(),
                    "language_code": account.user.language_code,
                    "version": "7.2",
                    "platform": "ios"
                }
            }
        });

        let body =
            GraphqlRequest::new("MutationTelegramUserLogin", variables, queries::LOGIN).to_body()?;
        let request_headers = headers::random_headers(&self.account.user_agent)?;
        let response = self.executor.execute(&self.spec(request_headers, body)).await?;

        let token = response
            .pointer("/data/telegramUserLogin/access_token")
            .and_then(Value::as_str)
            .ok_or(BotError::MissingField("data.telegramUserLogin.access_token"))?;

        Ok(token.to_string())
    }

    async fn call_authed(&self, operation: &str, variables: Value, query: &str) -> Result<Value> {
        let token = self.login().await?;

        let mut request_headers = headers::random_headers(&self.account.user_agent)?;
        request_headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))?,
        );

        let body = GraphqlRequest::new(operation, variables, query).to_body()?;
        self.executor.execute(&self.spec(request_headers, body)).await
    }

    /// Fetch the account's profile
    pub async fn me(&self) -> Result<UserProfile> {
        let response = self
            .call_authed("QueryTelegramUserMe", json!({}), queries::USER_ME)
            .await?;
        extract(&response, "/data/telegramUserMe", "data.telegramUserMe")
    }

    /// Fetch the current game state
    pub async fn game_state(&self) -> Result<GameState> {
        let response = self
            .call_authed("QUERY_GAME_CONFIG", json!({}), queries::GAME_CONFIG)
            .await?;
        extract(
            &response,
            "/data/telegramGameGetConfig",
            "data.telegramGameGetConfig",
        )
    }

    /// Submit one taps batch with a fresh nonce
    pub async fn submit_taps(&self, taps: u64) -> Result<TapsBatchResult> {
        let variables = json!({
            "payload": {
                "nonce": graphql::random_nonce(),
                "tapsCount": taps
            }
        });
        let response = self
            .call_authed(
                "MutationGameProcessTapsBatch",
                variables,
                queries::PROCESS_TAPS_BATCH,
            )
            .await?;
        extract(
            &response,
            "/data/telegramGameProcessTapsBatch",
            "data.telegramGameProcessTapsBatch",
        )
    }

    /// Activate a free booster
    pub async fn activate_booster(&self, kind: BoosterKind) -> Result<BoosterResult> {
        let variables = json!({ "boosterType": kind.as_str() });
        let response = self
            .call_authed(
                "telegramGameActivateBooster",
                variables,
                queries::ACTIVATE_BOOSTER,
            )
            .await?;
        extract(
            &response,
            "/data/telegramGameActivateBooster",
            "data.telegramGameActivateBooster",
        )
    }

    /// Advance to the next boss; idempotent on a dead boss
    pub async fn set_next_boss(&self) -> Result<()> {
        let response = self
            .call_authed("telegramGameSetNextBoss", json!({}), queries::SET_NEXT_BOSS)
            .await?;

        if response.pointer("/data").filter(|v| !v.is_null()).is_none() {
            return Err(BotError::MissingField("data.telegramGameSetNextBoss"));
        }

        Ok(())
    }
}

/// Pull a typed node out of a response body
fn extract<T: DeserializeOwned>(response: &Value, pointer: &str, field: &'static str) -> Result<T> {
    let node = response
        .pointer(pointer)
        .filter(|v| !v.is_null())
        .ok_or(BotError::MissingField(field))?;
    Ok(serde_json::from_value(node.clone())?)
}
