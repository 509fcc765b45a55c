//! GraphQL payload construction

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Length of the nonce attached to every taps batch
pub const NONCE_LEN: usize = 52;

/// One GraphQL operation as the backend expects it on the wire
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub operation_name: String,
    pub variables: Value,
    pub query: String,
}

impl GraphqlRequest {
    pub fn new(operation_name: &str, variables: Value, query: &str) -> Self {
        Self {
            operation_name: operation_name.to_string(),
            variables,
            query: query.to_string(),
        }
    }

    /// Serialize into the JSON body posted to the endpoint
    pub fn to_body(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Whether a parsed response carries an application-level error marker
pub fn has_errors(body: &Value) -> bool {
    body.get("errors").map(|e| !e.is_null()).unwrap_or(false)
}

/// Random alphanumeric nonce for a taps batch
pub fn random_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_shape() {
        let request = GraphqlRequest::new(
            "QueryTelegramUserMe",
            json!({}),
            "query QueryTelegramUserMe { telegramUserMe { firstName } }",
        );
        let body = request.to_body().unwrap();

        assert_eq!(body["operationName"], "QueryTelegramUserMe");
        assert_eq!(body["variables"], json!({}));
        assert!(body["query"].as_str().unwrap().contains("telegramUserMe"));
    }

    #[test]
    fn test_has_errors() {
        assert!(has_errors(&json!({ "errors": [{ "message": "bad" }] })));
        assert!(!has_errors(&json!({ "data": { "ok": true } })));
        assert!(!has_errors(&json!({ "errors": null, "data": {} })));
    }

    #[test]
    fn test_random_nonce_shape() {
        let nonce = random_nonce();
        assert_eq!(nonce.len(), NONCE_LEN);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));

        // Two draws colliding would mean the generator is broken.
        assert_ne!(random_nonce(), random_nonce());
    }
}
