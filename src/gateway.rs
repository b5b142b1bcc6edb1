use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

pub const FALLBACK_MSG: &str = "something went wrong, try again later";

/// Every operation resolves to this wrapper on the wire.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Payload<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    pub success: bool,
}

impl<T> Payload<T> {
    /// Payload for operations that must carry data on success.
    pub fn required(self) -> Result<T, GatewayError> {
        self.data.ok_or(GatewayError::MissingData)
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(FALLBACK_MSG)
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{FALLBACK_MSG}")]
    Transport(#[from] reqwest::Error),
    /// The backend rejected the operation; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("malformed backend response")]
    Malformed(#[from] serde_json::Error),
    #[error("{FALLBACK_MSG}")]
    MissingData,
}

/// The one outgoing pipeline. Every operation goes through [`Gateway::call`],
/// which attaches the bearer credential handed in by the caller (read from
/// the session at request time, never cached here) and posts to the single
/// configured endpoint. No retries, no timeout beyond the transport default.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    endpoint: String,
}

impl Gateway {
    pub fn new(endpoint: String) -> Gateway {
        Gateway {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    pub async fn call<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        op: &str,
        query: &str,
        variables: Value,
    ) -> Result<Payload<T>, GatewayError> {
        let mut req = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let body: Value = req.send().await?.error_for_status()?.json().await?;
        log::debug!("{op}: {body}");
        decode(body, op)
    }
}

/// Flattens the two failure shapes the backend can answer with (top-level
/// GraphQL errors, and `success: false` envelopes) into [`GatewayError`].
fn decode<T: DeserializeOwned>(mut body: Value, op: &str) -> Result<Payload<T>, GatewayError> {
    if let Some(first) = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        let message = first
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_MSG);
        return Err(GatewayError::Rejected(message.to_string()));
    }

    let node = body["data"][op].take();
    if node.is_null() {
        return Err(GatewayError::MissingData);
    }

    let payload: Payload<T> = serde_json::from_value(node)?;
    if !payload.success {
        return Err(GatewayError::Rejected(payload.message().to_string()));
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_comes_back_typed() {
        let body = json!({
            "data": { "availableSlots": {
                "data": ["09:00:00", "09:45:00"],
                "message": null,
                "success": true
            }}
        });
        let payload: Payload<Vec<String>> = decode(body, "availableSlots").unwrap();
        assert_eq!(payload.required().unwrap(), vec!["09:00:00", "09:45:00"]);
    }

    #[test]
    fn empty_list_is_not_an_error() {
        // "no slots available" and "query failed" must stay distinguishable
        let body = json!({
            "data": { "availableSlots": {
                "data": [],
                "message": null,
                "success": true
            }}
        });
        let payload: Payload<Vec<String>> = decode(body, "availableSlots").unwrap();
        assert_eq!(payload.required().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn rejected_envelope_carries_the_backend_message() {
        let body = json!({
            "data": { "createMeet": {
                "data": null,
                "message": "professional is not available",
                "success": false
            }}
        });
        let err = decode::<Value>(body, "createMeet").unwrap_err();
        assert_eq!(err.to_string(), "professional is not available");
    }

    #[test]
    fn rejected_envelope_without_message_uses_the_fallback() {
        let body = json!({
            "data": { "createMeet": { "data": null, "message": null, "success": false }}
        });
        let err = decode::<Value>(body, "createMeet").unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_MSG);
    }

    #[test]
    fn graphql_errors_win_over_data() {
        let body = json!({
            "errors": [{ "message": "unauthorized" }],
            "data": null
        });
        let err = decode::<Value>(body, "jobs").unwrap_err();
        assert_eq!(err.to_string(), "unauthorized");
    }

    #[test]
    fn missing_operation_node_is_missing_data() {
        let body = json!({ "data": {} });
        let err = decode::<Value>(body, "jobs").unwrap_err();
        assert!(matches!(err, GatewayError::MissingData));
    }
}
