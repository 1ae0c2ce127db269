//! Relay wire types (success and error envelopes).

use serde::{Deserialize, Serialize};

/// Status literal returned when the upstream call succeeded.
pub const STATUS_FORWARDED: &str = "Forwarded Successfully";

/// Status literal returned when the upstream call failed.
pub const STATUS_FORWARD_FAILED: &str = "Forward Failed";

/// Success envelope: `{ "processedMessage", "status" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// The upstream service's response body.
    pub processed_message: String,
    pub status: String,
}

impl MessageResponse {
    pub fn forwarded(processed_message: impl Into<String>) -> Self {
        Self {
            processed_message: processed_message.into(),
            status: STATUS_FORWARDED.to_string(),
        }
    }
}

/// Error envelope: `{ "error", "status" }`, sent with a 502/504 status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn forward_failed(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: STATUS_FORWARD_FAILED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_response_serializes_camel_case() {
        let res = MessageResponse::forwarded("OK-123");
        let json = serde_json::to_string(&res).expect("serialize");
        assert_eq!(
            json,
            r#"{"processedMessage":"OK-123","status":"Forwarded Successfully"}"#
        );
    }

    #[test]
    fn error_response_serializes_camel_case() {
        let res = ErrorResponse::forward_failed("upstream request failed: connect refused");
        let json = serde_json::to_string(&res).expect("serialize");
        assert_eq!(
            json,
            r#"{"error":"upstream request failed: connect refused","status":"Forward Failed"}"#
        );
    }
}
