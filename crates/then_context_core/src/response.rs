use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";
pub const DEFAULT_OK_BODY: &str = "{\"result\":\"Ok\"}";
pub const STATUS_OK: &str = "200";
pub const STATUS_BAD_REQUEST: &str = "400";

/// Mutable response accumulator. Handlers fill fields directly before
/// finalization; `normalize_response` fills whatever is still absent.
///
/// Status codes are carried as strings, matching the gateway contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvocationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    /// Staging field for a JSON success body. When set and no body has been
    /// written, finalization serializes it into `body`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

/// Terminal result of one invocation, passed to
/// [`crate::context::InvocationContext::finalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Domain error. The message becomes the response body; the failure is
    /// still delivered through the normal completion channel, never as a
    /// transport error.
    Failure { message: String },
}

impl Outcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failure { message } => Some(message),
            Self::Success => None,
        }
    }
}

/// Single-pass normalization applied immediately before the completion sink
/// is invoked. Defaults only fill absent fields; anything the handler set
/// beforehand survives, with two deliberate exceptions:
///
/// - a failure message always overwrites the body, and
/// - an empty-string body counts as unset and is replaced by the default
///   success body.
pub fn normalize_response(response: &mut InvocationResponse, outcome: &Outcome) {
    let mut content_type = CONTENT_TYPE_TEXT;

    match outcome {
        Outcome::Failure { message } => {
            response.body = Some(message.clone());
        }
        Outcome::Success => {
            let body_present = response
                .body
                .as_deref()
                .map(|body| !body.is_empty())
                .unwrap_or(false);
            if !body_present {
                content_type = CONTENT_TYPE_JSON;
                response.body = Some(match &response.json {
                    Some(value) => value.to_string(),
                    None => DEFAULT_OK_BODY.to_string(),
                });
            }
        }
    }

    response
        .headers
        .get_or_insert_with(BTreeMap::new)
        .entry(CONTENT_TYPE_HEADER.to_string())
        .or_insert_with(|| content_type.to_string());

    if response.status_code.is_none() {
        response.status_code = Some(
            match outcome {
                Outcome::Failure { .. } => STATUS_BAD_REQUEST,
                Outcome::Success => STATUS_OK,
            }
            .to_string(),
        );
    }
}
