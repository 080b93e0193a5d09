use std::sync::Mutex;

use serde_json::Value;
use then_context_core::context::{CompletionSink, InvocationContext};
use then_context_core::response::{InvocationResponse, Outcome};

/// Completion sink that captures the finalized response so the Lambda
/// handler can return it. Lambda reports results by return value rather than
/// through a callback, so the capture is read back after finalization.
pub struct ResponseCapture {
    captured: Mutex<Option<InvocationResponse>>,
}

impl ResponseCapture {
    pub fn new() -> Self {
        Self {
            captured: Mutex::new(None),
        }
    }

    pub fn take(&self) -> Option<InvocationResponse> {
        self.captured.lock().expect("poisoned mutex").take()
    }
}

impl Default for ResponseCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionSink for ResponseCapture {
    fn complete(&self, _error: Option<String>, response: InvocationResponse) {
        *self.captured.lock().expect("poisoned mutex") = Some(response);
    }
}

/// Drives one invocation through the context lifecycle and returns the
/// finalized response.
///
/// An event object carrying an `error` member with a `message` string
/// finalizes as a domain failure; any other event is echoed back as the JSON
/// success body.
pub async fn handle_invocation(
    event: Value,
    platform_context: Value,
    verbosity: u8,
) -> Result<InvocationResponse, String> {
    let capture = ResponseCapture::new();
    let mut context = InvocationContext::new(event, platform_context, &capture, verbosity)
        .promisify()
        .await;

    match error_message(&context.event) {
        Some(message) => context.finalize(Outcome::failure(message)),
        None => {
            context.response.json = Some(context.event.clone());
            context.finalize(Outcome::Success);
        }
    }

    capture
        .take()
        .ok_or_else(|| "completion sink was not invoked".to_string())
}

fn error_message(event: &Value) -> Option<String> {
    event
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use then_context_core::response::{CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};

    use super::*;

    fn content_type(response: &InvocationResponse) -> &str {
        response
            .headers
            .as_ref()
            .and_then(|headers| headers.get(CONTENT_TYPE_HEADER))
            .expect("Content-Type should be set on a finalized response")
    }

    #[tokio::test]
    async fn error_shaped_events_finalize_as_bad_request() {
        let response = handle_invocation(
            json!({"error": {"message": "mock error message"}}),
            json!({}),
            0,
        )
        .await
        .expect("handler should produce a response");

        assert_eq!(response.status_code.as_deref(), Some("400"));
        assert_eq!(response.body.as_deref(), Some("mock error message"));
        assert_eq!(content_type(&response), CONTENT_TYPE_TEXT);
    }

    #[tokio::test]
    async fn ordinary_events_are_echoed_as_json() {
        let event = json!({"whatItIs": "mock event"});
        let response = handle_invocation(event.clone(), json!({}), 0)
            .await
            .expect("handler should produce a response");

        assert_eq!(response.status_code.as_deref(), Some("200"));
        assert_eq!(response.body.as_deref(), Some(event.to_string().as_str()));
        assert_eq!(content_type(&response), CONTENT_TYPE_JSON);
    }

    #[tokio::test]
    async fn events_without_message_string_are_not_failures() {
        let response = handle_invocation(json!({"error": {"code": 42}}), json!({}), 0)
            .await
            .expect("handler should produce a response");

        assert_eq!(response.status_code.as_deref(), Some("200"));
    }

    #[test]
    fn response_capture_is_single_shot() {
        let capture = ResponseCapture::new();
        capture.complete(None, InvocationResponse::default());

        assert!(capture.take().is_some());
        assert!(capture.take().is_none());
    }
}
