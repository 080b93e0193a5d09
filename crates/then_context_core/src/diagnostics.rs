//! Structured diagnostic records for finalized invocations.
//!
//! Records are JSON objects written one per line to stderr, where the host
//! runtime's log collection picks them up. Output volume is gated by the
//! verbosity level injected into the context:
//!
//! - a domain error is always recorded
//! - `>= 1` adds the event and the normalized response
//! - `>= 2` adds the platform context
//! - `>= 3` adds the full process environment
//!
//! Diagnostics never feed back into the response or the completion sink.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::response::{InvocationResponse, Outcome};

const COMPONENT: &str = "invocation_context";

pub(crate) fn emit_finalize_diagnostics(
    outcome: &Outcome,
    event: &Value,
    platform_context: &Value,
    response: &InvocationResponse,
    verbosity: u8,
) {
    if let Some(message) = outcome.error_message() {
        emit(error_record("domain_error", json!({ "message": message })));
    }
    if verbosity >= 1 {
        emit(info_record("event", event.clone()));
        emit(info_record("response", json!(response)));
    }
    if verbosity >= 2 {
        emit(info_record("platform_context", platform_context.clone()));
    }
    if verbosity >= 3 {
        let environment: BTreeMap<String, String> = std::env::vars().collect();
        emit(info_record("environment", json!(environment)));
    }
}

fn info_record(event: &str, details: Value) -> Value {
    json!({
        "component": COMPONENT,
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    })
}

fn error_record(event: &str, details: Value) -> Value {
    json!({
        "component": COMPONENT,
        "level": "error",
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    })
}

fn emit(record: Value) {
    eprintln!("{record}");
}
