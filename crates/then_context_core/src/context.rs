use std::future::Future;

use serde_json::Value;

use crate::diagnostics;
use crate::response::{normalize_response, InvocationResponse, Outcome};

/// Completion callback supplied by the host runtime. The first argument is
/// reserved for transport-level errors and is always `None`; domain errors
/// arrive folded into the response body and status code.
pub trait CompletionSink {
    fn complete(&self, error: Option<String>, response: InvocationResponse);
}

impl<F> CompletionSink for F
where
    F: Fn(Option<String>, InvocationResponse),
{
    fn complete(&self, error: Option<String>, response: InvocationResponse) {
        self(error, response)
    }
}

/// State for one serverless invocation: the incoming event, opaque platform
/// metadata, the completion sink, and the response being accumulated.
///
/// Created once per invocation. Handlers write response fields directly,
/// then call [`InvocationContext::finalize`] exactly once; `finalize`
/// consumes the context, so a second completion cannot be expressed.
pub struct InvocationContext<'a> {
    pub event: Value,
    pub platform_context: Value,
    pub response: InvocationResponse,
    completion: &'a dyn CompletionSink,
    verbosity: u8,
}

impl<'a> InvocationContext<'a> {
    /// `verbosity` gates diagnostic output volume; 0 is silent except for
    /// domain-error records. See [`crate::diagnostics`] for the tiers.
    pub fn new(
        event: Value,
        platform_context: Value,
        completion: &'a dyn CompletionSink,
        verbosity: u8,
    ) -> Self {
        Self {
            event,
            platform_context,
            response: InvocationResponse::default(),
            completion,
            verbosity,
        }
    }

    /// Already-resolved future yielding the context itself, so a handler can
    /// thread the context through an async chain and end it with `finalize`.
    pub fn promisify(self) -> impl Future<Output = InvocationContext<'a>> {
        std::future::ready(self)
    }

    /// Normalizes the accumulated response, emits diagnostics, and delivers
    /// the response through the completion sink. The sink receives the
    /// response by value; nothing can mutate it after completion.
    pub fn finalize(mut self, outcome: Outcome) {
        normalize_response(&mut self.response, &outcome);
        diagnostics::emit_finalize_diagnostics(
            &outcome,
            &self.event,
            &self.platform_context,
            &self.response,
            self.verbosity,
        );
        self.completion.complete(None, self.response);
    }
}
