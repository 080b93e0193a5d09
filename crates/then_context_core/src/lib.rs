//! Per-invocation wrapper for serverless function handlers.
//!
//! This crate owns the invocation contract: a context object holding the
//! incoming event, platform metadata, and the completion sink, plus the
//! one-shot response normalization that turns a success or domain error into
//! a fixed HTTP-like response shape. It intentionally excludes Lambda runtime
//! and transport concerns; those live in `then_context_lambda`.

pub mod context;
pub mod diagnostics;
pub mod response;
