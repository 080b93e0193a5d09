//! AWS Lambda boundary for the invocation context.
//!
//! This crate adapts a Lambda invocation to `then_context_core`: it bridges
//! Lambda's return-style completion to the context's callback-style
//! completion and owns environment configuration for the deployed binary.

pub mod handler;
