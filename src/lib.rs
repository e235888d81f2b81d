//! Flagward - compiler invocation wrapper that filters unsafe internal
//! compiler argument warnings
//!
//! This library classifies the extra compiler arguments configured for an
//! invocation against an allowlist of known-safe experimental flags, routes
//! the resulting diagnostic to the right output stream, and runs the wrapped
//! compiler with its own output passing through untouched.

pub mod allowlist;
pub mod classifier;
pub mod cli;
pub mod invoker;
pub mod json_output;
pub mod router;
