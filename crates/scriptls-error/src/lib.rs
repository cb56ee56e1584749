//! Error taxonomy for the language-server core.
//!
//! # Propagation policy
//!
//! Queries never throw across the RPC boundary (§7 of the design). Every
//! public operation on [`crate::CoreError`] returns a value — never panics —
//! and call sites that would otherwise propagate an error instead log a
//! diagnostic via [`report`] and fall back to an empty or sentinel result.
//! This crate supplies the error enum and that logging helper; it is up to
//! each caller to pick the right sentinel for its return type.

use std::fmt;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// The taxonomy described in the design: not-found, invalid argument, parse
/// error, and cache I/O error. Each maps to a specific non-fatal recovery at
/// the call site; none of them should ever unwind the host process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A document, symbol, reference, or table lookup found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// A caller-supplied argument (e.g. a symbol kind outside the accepted
    /// set for a helper) was outside the operation's domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The external parser reported a syntax error. Partial parse trees are
    /// still accepted; extraction proceeds over the recognized sub-trees.
    #[error("parse error at byte {offset}: {message}")]
    Parse { message: String, offset: usize },

    /// The external cache interface failed. In-memory state is untouched.
    #[error("cache I/O error: {0}")]
    CacheIo(String),
}

impl CoreError {
    pub fn not_found(what: impl fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn invalid_argument(what: impl fmt::Display) -> Self {
        Self::InvalidArgument(what.to_string())
    }

    pub fn parse(message: impl Into<String>, offset: usize) -> Self {
        Self::Parse { message: message.into(), offset }
    }

    pub fn cache_io(what: impl fmt::Display) -> Self {
        Self::CacheIo(what.to_string())
    }
}

/// Log `err` as a diagnostic at the severity its variant warrants. Call
/// this at the edge where an internal `CoreResult` is downgraded to an
/// empty/sentinel response for an RPC caller.
pub fn report(context: &str, err: &CoreError) {
    match err {
        CoreError::NotFound(_) => tracing::debug!(context, error = %err, "not found"),
        CoreError::InvalidArgument(_) => tracing::warn!(context, error = %err, "invalid argument"),
        CoreError::Parse { .. } => tracing::debug!(context, error = %err, "parse error"),
        CoreError::CacheIo(_) => tracing::warn!(context, error = %err, "cache I/O error"),
    }
}

/// Downgrade a `CoreResult<T>` to `T`'s default, logging on the `Err` path.
/// The standard shape for turning an internal error into the empty
/// response the RPC surface promises.
pub fn or_log_default<T: Default>(context: &str, result: CoreResult<T>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            report(context, &e);
            T::default()
        }
    }
}
