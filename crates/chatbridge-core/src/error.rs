//! Failure taxonomy for adapter operations.
//!
//! Adapters convert every variant to a logged boolean `false` at their public
//! boundary; the host framework never sees a structured error, only the log line.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Every strategy in a locator chain was exhausted without a match, or a
    /// previously located selector no longer resolves (the page re-rendered).
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// A synthetic event could not be constructed or dispatched on the page.
    #[error("event dispatch failed: {0}")]
    Dispatch(String),

    /// A wait-for-state loop hit its deadline.
    #[error("timed out after {waited_ms}ms")]
    Timeout { waited_ms: u64 },

    /// The underlying page connection failed (evaluation error, session gone).
    #[error("page driver error: {0}")]
    Page(String),
}
