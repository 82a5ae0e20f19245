//! Error types for Termchat.
//!
//! These never cross a parser's public contract: every public parse entry
//! point catches them and degrades to `None` or an empty result.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TermchatError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
