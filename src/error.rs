//! Error types for imagemoji operations.
//!
//! Rewriting itself never fails. These cover the edges: custom patterns,
//! codepoint decoding, and the CLI's file and config handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid emoji pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("invalid codepoint id: {0:?}")]
    InvalidCodePoint(String),

    #[cfg(feature = "cli")]
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
