//! Error types for the gamerank library.
//!
//! All fallible operations return [`GameRankError`] through the crate-wide
//! [`Result`] alias. The variants map onto the failure classes a search
//! request can hit:
//!
//! - [`GameRankError::Catalog`] - the catalog collaborator failed; fatal for the
//!   request and safe to retry at the transport layer.
//! - [`GameRankError::Embedding`] - the embedding backend is unavailable. The
//!   semantic scorer absorbs this and degrades to lexical-only ranking.
//! - [`GameRankError::InvalidFilter`] - a filter combination that can never
//!   match (for example `price_min > price_max`).
//!
//! # Examples
//!
//! ```
//! use gamerank::error::{GameRankError, Result};
//!
//! fn fetch() -> Result<()> {
//!     Err(GameRankError::catalog("connection reset"))
//! }
//!
//! let err = fetch().unwrap_err();
//! assert!(err.is_retryable());
//! assert_eq!(err.to_string(), "Catalog error: connection reset");
//! ```

use std::io;

use thiserror::Error;

/// The main error type for gamerank operations.
#[derive(Error, Debug)]
pub enum GameRankError {
    /// I/O errors (configuration files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenizer construction, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filter combination that cannot be satisfied
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Catalog fetch or update failed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Embedding backend unavailable or failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// An operation exceeded its deadline
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Operation cancelled
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with GameRankError.
pub type Result<T> = std::result::Result<T, GameRankError>;

impl GameRankError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        GameRankError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        GameRankError::Config(msg.into())
    }

    /// Create a new invalid filter error.
    pub fn invalid_filter<S: Into<String>>(msg: S) -> Self {
        GameRankError::InvalidFilter(msg.into())
    }

    /// Create a new catalog error.
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        GameRankError::Catalog(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        GameRankError::Embedding(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        GameRankError::Timeout(msg.into())
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        GameRankError::Cancelled(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        GameRankError::Other(msg.into())
    }

    /// Whether the caller may retry the failed request unchanged.
    ///
    /// Catalog failures and timeouts are transient; everything else will fail
    /// the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameRankError::Catalog(_) | GameRankError::Timeout(_))
    }
}
