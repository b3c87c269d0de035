// src/error.rs

//! Unified error handling for the scout application.

use std::fmt;

use thiserror::Error;

/// Result type alias for scout operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching or parsing one board failed
    #[error("Fetch error for {company}: {message}")]
    Fetch { company: String, message: String },

    /// Persisted seen-state could not be read
    #[error("Seen-state read error: {0}")]
    StateRead(String),

    /// Persisted seen-state could not be written
    #[error("Seen-state write error: {0}")]
    StateWrite(String),

    /// Outbound notification failed
    #[error("Notify error: {0}")]
    Notify(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a per-board fetch error.
    pub fn fetch(company: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            company: company.into(),
            message: message.to_string(),
        }
    }

    /// Create a seen-state read error.
    pub fn state_read(message: impl Into<String>) -> Self {
        Self::StateRead(message.into())
    }

    /// Create a seen-state write error.
    pub fn state_write(message: impl Into<String>) -> Self {
        Self::StateWrite(message.into())
    }

    /// Create a notification error.
    pub fn notify(message: impl Into<String>) -> Self {
        Self::Notify(message.into())
    }
}
