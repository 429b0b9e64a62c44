//! Common error type for the campaign sync worker.
//!
//! The worker talks to two HTTP services (SendGrid and Airtable) and parses
//! loosely structured campaign content. This module consolidates the possible
//! failures into a single [`Error`] enum so that callers can use a simple
//! `Result<T, Error>` without relying on panicking calls like `unwrap` or
//! `expect`.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while running the sync.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failures while talking to either HTTP service.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// An upstream GET returned a non-success status or an undecodable body.
    #[error("fetch error: {status} - {body}")]
    Fetch { status: StatusCode, body: String },

    /// A send timestamp did not match `YYYY-MM-DDTHH:MM:SSZ`.
    #[error("format error: unexpected timestamp {value:?}: {source}")]
    Format {
        value: String,
        source: chrono::ParseError,
    },

    /// The table insert returned a non-success status or an undecodable body.
    #[error("upload error: {status} - {body}")]
    Upload { status: StatusCode, body: String },

    /// Failures while reading settings sources.
    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),

    /// Problems with environment or configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn fetch(status: StatusCode, body: impl Into<String>) -> Self {
        Error::Fetch {
            status,
            body: body.into(),
        }
    }

    pub fn upload(status: StatusCode, body: impl Into<String>) -> Self {
        Error::Upload {
            status,
            body: body.into(),
        }
    }
}
