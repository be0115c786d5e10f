//! Error types for recdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for recdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading input or assembling a document.
///
/// Data-shape problems inside the content tree never surface here; they
/// degrade to empty or omitted elements during assembly.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document could not be decoded as JSON.
    #[error("Invalid input JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The record to render does not exist.
    #[error("Record not found")]
    RecordNotFound,

    /// A mandatory top-level field is blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The HTTP client for image fetching could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Error serializing the finished document (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}
