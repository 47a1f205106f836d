//! Error types for the vatscan-core library.
//!
//! Text interpretation itself never fails: every heuristic degrades to a
//! default or an absent value. Errors only arise at the edges, when loading
//! configuration or collecting page text from the OCR collaborator.

use thiserror::Error;

/// Main error type for the vatscan library.
#[derive(Error, Debug)]
pub enum VatscanError {
    /// Multi-page capture could not be assembled.
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while recognizing the pages of a capture.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The recognizer failed on a single page.
    #[error("page {page} could not be recognized: {reason}")]
    Page { page: usize, reason: String },

    /// A background recognition task panicked or was cancelled.
    #[error("recognition task failed: {0}")]
    Join(String),

    /// The capture contained no pages.
    #[error("capture has no pages")]
    Empty,
}

/// Result type for the vatscan library.
pub type Result<T> = std::result::Result<T, VatscanError>;

impl From<serde_json::Error> for VatscanError {
    fn from(err: serde_json::Error) -> Self {
        VatscanError::Config(err.to_string())
    }
}
