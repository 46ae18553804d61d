//! Error handling for the resume scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote service returned status {status}: {message}")]
    RemoteStatus { status: u16, message: String },

    #[error("Malformed report: {0}")]
    MalformedReport(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

impl ScoringError {
    /// True for failures of the remote report service, which the engine
    /// answers with a local computation instead of surfacing.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            ScoringError::Http(_)
                | ScoringError::RemoteStatus { .. }
                | ScoringError::MalformedReport(_)
                | ScoringError::Serialization(_)
        )
    }
}
