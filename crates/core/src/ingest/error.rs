//! Error types for the ingest module.

use std::path::PathBuf;

use thiserror::Error;

use crate::archive::{is_decompress_failure, ContainerError};
use crate::decode::DecodeError;

/// Message returned for uploads whose filename has no recognized suffix.
pub const INVALID_UPLOAD_MESSAGE: &str = "Please upload a valid .gz or .tar.gz file.";

/// Any failure of an ingest run. The display text is what callers see.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Configured local source does not exist.
    #[error("{} not found.", path.display())]
    NotFound { path: PathBuf },

    /// Uploaded filename lacks a `.gz` or `.tar.gz` suffix.
    #[error("{}", INVALID_UPLOAD_MESSAGE)]
    InputRejected { filename: String },

    /// Local source exists but could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Decode(DecodeError),

    /// The blocking ingest task was cancelled or panicked.
    #[error("Ingest aborted: {0}")]
    Aborted(String),
}

impl IngestError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InputRejected { .. } => "input_rejected",
            Self::Open { .. } => "open",
            Self::Container(_) => "container",
            Self::Decode(_) => "decode",
            Self::Aborted(_) => "aborted",
        }
    }
}

impl From<DecodeError> for IngestError {
    /// A read failure that came out of the gzip decoder is a container
    /// problem, not a tabular one.
    fn from(error: DecodeError) -> Self {
        match error {
            DecodeError::Read(e) if is_decompress_failure(&e) => {
                Self::Container(ContainerError::Decompress(e))
            }
            other => Self::Decode(other),
        }
    }
}
