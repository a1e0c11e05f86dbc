//! Error types for the archive module.

use std::fmt;
use std::io;

use thiserror::Error;

/// Errors raised while opening or walking a compressed container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Input does not start with the gzip magic bytes.
    #[error("Input is not gzip-compressed")]
    NotGzip,

    /// The gzip stream is corrupt or truncated.
    #[error("Failed to decompress input: {0}")]
    Decompress(#[source] io::Error),

    /// The decompressed stream is not a valid tar archive.
    #[error("Invalid tar archive: {0}")]
    Archive(#[source] io::Error),
}

impl ContainerError {
    /// Classify an I/O error surfaced while walking a tar over gzip.
    pub(crate) fn from_tar_io(error: io::Error) -> Self {
        if is_decompress_failure(&error) {
            Self::Decompress(error)
        } else {
            Self::Archive(error)
        }
    }
}

/// Marker carried inside I/O errors produced by the gzip decoder, so callers
/// further down the pipeline can tell a corrupt container from a bad file.
#[derive(Debug)]
pub(crate) struct GunzipFailure(pub(crate) io::Error);

impl fmt::Display for GunzipFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for GunzipFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Whether an I/O error originated in gzip decompression.
pub fn is_decompress_failure(error: &io::Error) -> bool {
    error
        .get_ref()
        .is_some_and(|inner| inner.is::<GunzipFailure>())
}
