//! Error types for the decode module.

use thiserror::Error;

/// Errors raised while decoding tabular roster data.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The header line lacks a required column.
    #[error("Missing required column: {column}")]
    MissingColumn { column: &'static str },

    /// A data line could not be turned into a row.
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// The underlying stream failed while being read.
    #[error("Failed to read tabular data: {0}")]
    Read(#[source] std::io::Error),
}

impl DecodeError {
    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            reason: reason.into(),
        }
    }

    /// Convert a csv reader error, attributing it to `fallback_line` when the
    /// reader does not report a position.
    pub(crate) fn from_csv(error: csv::Error, fallback_line: u64) -> Self {
        let line = error
            .position()
            .map(|pos| pos.line())
            .unwrap_or(fallback_line);

        match error.into_kind() {
            csv::ErrorKind::Io(e) => Self::Read(e),
            csv::ErrorKind::Utf8 { err, .. } => Self::malformed(
                line,
                format!("field {} is not valid UTF-8", err.field() + 1),
            ),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => Self::malformed(
                line,
                format!("expected {} fields, found {}", expected_len, len),
            ),
            other => Self::malformed(line, format!("{:?}", other)),
        }
    }
}
