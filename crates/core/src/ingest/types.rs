use std::path::PathBuf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::error::IngestError;
use crate::aggregate::{BatchSize, Roster};
use crate::archive::ArchiveKind;

/// How a local roster source is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Uncompressed CSV, decoded directly.
    Tabular,
    /// Compressed container, searched for a CSV first.
    Archive(ArchiveKind),
}

/// A roster source on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSource {
    pub path: PathBuf,
    pub format: SourceFormat,
}

impl LocalSource {
    pub fn tabular(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: SourceFormat::Tabular,
        }
    }

    pub fn archive(path: impl Into<PathBuf>, kind: ArchiveKind) -> Self {
        Self {
            path: path.into(),
            format: SourceFormat::Archive(kind),
        }
    }

    /// Metric/log label for this source.
    pub fn label(&self) -> &'static str {
        match self.format {
            SourceFormat::Tabular => "csv",
            SourceFormat::Archive(_) => "archive",
        }
    }
}

/// An uploaded archive, fully received.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied filename; its suffix selects the container kind.
    pub filename: String,
    pub data: Bytes,
}

impl Upload {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Per-run decoding and aggregation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub batch_size: BatchSize,
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            batch_size: BatchSize::Unbounded,
            delimiter: b',',
        }
    }
}

/// Outcome of a roster request, as returned to clients.
///
/// Serializes as `{"status":"success","member":{...}}` or
/// `{"status":"failed","message":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RosterResult {
    Success { member: Roster },
    Failed { message: String },
}

impl RosterResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<Roster, IngestError>> for RosterResult {
    fn from(result: Result<Roster, IngestError>) -> Self {
        match result {
            Ok(member) => Self::Success { member },
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let roster: Roster = [("alice", "1")].into_iter().collect();
        let value = serde_json::to_value(RosterResult::from(Ok(roster))).unwrap();
        assert_eq!(value, json!({"status": "success", "member": {"alice": "1"}}));
    }

    #[test]
    fn test_failed_shape() {
        let err = IngestError::InputRejected {
            filename: "data.zip".to_string(),
        };
        let value = serde_json::to_value(RosterResult::from(Err(err))).unwrap();
        assert_eq!(
            value,
            json!({"status": "failed", "message": "Please upload a valid .gz or .tar.gz file."})
        );
    }

    #[test]
    fn test_local_source_labels() {
        assert_eq!(LocalSource::tabular("member.csv").label(), "csv");
        assert_eq!(
            LocalSource::archive("member.tar.gz", ArchiveKind::TarCompressed).label(),
            "archive"
        );
    }
}
