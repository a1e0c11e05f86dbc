//! Container kind detection from filename suffixes.

use serde::{Deserialize, Serialize};

/// Compressed container layouts a roster can arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveKind {
    /// A single gzip-compressed tabular file.
    PlainCompressed,
    /// A gzip-compressed tar archive holding tabular files.
    TarCompressed,
}

impl ArchiveKind {
    /// Detect the container kind from a filename.
    ///
    /// `.tar.gz` is checked before `.gz`, so a tarball is never mistaken for
    /// a plain gzip file. Matching is case-sensitive; `.tgz` is not accepted.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(".tar.gz") {
            Some(Self::TarCompressed)
        } else if filename.ends_with(".gz") {
            Some(Self::PlainCompressed)
        } else {
            None
        }
    }

    /// Short label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainCompressed => "gzip",
            Self::TarCompressed => "tar_gzip",
        }
    }
}

impl std::fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
