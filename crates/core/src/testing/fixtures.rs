//! In-memory archive builders for tests.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::{EntryType, Header};

/// gzip-compress `data`.
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// CSV text with a `name,priority` header and the given rows.
pub fn roster_csv(rows: &[(&str, &str)]) -> Vec<u8> {
    let mut out = String::from("name,priority\n");
    for (name, priority) in rows {
        out.push_str(name);
        out.push(',');
        out.push_str(priority);
        out.push('\n');
    }
    out.into_bytes()
}

enum FixtureEntry {
    File { path: String, data: Vec<u8> },
    Dir { path: String },
    Symlink { path: String, target: String },
}

/// Builds a tar archive entry by entry, in the order given.
///
/// # Example
///
/// ```rust,ignore
/// let bytes = ArchiveBuilder::new()
///     .dir("data")
///     .file("data/member.csv", b"name,priority\nalice,1\n")
///     .build_tar_gz();
/// ```
#[derive(Default)]
pub struct ArchiveBuilder {
    entries: Vec<FixtureEntry>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: &str, data: &[u8]) -> Self {
        self.entries.push(FixtureEntry::File {
            path: path.to_string(),
            data: data.to_vec(),
        });
        self
    }

    pub fn dir(mut self, path: &str) -> Self {
        self.entries.push(FixtureEntry::Dir {
            path: path.to_string(),
        });
        self
    }

    pub fn symlink(mut self, path: &str, target: &str) -> Self {
        self.entries.push(FixtureEntry::Symlink {
            path: path.to_string(),
            target: target.to_string(),
        });
        self
    }

    /// Uncompressed tar bytes.
    pub fn build_tar(self) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());

        for entry in self.entries {
            let mut header = Header::new_gnu();
            header.set_mtime(0);
            match entry {
                FixtureEntry::File { path, data } => {
                    header.set_entry_type(EntryType::Regular);
                    header.set_mode(0o644);
                    header.set_size(data.len() as u64);
                    builder.append_data(&mut header, path, data.as_slice()).unwrap();
                }
                FixtureEntry::Dir { path } => {
                    header.set_entry_type(EntryType::Directory);
                    header.set_mode(0o755);
                    header.set_size(0);
                    builder.append_data(&mut header, path, std::io::empty()).unwrap();
                }
                FixtureEntry::Symlink { path, target } => {
                    header.set_entry_type(EntryType::Symlink);
                    header.set_mode(0o777);
                    header.set_size(0);
                    builder.append_link(&mut header, path, target).unwrap();
                }
            }
        }

        builder.into_inner().unwrap()
    }

    /// gzip-compressed tar bytes.
    pub fn build_tar_gz(self) -> Vec<u8> {
        gzip(&self.build_tar())
    }
}
