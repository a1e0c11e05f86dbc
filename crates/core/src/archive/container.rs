//! Streaming walk over gzip and tar-over-gzip containers.
//!
//! # Invariants
//! - The input is read sequentially; no seeking.
//! - Each candidate's reader borrows the container, so at most one entry is
//!   being read at a time.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

use flate2::bufread::MultiGzDecoder;
use tracing::debug;

use super::error::{ContainerError, GunzipFailure};
use super::kind::ArchiveKind;

/// gzip magic bytes (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Suffix a tar entry needs to be treated as roster data.
pub const TABULAR_SUFFIX: &str = ".csv";

/// Virtual name given to the decompressed stream of a plain gzip container.
pub const PLAIN_ENTRY_NAME: &str = "<gunzip>";

#[inline]
pub fn is_gzip_magic(header: &[u8]) -> bool {
    header.len() >= 2 && header[0] == GZIP_MAGIC[0] && header[1] == GZIP_MAGIC[1]
}

/// gzip decoder that tags its errors with [`GunzipFailure`].
struct GunzipReader<R: BufRead> {
    inner: MultiGzDecoder<R>,
}

impl<R: BufRead> Read for GunzipReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner
            .read(buf)
            .map_err(|e| io::Error::new(e.kind(), GunzipFailure(e)))
    }
}

type Decoded<R> = GunzipReader<BufReader<R>>;

/// One file found while scanning a container.
pub struct CandidateEntry<'a> {
    name: String,
    is_regular_file: bool,
    whole_stream: bool,
    reader: Box<dyn Read + 'a>,
}

impl<'a> CandidateEntry<'a> {
    /// Entry path inside the container, or [`PLAIN_ENTRY_NAME`].
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_regular_file(&self) -> bool {
        self.is_regular_file
    }

    /// Whether this entry should be decoded as roster data.
    ///
    /// The decompressed stream of a plain gzip container is always eligible.
    /// Tar entries must be regular files ending in [`TABULAR_SUFFIX`].
    pub fn is_eligible(&self) -> bool {
        self.whole_stream || (self.is_regular_file && self.name.ends_with(TABULAR_SUFFIX))
    }

    pub fn into_reader(self) -> Box<dyn Read + 'a> {
        self.reader
    }
}

impl Read for CandidateEntry<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for CandidateEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateEntry")
            .field("name", &self.name)
            .field("is_regular_file", &self.is_regular_file)
            .field("whole_stream", &self.whole_stream)
            .finish_non_exhaustive()
    }
}

enum ContainerInner<R: Read> {
    /// `None` once the stream has been handed out.
    Plain(Option<Decoded<R>>),
    Tar(tar::Archive<Decoded<R>>),
}

/// A compressed container opened for a single forward pass.
pub struct Container<R: Read> {
    kind: ArchiveKind,
    inner: ContainerInner<R>,
}

impl<R: Read> Container<R> {
    /// Wrap `reader` in a gzip decoder for the given container kind.
    ///
    /// Only the gzip magic is checked here; deflate and tar framing errors
    /// surface lazily while entries are read.
    pub fn open(reader: R, kind: ArchiveKind) -> Result<Self, ContainerError> {
        let mut reader = BufReader::new(reader);
        let header = reader.fill_buf().map_err(ContainerError::Decompress)?;
        if !is_gzip_magic(header) {
            return Err(ContainerError::NotGzip);
        }

        let decoded = GunzipReader {
            inner: MultiGzDecoder::new(reader),
        };
        let inner = match kind {
            ArchiveKind::PlainCompressed => ContainerInner::Plain(Some(decoded)),
            ArchiveKind::TarCompressed => ContainerInner::Tar(tar::Archive::new(decoded)),
        };

        Ok(Self { kind, inner })
    }

    pub fn kind(&self) -> ArchiveKind {
        self.kind
    }

    /// Lazily enumerate every entry in the container.
    ///
    /// Can only be walked once. A second walk of a plain container yields no
    /// entries; a second walk of a tar container is an `Archive` error.
    pub fn candidates(&mut self) -> Result<Candidates<'_, R>, ContainerError> {
        let inner = match &mut self.inner {
            ContainerInner::Plain(stream) => CandidatesInner::Plain(stream.take()),
            ContainerInner::Tar(archive) => {
                CandidatesInner::Tar(archive.entries().map_err(ContainerError::Archive)?)
            }
        };
        Ok(Candidates { inner })
    }

    /// First eligible entry in container order. Later eligible entries are
    /// ignored.
    pub fn first_tabular(&mut self) -> Result<Option<CandidateEntry<'_>>, ContainerError> {
        for candidate in self.candidates()? {
            let candidate = candidate?;
            if candidate.is_eligible() {
                debug!(entry = %candidate.name(), "Selected tabular entry");
                return Ok(Some(candidate));
            }
            debug!(
                entry = %candidate.name(),
                regular = candidate.is_regular_file(),
                "Skipping container entry"
            );
        }
        Ok(None)
    }
}

enum CandidatesInner<'a, R: Read + 'a> {
    Plain(Option<Decoded<R>>),
    Tar(tar::Entries<'a, Decoded<R>>),
}

/// Iterator over the entries of a [`Container`].
pub struct Candidates<'a, R: Read + 'a> {
    inner: CandidatesInner<'a, R>,
}

impl<'a, R: Read + 'a> Iterator for Candidates<'a, R> {
    type Item = Result<CandidateEntry<'a>, ContainerError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            CandidatesInner::Plain(stream) => stream.take().map(|decoded| {
                Ok(CandidateEntry {
                    name: PLAIN_ENTRY_NAME.to_string(),
                    is_regular_file: true,
                    whole_stream: true,
                    reader: Box::new(decoded),
                })
            }),
            CandidatesInner::Tar(entries) => entries.next().map(|entry| {
                let entry = entry.map_err(ContainerError::from_tar_io)?;
                let name = entry
                    .path()
                    .map_err(ContainerError::Archive)?
                    .to_string_lossy()
                    .into_owned();
                let is_regular_file = entry.header().entry_type().is_file();
                Ok(CandidateEntry {
                    name,
                    is_regular_file,
                    whole_stream: false,
                    reader: Box::new(entry),
                })
            }),
        }
    }
}
