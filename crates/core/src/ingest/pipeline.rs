//! Blocking ingest runs: open, locate, decode, aggregate.

use std::fs::File;
use std::io::Read;

use bytes::Buf;
use tracing::{debug, warn};

use super::error::IngestError;
use super::types::{IngestOptions, LocalSource, SourceFormat, Upload};
use crate::aggregate::{aggregate, Roster};
use crate::archive::{ArchiveKind, Container};
use crate::decode::RowDecoder;
use crate::metrics::ROWS_DECODED;

/// Build a roster from a file on disk.
///
/// The file handle lives only for the duration of the call.
pub fn read_local(source: &LocalSource, options: &IngestOptions) -> Result<Roster, IngestError> {
    let path = &source.path;
    if !path.exists() {
        return Err(IngestError::NotFound { path: path.clone() });
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IngestError::NotFound { path: path.clone() },
        _ => IngestError::Open {
            path: path.clone(),
            source: e,
        },
    })?;

    debug!(path = %path.display(), format = ?source.format, "Reading local roster");
    read_source(file, source.format, options)
}

/// Build a roster from an uploaded archive.
pub fn read_upload(upload: Upload, options: &IngestOptions) -> Result<Roster, IngestError> {
    let kind = ArchiveKind::from_filename(&upload.filename).ok_or_else(|| {
        IngestError::InputRejected {
            filename: upload.filename.clone(),
        }
    })?;

    debug!(
        filename = %upload.filename,
        kind = %kind,
        bytes = upload.data.len(),
        "Reading uploaded roster"
    );
    read_source(upload.data.reader(), SourceFormat::Archive(kind), options)
}

/// Build a roster from any forward-only byte stream.
///
/// A tar container without a CSV entry yields an empty roster.
pub fn read_source<R: Read>(
    reader: R,
    format: SourceFormat,
    options: &IngestOptions,
) -> Result<Roster, IngestError> {
    match format {
        SourceFormat::Tabular => decode_and_aggregate(reader, options),
        SourceFormat::Archive(kind) => {
            let mut container = Container::open(reader, kind)?;
            let roster = match container.first_tabular()? {
                Some(entry) => decode_and_aggregate(entry, options)?,
                None => {
                    warn!(kind = %kind, "No CSV entry in container, returning empty roster");
                    Roster::new()
                }
            };
            Ok(roster)
        }
    }
}

fn decode_and_aggregate<R: Read>(reader: R, options: &IngestOptions) -> Result<Roster, IngestError> {
    let mut decoder = RowDecoder::with_delimiter(reader, options.delimiter)?;
    let roster = aggregate(&mut decoder, options.batch_size);
    ROWS_DECODED.inc_by(decoder.rows_read());
    Ok(roster?)
}
