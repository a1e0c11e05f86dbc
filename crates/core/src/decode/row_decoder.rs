//! Lazy CSV row decoding over any `Read`.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use super::error::DecodeError;

/// Header column holding the roster key.
pub const NAME_COLUMN: &str = "name";

/// Header column holding the roster value.
pub const PRIORITY_COLUMN: &str = "priority";

/// One decoded roster line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Roster key, never empty.
    pub name: String,
    /// Opaque priority value; not parsed or validated.
    pub priority: String,
}

impl Row {
    pub fn new(name: impl Into<String>, priority: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: priority.into(),
        }
    }
}

/// Streams [`Row`]s from delimited text with a header line.
///
/// Rows are produced in file order. The decoder stops after the first error,
/// so a caller never sees rows past a malformed line.
pub struct RowDecoder<R: Read> {
    reader: csv::Reader<R>,
    name_idx: usize,
    priority_idx: usize,
    width: usize,
    record: StringRecord,
    rows_read: u64,
    finished: bool,
}

impl<R: Read> RowDecoder<R> {
    /// Build a comma-delimited decoder and read its header line.
    pub fn new(reader: R) -> Result<Self, DecodeError> {
        Self::with_delimiter(reader, b',')
    }

    /// Build a decoder for the given field delimiter and read its header line.
    pub fn with_delimiter(reader: R, delimiter: u8) -> Result<Self, DecodeError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| DecodeError::from_csv(e, 1))?;
        let name_idx = column_index(headers, NAME_COLUMN)?;
        let priority_idx = column_index(headers, PRIORITY_COLUMN)?;
        let width = headers.len();

        Ok(Self {
            reader,
            name_idx,
            priority_idx,
            width,
            record: StringRecord::new(),
            rows_read: 0,
            finished: false,
        })
    }

    /// Number of rows successfully decoded so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    fn current_row(&self) -> Result<Row, DecodeError> {
        let line = self.record.position().map(|p| p.line()).unwrap_or(0);

        if self.record.len() < self.width {
            return Err(DecodeError::malformed(
                line,
                format!("expected {} fields, found {}", self.width, self.record.len()),
            ));
        }

        let name = &self.record[self.name_idx];
        if name.is_empty() {
            return Err(DecodeError::malformed(line, "empty name"));
        }

        Ok(Row::new(name, &self.record[self.priority_idx]))
    }
}

impl<R: Read> Iterator for RowDecoder<R> {
    type Item = Result<Row, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let fallback_line = self.rows_read + 2;
        let result = match self.reader.read_record(&mut self.record) {
            Ok(false) => {
                self.finished = true;
                return None;
            }
            Ok(true) => self.current_row(),
            Err(e) => Err(DecodeError::from_csv(e, fallback_line)),
        };

        match result {
            Ok(_) => self.rows_read += 1,
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}

/// Position of `column` in the header. With duplicate headers the last one
/// wins, matching how a header-to-value map would be built.
fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize, DecodeError> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h == column)
        .last()
        .map(|(i, _)| i)
        .ok_or(DecodeError::MissingColumn { column })
}
