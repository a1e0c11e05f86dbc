//! Row decoder for tabular roster data.
//!
//! Input is delimited text whose header names the columns. The `name` and
//! `priority` columns are required; any others are ignored.

mod error;
mod row_decoder;

pub use error::DecodeError;
pub use row_decoder::{Row, RowDecoder, NAME_COLUMN, PRIORITY_COLUMN};
