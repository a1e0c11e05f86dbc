//! Ingest orchestration: source selection, error wrapping, and the async
//! [`RosterIngest`] seam.
//!
//! Every run is a single forward pass:
//! open → locate the CSV → decode rows → aggregate.
//! Any failure along the way becomes an [`IngestError`], which
//! [`RosterResult`] turns into a `failed` response.
//!
//! # Example
//!
//! ```ignore
//! use roster_core::ingest::{ArchivePipeline, RosterIngest, RosterResult, Upload};
//! use roster_core::BatchSize;
//!
//! let pipeline = ArchivePipeline::with_defaults();
//! let result: RosterResult = pipeline
//!     .read_upload(Upload::new("member.tar.gz", bytes), BatchSize::rows(500))
//!     .await
//!     .into();
//! ```

mod error;
mod pipeline;
mod service;
mod types;

pub use error::{IngestError, INVALID_UPLOAD_MESSAGE};
pub use pipeline::{read_local, read_source, read_upload};
pub use service::{ArchivePipeline, RosterIngest};
pub use types::{IngestOptions, LocalSource, RosterResult, SourceFormat, Upload};
