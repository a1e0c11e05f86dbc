//! Testing utilities: a mock ingest and in-memory archive fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster_core::testing::{fixtures, MockIngest};
//!
//! let bytes = fixtures::ArchiveBuilder::new()
//!     .file("roster.csv", &fixtures::roster_csv(&[("alice", "1")]))
//!     .build_tar_gz();
//!
//! let ingest = MockIngest::new();
//! // Use in AppState...
//! ```

pub mod fixtures;
mod mock_ingest;

pub use mock_ingest::{MockIngest, RecordedIngest};
