//! Source locator for roster data inside compressed containers.
//!
//! A container is either a single gzip-compressed CSV file or a gzip-wrapped
//! tar archive. [`Container`] walks it in one forward pass and exposes each
//! file as a [`CandidateEntry`]; [`Container::first_tabular`] picks the entry
//! the rest of the pipeline decodes.
//!
//! # Example
//!
//! ```ignore
//! use roster_core::archive::{ArchiveKind, Container};
//!
//! let file = std::fs::File::open("member.tar.gz")?;
//! let mut container = Container::open(file, ArchiveKind::TarCompressed)?;
//! if let Some(entry) = container.first_tabular()? {
//!     println!("decoding {}", entry.name());
//! }
//! ```

mod container;
mod error;
mod kind;

pub use container::{
    is_gzip_magic, CandidateEntry, Candidates, Container, GZIP_MAGIC, PLAIN_ENTRY_NAME,
    TABULAR_SUFFIX,
};
pub use error::{is_decompress_failure, ContainerError};
pub use kind::ArchiveKind;
