pub mod aggregate;
pub mod archive;
pub mod config;
pub mod decode;
pub mod ingest;
pub mod metrics;
pub mod testing;

pub use aggregate::{aggregate, BatchSize, Roster};
pub use archive::{ArchiveKind, CandidateEntry, Container, ContainerError};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, IngestConfig, ServerConfig, SourcesConfig,
};
pub use decode::{DecodeError, Row, RowDecoder};
pub use ingest::{
    ArchivePipeline, IngestError, IngestOptions, LocalSource, RosterIngest, RosterResult,
    SourceFormat, Upload,
};
