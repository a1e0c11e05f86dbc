use std::sync::Arc;

use roster_core::{BatchSize, Config, LocalSource, RosterIngest};

/// Shared application state
pub struct AppState {
    config: Config,
    ingest: Arc<dyn RosterIngest>,
}

impl AppState {
    pub fn new(config: Config, ingest: Arc<dyn RosterIngest>) -> Self {
        Self { config, ingest }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ingest(&self) -> &dyn RosterIngest {
        self.ingest.as_ref()
    }

    /// Configured tar.gz roster.
    pub fn archive_source(&self) -> LocalSource {
        LocalSource::archive(
            self.config.sources.archive_path.clone(),
            roster_core::ArchiveKind::TarCompressed,
        )
    }

    /// Configured plain CSV roster.
    pub fn csv_source(&self) -> LocalSource {
        LocalSource::tabular(self.config.sources.csv_path.clone())
    }

    /// Batch size for the batched upload route.
    pub fn upload_batch_size(&self) -> BatchSize {
        BatchSize::rows(self.config.ingest.batch_size)
    }
}
