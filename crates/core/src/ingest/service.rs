//! Async ingest seam used by the HTTP layer.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn};

use super::error::IngestError;
use super::pipeline;
use super::types::{IngestOptions, LocalSource, Upload};
use crate::aggregate::{BatchSize, Roster};
use crate::config::IngestConfig;
use crate::metrics::{INGEST_DURATION, INGEST_TOTAL, MEMBERS_RETURNED};

/// Builds rosters from local sources and uploads.
///
/// Handlers hold this as `Arc<dyn RosterIngest>` so tests can swap in a mock.
#[async_trait]
pub trait RosterIngest: Send + Sync {
    /// Returns the name of this implementation.
    fn name(&self) -> &str;

    /// Build a roster from a file on the local filesystem.
    async fn read_local(
        &self,
        source: LocalSource,
        batch_size: BatchSize,
    ) -> Result<Roster, IngestError>;

    /// Build a roster from an uploaded archive.
    async fn read_upload(&self, upload: Upload, batch_size: BatchSize)
        -> Result<Roster, IngestError>;
}

/// The production pipeline: gzip/tar locator, CSV decoder, aggregator.
///
/// Each run executes on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct ArchivePipeline {
    delimiter: u8,
}

impl ArchivePipeline {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            delimiter: config.delimiter_byte(),
        }
    }

    /// Creates a pipeline with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(&IngestConfig::default())
    }

    fn options(&self, batch_size: BatchSize) -> IngestOptions {
        IngestOptions {
            batch_size,
            delimiter: self.delimiter,
        }
    }
}

impl Default for ArchivePipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl RosterIngest for ArchivePipeline {
    fn name(&self) -> &str {
        "archive"
    }

    async fn read_local(
        &self,
        source: LocalSource,
        batch_size: BatchSize,
    ) -> Result<Roster, IngestError> {
        let options = self.options(batch_size);
        let label = source.label();
        run_blocking(label, move || pipeline::read_local(&source, &options)).await
    }

    async fn read_upload(
        &self,
        upload: Upload,
        batch_size: BatchSize,
    ) -> Result<Roster, IngestError> {
        let options = self.options(batch_size);
        run_blocking("upload", move || pipeline::read_upload(upload, &options)).await
    }
}

async fn run_blocking<F>(source: &'static str, job: F) -> Result<Roster, IngestError>
where
    F: FnOnce() -> Result<Roster, IngestError> + Send + 'static,
{
    let start = Instant::now();
    let result = tokio::task::spawn_blocking(job)
        .await
        .unwrap_or_else(|e| Err(IngestError::Aborted(e.to_string())));
    let elapsed = start.elapsed();

    INGEST_DURATION
        .with_label_values(&[source])
        .observe(elapsed.as_secs_f64());

    match &result {
        Ok(roster) => {
            INGEST_TOTAL.with_label_values(&[source, "success"]).inc();
            MEMBERS_RETURNED.observe(roster.len() as f64);
            info!(
                source,
                members = roster.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Roster ingested"
            );
        }
        Err(e) => {
            INGEST_TOTAL.with_label_values(&[source, "failed"]).inc();
            warn!(source, kind = e.kind(), error = %e, "Roster ingest failed");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveKind;
    use crate::testing::fixtures::{gzip, ArchiveBuilder};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_pipeline_upload_batched_matches_unbounded() {
        let pipeline = ArchivePipeline::with_defaults();
        let data = ArchiveBuilder::new()
            .file("roster.csv", b"name,priority\nA,1\nB,2\nA,3\n")
            .build_tar_gz();

        let unbounded = pipeline
            .read_upload(Upload::new("r.tar.gz", data.clone()), BatchSize::Unbounded)
            .await
            .unwrap();
        let batched = pipeline
            .read_upload(Upload::new("r.tar.gz", data), BatchSize::rows(2))
            .await
            .unwrap();

        assert_eq!(unbounded, batched);
        assert_eq!(unbounded.get("A"), Some("3"));
    }

    #[tokio::test]
    async fn test_pipeline_read_local_not_found() {
        let temp = TempDir::new().unwrap();
        let source = LocalSource::archive(temp.path().join("gone.tar.gz"), ArchiveKind::TarCompressed);

        let err = ArchivePipeline::with_defaults()
            .read_local(source, BatchSize::Unbounded)
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_pipeline_uses_configured_delimiter() {
        let pipeline = ArchivePipeline::new(&IngestConfig {
            delimiter: "\t".to_string(),
            ..Default::default()
        });
        let data = gzip(b"name\tpriority\nalice\t5\n");

        let roster = pipeline
            .read_upload(Upload::new("member.gz", data), BatchSize::Unbounded)
            .await
            .unwrap();
        assert_eq!(roster.get("alice"), Some("5"));
    }

    #[test]
    fn test_pipeline_name() {
        assert_eq!(ArchivePipeline::default().name(), "archive");
    }
}
