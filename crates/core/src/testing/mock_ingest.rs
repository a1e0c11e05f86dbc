//! Mock roster ingest for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::aggregate::{BatchSize, Roster};
use crate::ingest::{IngestError, LocalSource, RosterIngest, Upload};

/// A recorded ingest call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedIngest {
    Local {
        source: LocalSource,
        batch_size: BatchSize,
    },
    Upload {
        filename: String,
        bytes: usize,
        batch_size: BatchSize,
    },
}

/// Mock implementation of the RosterIngest trait.
///
/// Returns a canned roster (empty by default), or a one-shot error, and
/// records every call.
///
/// # Example
///
/// ```rust,ignore
/// use roster_core::testing::MockIngest;
///
/// let ingest = MockIngest::new();
/// ingest.set_roster([("alice", "1")].into_iter().collect()).await;
///
/// let roster = ingest.read_upload(upload, BatchSize::Unbounded).await?;
///
/// let calls = ingest.recorded_calls().await;
/// assert_eq!(calls.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockIngest {
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedIngest>>>,
    /// Roster returned on success.
    roster: Arc<RwLock<Roster>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<IngestError>>>,
}

impl MockIngest {
    /// Create a new mock ingest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the roster returned by subsequent successful calls.
    pub async fn set_roster(&self, roster: Roster) {
        *self.roster.write().await = roster;
    }

    /// Make the next call fail with the given error.
    pub async fn set_next_error(&self, error: IngestError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedIngest> {
        self.calls.read().await.clone()
    }

    async fn respond(&self, call: RecordedIngest) -> Result<Roster, IngestError> {
        self.calls.write().await.push(call);

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        Ok(self.roster.read().await.clone())
    }
}

#[async_trait]
impl RosterIngest for MockIngest {
    fn name(&self) -> &str {
        "mock"
    }

    async fn read_local(
        &self,
        source: LocalSource,
        batch_size: BatchSize,
    ) -> Result<Roster, IngestError> {
        self.respond(RecordedIngest::Local { source, batch_size })
            .await
    }

    async fn read_upload(
        &self,
        upload: Upload,
        batch_size: BatchSize,
    ) -> Result<Roster, IngestError> {
        self.respond(RecordedIngest::Upload {
            filename: upload.filename,
            bytes: upload.data.len(),
            batch_size,
        })
        .await
    }
}
