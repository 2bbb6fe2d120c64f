//! Document ingestion pipeline.
//!
//! Architecture:
//!
//! ```text
//! submit(file, bytes, topic)        validation is synchronous; the caller
//!         │                         returns as soon as the job is queued
//!         ▼
//!   bounded job queue ──► ingest workers (N)
//!                              │
//!                              ▼
//!                    Extracting ─► Chunking ─► Storing ─► Completed
//!                         │            │           │
//!                         └────────────┴───────────┴──► Aborted
//!                              │
//!          progress events ◄───┘───► JobReport (per-job oneshot)
//! ```
//!
//! Every milestone is published to the shared broadcast channel, tagged with
//! the job's correlation id. The final report is additionally delivered on
//! the [`JobHandle`] returned at submission time.

mod ingest;
mod types;
mod worker;

pub use types::{IngestJob, JobHandle, JobOutcome, JobReport, JobState};

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{broadcast, oneshot};
use tokio_stream::wrappers::BroadcastStream;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::memory::MemoryStore;
use crate::progress::{ProgressBroadcaster, ProgressEvent};

use types::QueuedJob;
use worker::{spawn_ingest_workers, SharedReceiver};

/// Front of the ingestion pipeline.
///
/// Owns the bounded job queue and the worker pool. Submission never blocks:
/// invalid input and a full queue are rejected synchronously, everything
/// else is handed to a worker and tracked through the returned handle.
pub struct Pipeline {
    config: IngestConfig,
    submit_tx: mpsc::Sender<QueuedJob>,
    broadcaster: ProgressBroadcaster,
    cancel: CancellationToken,
}

impl Pipeline {
    /// Validate the configuration and spawn the worker pool.
    pub fn new(config: IngestConfig, store: Arc<dyn MemoryStore>) -> Result<Self, IngestError> {
        config.validate()?;

        let broadcaster = ProgressBroadcaster::new();
        let (submit_tx, submit_rx) = mpsc::channel(config.queue_capacity);
        let cancel = CancellationToken::new();

        spawn_ingest_workers(
            config.workers,
            SharedReceiver::new(submit_rx),
            store,
            broadcaster.clone(),
            config.clone(),
            cancel.child_token(),
        );

        tracing::info!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "Ingestion pipeline started"
        );

        Ok(Self {
            config,
            submit_tx,
            broadcaster,
            cancel,
        })
    }

    /// Submit a document for ingestion.
    ///
    /// Validation happens here, before a job exists: an empty payload or a
    /// non-PDF filename is rejected with [`IngestError::InvalidInput`] and
    /// emits no progress events. A full queue yields
    /// [`IngestError::QueueFull`]. On acceptance the call returns
    /// immediately with a [`JobHandle`]; the job runs in the background.
    pub fn submit(
        &self,
        file_name: impl Into<String>,
        payload: Bytes,
        topic: Option<String>,
    ) -> Result<JobHandle, IngestError> {
        let file_name = file_name.into();

        if payload.is_empty() {
            return Err(IngestError::InvalidInput("empty upload".to_string()));
        }
        let is_pdf = Path::new(&file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(IngestError::InvalidInput(format!(
                "unsupported file type: {file_name}"
            )));
        }

        let id = Uuid::new_v4();
        let topic = topic.unwrap_or_else(|| self.config.default_topic.clone());
        let (report_tx, report_rx) = oneshot::channel();
        let queued = QueuedJob {
            job: IngestJob {
                id,
                file_name: file_name.clone(),
                topic,
                payload,
            },
            report_tx,
        };

        match self.submit_tx.try_send(queued) {
            Ok(()) => {
                tracing::debug!(job_id = %id, file = %file_name, "Job accepted");
                Ok(JobHandle::new(id, report_rx))
            }
            Err(TrySendError::Full(_)) => Err(IngestError::QueueFull),
            Err(TrySendError::Closed(_)) => Err(IngestError::Shutdown),
        }
    }

    /// Subscribe to progress events from all jobs.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.broadcaster.subscribe()
    }

    /// Subscribe to progress events as a `Stream`.
    pub fn event_stream(&self) -> BroadcastStream<ProgressEvent> {
        self.broadcaster.event_stream()
    }

    /// Stop workers after their current job. Queued jobs are dropped; their
    /// handles resolve to `None`.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        tracing::info!("Ingestion pipeline shutdown requested");
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
