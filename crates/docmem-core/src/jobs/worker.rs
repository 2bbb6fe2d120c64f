//! Bounded worker pool for ingestion jobs.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::config::IngestConfig;
use crate::memory::MemoryStore;
use crate::progress::{ProgressBroadcaster, Stage};

use super::ingest;
use super::types::{JobOutcome, JobReport, QueuedJob};

/// Shared receiver for multiple workers pulling from one bounded channel.
pub(crate) struct SharedReceiver<T> {
    rx: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> SharedReceiver<T> {
    pub fn new(rx: mpsc::Receiver<T>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    pub async fn recv(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }
}

impl<T> Clone for SharedReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

/// Spawn the ingest worker pool.
///
/// Each worker pulls jobs off the shared queue and runs them one at a time.
/// A job failure is logged and reported; it never takes the worker down.
/// The cancellation token stops workers between jobs, not mid-job.
pub(crate) fn spawn_ingest_workers(
    count: usize,
    rx: SharedReceiver<QueuedJob>,
    store: Arc<dyn MemoryStore>,
    broadcaster: ProgressBroadcaster,
    config: IngestConfig,
    cancel: CancellationToken,
) {
    for i in 0..count {
        let rx = rx.clone();
        let store = store.clone();
        let broadcaster = broadcaster.clone();
        let config = config.clone();
        let cancel = cancel.clone();

        tokio::spawn(async move {
            tracing::debug!(worker = i, "Ingest worker started");

            loop {
                let queued = tokio::select! {
                    _ = cancel.cancelled() => break,
                    queued = rx.recv() => match queued {
                        Some(queued) => queued,
                        None => break,
                    },
                };

                let QueuedJob { job, report_tx } = queued;

                let report = match ingest::run(&job, &store, &broadcaster, &config).await {
                    Ok(stats) => {
                        tracing::info!(
                            job_id = %job.id,
                            file = %job.file_name,
                            pages = stats.pages,
                            chunks = stats.chunks_stored,
                            "Document ingested"
                        );
                        JobReport {
                            job_id: job.id,
                            file_name: job.file_name,
                            outcome: JobOutcome::Completed {
                                pages: stats.pages,
                                chunks_stored: stats.chunks_stored,
                            },
                        }
                    }
                    Err(failure) => {
                        tracing::error!(
                            job_id = %job.id,
                            file = %job.file_name,
                            state = %failure.state,
                            error = %failure.error,
                            "Ingest job failed"
                        );
                        // Distinct terminal so observers can tell completion
                        // from abortion. Partial writes stay persisted.
                        broadcaster.publish(job.id, Stage::Failed, 100, job.file_name.as_str());
                        JobReport {
                            job_id: job.id,
                            file_name: job.file_name,
                            outcome: JobOutcome::Failed {
                                state: failure.state,
                                chunks_stored: failure.chunks_stored,
                                error: failure.error.to_string(),
                            },
                        }
                    }
                };

                // Submitter may have dropped its handle.
                let _ = report_tx.send(report);
            }

            tracing::debug!(worker = i, "Ingest worker stopped");
        });
    }
}
