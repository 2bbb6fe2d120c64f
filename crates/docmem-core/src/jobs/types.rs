//! Job types for the ingestion pipeline.

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::oneshot;
use uuid::Uuid;

/// One accepted document, owned by exactly one worker for its lifetime.
///
/// No job record is persisted anywhere; the job exists only as this value
/// travelling from the submitter's queue slot to a worker.
#[derive(Debug)]
pub struct IngestJob {
    /// Correlation id carried by every progress event of this job.
    pub id: Uuid,
    pub file_name: String,
    /// Logical collection the chunks are written to.
    pub topic: String,
    /// The uploaded document, positioned at its start.
    pub payload: Bytes,
}

/// A job plus the channel its final report is delivered on.
pub(crate) struct QueuedJob {
    pub job: IngestJob,
    pub report_tx: oneshot::Sender<JobReport>,
}

/// Pipeline state a job was in when it succeeded or aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Extracting,
    /// Splitting text into lines and paragraphs. The splitters are total
    /// functions, so no failure report ever carries this state; it is kept
    /// so the wire enum names every pipeline state.
    Chunking,
    Storing,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Extracting => write!(f, "extracting"),
            JobState::Chunking => write!(f, "chunking"),
            JobState::Storing => write!(f, "storing"),
        }
    }
}

/// Final outcome of one ingestion job.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobOutcome {
    Completed {
        pages: usize,
        chunks_stored: usize,
    },
    /// The job aborted; chunks written before the failure stay persisted.
    Failed {
        state: JobState,
        chunks_stored: usize,
        error: String,
    },
}

/// Report delivered to the submitter when a job finishes either way.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub job_id: Uuid,
    pub file_name: String,
    pub outcome: JobOutcome,
}

/// Handle returned at submission time.
///
/// Dropping the handle does not cancel the job; it only discards the report.
#[derive(Debug)]
pub struct JobHandle {
    pub id: Uuid,
    report: oneshot::Receiver<JobReport>,
}

impl JobHandle {
    pub(crate) fn new(id: Uuid, report: oneshot::Receiver<JobReport>) -> Self {
        Self { id, report }
    }

    /// Wait for the job's final report. Returns `None` if the pipeline shut
    /// down before the job finished.
    pub async fn wait(self) -> Option<JobReport> {
        self.report.await.ok()
    }
}
