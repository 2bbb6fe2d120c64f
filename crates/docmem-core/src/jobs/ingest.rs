//! Per-job ingestion state machine.
//!
//! `Extracting -> Chunking -> Storing -> Completed`, aborting in place on
//! the first failure. Progress milestones are published around every state
//! transition and at every page and chunk boundary.

use std::sync::Arc;

use uuid::Uuid;

use crate::chunking::{split_lines, split_paragraphs};
use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::memory::MemoryStore;
use crate::pdf::PdfPages;
use crate::progress::{ProgressBroadcaster, Stage};

use super::types::{IngestJob, JobState};

/// Counters from a completed job.
pub(crate) struct JobStats {
    pub pages: usize,
    pub chunks_stored: usize,
}

/// Where and why a job aborted. Chunks stored before the failure remain
/// persisted; there is no rollback.
pub(crate) struct JobFailure {
    pub state: JobState,
    pub chunks_stored: usize,
    pub error: IngestError,
}

/// Run one job to completion or abortion.
///
/// Emits `Started` at 0%, `PageParsed` per page scaled to the page count,
/// `MemoryPhaseStarted` at 0%, `ChunkStored` per persisted chunk scaled to
/// the chunk count, and `Completed` at 100%. No event is emitted here on
/// failure; the worker publishes the `Failed` terminal.
pub(crate) async fn run(
    job: &IngestJob,
    store: &Arc<dyn MemoryStore>,
    broadcaster: &ProgressBroadcaster,
    config: &IngestConfig,
) -> Result<JobStats, JobFailure> {
    broadcaster.publish(job.id, Stage::Started, 0, job.file_name.as_str());

    // Extracting: page-ordered, lossless concatenation.
    let pages = PdfPages::open(&job.payload).map_err(|error| JobFailure {
        state: JobState::Extracting,
        chunks_stored: 0,
        error,
    })?;
    let page_count = pages.page_count();

    let mut text = String::new();
    let mut pages_read = 0;
    for (page_number, fragment) in pages {
        text.push_str(&fragment);
        pages_read = page_number;

        // Page count bounds progress resolution: a 1-page document only
        // ever reports 100% here.
        let percent = (page_number * 100 / page_count) as u8;
        broadcaster.publish(job.id, Stage::PageParsed, percent, format!("p:{page_number}"));

        // Extraction is CPU-bound; yield between pages so one large
        // document cannot monopolize a worker.
        tokio::task::yield_now().await;
    }
    tracing::debug!(job_id = %job.id, pages = pages_read, chars = text.len(), "Extracted document text");

    // Chunking: token-bounded lines, then line-bounded paragraphs.
    let lines = split_lines(&text, config.max_tokens_per_line);
    let paragraphs = split_paragraphs(&lines, config.max_lines_per_paragraph);
    broadcaster.publish(job.id, Stage::MemoryPhaseStarted, 0, job.file_name.as_str());

    // Storing: one independent write per paragraph, fresh id each.
    let total_chunks = paragraphs.len();
    let description = format!("Document: {}", job.file_name);
    let mut chunks_stored = 0;

    for paragraph in &paragraphs {
        let chunk_id = Uuid::new_v4().to_string();
        store
            .store(&job.topic, &chunk_id, paragraph, &description)
            .await
            .map_err(|source| JobFailure {
                state: JobState::Storing,
                chunks_stored,
                error: IngestError::Storage {
                    collection: job.topic.clone(),
                    id: chunk_id.clone(),
                    source,
                },
            })?;
        chunks_stored += 1;

        // The last chunk reports 100%; Completed below is the authoritative
        // terminal either way.
        let percent = (chunks_stored * 100 / total_chunks) as u8;
        broadcaster.publish(job.id, Stage::ChunkStored, percent, job.file_name.as_str());
    }

    broadcaster.publish(job.id, Stage::Completed, 100, job.file_name.as_str());

    Ok(JobStats {
        pages: pages_read,
        chunks_stored,
    })
}
