//! Progress broadcasting for ingestion jobs.
//!
//! Every job milestone is published to a shared broadcast channel that fans
//! out to all current subscribers. Delivery is fire-and-forget: no
//! acknowledgment, no back-pressure, and a lagging subscriber drops events
//! rather than slowing the pipeline. Events carry the job's correlation id
//! so subscribers observing concurrent jobs can attribute every event.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

/// Broadcast channel capacity. Slow subscribers past this lag drop events.
const CHANNEL_CAPACITY: usize = 256;

/// Pipeline milestone category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Job accepted and started (0%).
    Started,
    /// One page of text extracted.
    PageParsed,
    /// Chunking finished, writes are about to begin (0%).
    MemoryPhaseStarted,
    /// One paragraph chunk persisted.
    ChunkStored,
    /// Job finished successfully (100%).
    Completed,
    /// Job aborted; chunks written so far remain persisted.
    Failed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Started => write!(f, "started"),
            Stage::PageParsed => write!(f, "page_parsed"),
            Stage::MemoryPhaseStarted => write!(f, "memory_phase_started"),
            Stage::ChunkStored => write!(f, "chunk_stored"),
            Stage::Completed => write!(f, "completed"),
            Stage::Failed => write!(f, "failed"),
        }
    }
}

/// A transient progress notification. Never persisted; exists only on the
/// wire to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Correlation id of the job this event belongs to.
    pub job_id: Uuid,
    pub stage: Stage,
    /// 0-100, non-decreasing per stage category within one job.
    pub percent: u8,
    /// File name, or `p:{page}` while extracting.
    pub label: String,
}

/// Fan-out publisher shared by all jobs.
#[derive(Clone)]
pub struct ProgressBroadcaster {
    tx: broadcast::Sender<ProgressEvent>,
}

impl Default for ProgressBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to all progress events from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.tx.subscribe()
    }

    /// Subscribe as a `Stream` for async iteration.
    pub fn event_stream(&self) -> BroadcastStream<ProgressEvent> {
        BroadcastStream::new(self.tx.subscribe())
    }

    /// Publish a milestone. Fire-and-forget: an error just means there are
    /// no current subscribers.
    pub fn publish(&self, job_id: Uuid, stage: Stage, percent: u8, label: impl Into<String>) {
        let event = ProgressEvent {
            job_id,
            stage,
            percent,
            label: label.into(),
        };
        tracing::trace!(job_id = %event.job_id, stage = %event.stage, percent = event.percent, "Progress");
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_all_subscribers() {
        let broadcaster = ProgressBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        let job_id = Uuid::new_v4();
        broadcaster.publish(job_id, Stage::Started, 0, "file.pdf");

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.job_id, job_id);
        assert_eq!(e2.stage, Stage::Started);
        assert_eq!(e2.label, "file.pdf");
    }

    #[tokio::test]
    async fn publish_without_subscribers_does_not_panic() {
        let broadcaster = ProgressBroadcaster::new();
        broadcaster.publish(Uuid::new_v4(), Stage::Completed, 100, "file.pdf");
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_events() {
        let broadcaster = ProgressBroadcaster::new();
        broadcaster.publish(Uuid::new_v4(), Stage::Started, 0, "early.pdf");

        let mut rx = broadcaster.subscribe();
        broadcaster.publish(Uuid::new_v4(), Stage::Completed, 100, "late.pdf");

        let event = rx.recv().await.unwrap();
        assert_eq!(event.label, "late.pdf");
    }

    #[test]
    fn event_serializes_with_snake_case_stage() {
        let event = ProgressEvent {
            job_id: Uuid::nil(),
            stage: Stage::MemoryPhaseStarted,
            percent: 0,
            label: String::new(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["stage"], "memory_phase_started");
        assert_eq!(value["percent"], 0);
        assert_eq!(value["job_id"], "00000000-0000-0000-0000-000000000000");
    }
}
