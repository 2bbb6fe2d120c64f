//! Error taxonomy for the ingestion pipeline.
//!
//! Submission-time errors (`InvalidInput`, `QueueFull`, `Shutdown`) surface
//! synchronously to the caller. Everything after acceptance is caught at the
//! job boundary, logged, and reported through the job's `JobReport` and the
//! `Failed` progress event - it never propagates to the submitter directly.

use thiserror::Error;

/// Errors produced by the ingestion pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Wrong file type or empty payload. Raised before a job is created.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The document could not be parsed. Raised by the extractor before any
    /// page-level progress event is emitted.
    #[error("failed to open document")]
    DocumentOpen(#[source] anyhow::Error),

    /// A chunk write to the memory store failed.
    #[error("failed to store chunk {id} in collection {collection}")]
    Storage {
        collection: String,
        id: String,
        #[source]
        source: anyhow::Error,
    },

    /// The job queue is at capacity.
    #[error("ingest queue is full")]
    QueueFull,

    /// The pipeline has been shut down and accepts no further jobs.
    #[error("pipeline is shut down")]
    Shutdown,
}
