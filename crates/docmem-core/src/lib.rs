//! docmem-core - document ingestion for a semantic memory store.
//!
//! Takes ownership of an uploaded document, extracts its text page by page,
//! splits it into bounded-size chunks, and persists each chunk into a named
//! collection while broadcasting progress to all subscribers:
//!
//! - PDF text extraction (lopdf), page-ordered and lazy
//! - Token-bounded line splitting, line-bounded paragraph splitting
//! - Write-only [`MemoryStore`] seam with an in-memory reference store
//! - Shared broadcast channel for progress, correlated per job
//! - Bounded worker pool; submission validates and returns immediately
//!
//! The HTTP upload surface, authentication, and the concrete vector store
//! are outside this crate; [`Pipeline::submit`] is the boundary.

pub mod chunking;
pub mod config;
pub mod error;
pub mod jobs;
pub mod memory;
pub mod pdf;
pub mod progress;

pub use config::IngestConfig;
pub use error::IngestError;
pub use jobs::{IngestJob, JobHandle, JobOutcome, JobReport, JobState, Pipeline};
pub use memory::{InMemoryStore, MemoryRecord, MemoryStore};
pub use pdf::PdfPages;
pub use progress::{ProgressBroadcaster, ProgressEvent, Stage};
