//! Pipeline configuration.

use crate::error::IngestError;

/// Collection name used when a submission does not name a topic.
pub const DEFAULT_TOPIC: &str = "global";

/// Ingestion pipeline configuration.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Maximum tokens accumulated into one line by the line chunker.
    pub max_tokens_per_line: usize,
    /// Maximum lines grouped into one paragraph by the paragraph chunker.
    pub max_lines_per_paragraph: usize,
    /// Collection name used when the submitter omits a topic.
    pub default_topic: String,
    /// Number of ingest workers pulling from the job queue.
    pub workers: usize,
    /// Capacity of the job queue; submissions beyond this are rejected.
    pub queue_capacity: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_tokens_per_line: 60,
            max_lines_per_paragraph: 25,
            default_topic: DEFAULT_TOPIC.to_string(),
            workers: 2,
            queue_capacity: 64,
        }
    }
}

impl IngestConfig {
    /// Check that all limits are usable before the pipeline starts.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.max_tokens_per_line == 0 {
            return Err(IngestError::InvalidInput(
                "max_tokens_per_line must be greater than zero".to_string(),
            ));
        }
        if self.max_lines_per_paragraph == 0 {
            return Err(IngestError::InvalidInput(
                "max_lines_per_paragraph must be greater than zero".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(IngestError::InvalidInput(
                "workers must be greater than zero".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(IngestError::InvalidInput(
                "queue_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
