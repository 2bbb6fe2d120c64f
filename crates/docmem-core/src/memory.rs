//! Memory store seam and in-memory reference implementation.
//!
//! The pipeline only ever writes: one record per paragraph chunk, keyed by
//! `(collection, id)`. No read-back, update, or delete. The concrete vector
//! store lives behind [`MemoryStore`]; [`InMemoryStore`] is the reference
//! implementation used by tests and default wiring.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A persisted chunk of document text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Logical collection (topic) the record belongs to.
    pub collection: String,
    /// Globally unique record id, supplied by the caller.
    pub id: String,
    /// Paragraph chunk content.
    pub text: String,
    /// Provenance, e.g. `Document: report.pdf`.
    pub description: String,
    pub created_at: String,
}

/// Write-only interface to the semantic memory store.
///
/// Each call is an independent write; chunks of one job are not a
/// transactional group. Implementations must not deduplicate or merge by
/// content - the caller supplies a fresh id per chunk.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    async fn store(
        &self,
        collection: &str,
        id: &str,
        text: &str,
        description: &str,
    ) -> anyhow::Result<()>;
}

/// In-memory store keeping records per collection, in write order.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<MemoryRecord>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records written to a collection, in write order.
    pub async fn records(&self, collection: &str) -> Vec<MemoryRecord> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of records in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn store(
        &self,
        collection: &str,
        id: &str,
        text: &str,
        description: &str,
    ) -> anyhow::Result<()> {
        let record = MemoryRecord {
            collection: collection.to_string(),
            id: id.to_string(),
            text: text.to_string(),
            description: description.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record);

        tracing::debug!(collection, id, "Stored memory record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_records_in_write_order() {
        let store = InMemoryStore::new();
        store.store("docs", "id-1", "first", "d").await.unwrap();
        store.store("docs", "id-2", "second", "d").await.unwrap();

        let records = store.records("docs").await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "id-1");
        assert_eq!(records[1].text, "second");
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = InMemoryStore::new();
        store.store("a", "id-1", "text", "d").await.unwrap();

        assert_eq!(store.count("a").await, 1);
        assert_eq!(store.count("b").await, 0);
        assert!(store.records("b").await.is_empty());
    }

    #[tokio::test]
    async fn identical_content_is_not_merged() {
        let store = InMemoryStore::new();
        store.store("docs", "id-1", "same", "d").await.unwrap();
        store.store("docs", "id-2", "same", "d").await.unwrap();

        assert_eq!(store.count("docs").await, 2);
    }
}
