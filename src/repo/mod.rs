mod json_file;

pub use json_file::JsonFileStore;

use async_trait::async_trait;

use crate::model::{Message, NewMessage};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No collection has ever been persisted. Distinct from an existing,
    /// empty collection.
    #[error("no message collection has been persisted yet")]
    CollectionMissing,

    #[error("failed to read or write the message collection")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode the message collection")]
    Serde(#[from] serde_json::Error),
}

/// Durable, concurrency-safe access to the message collection.
///
/// Implementations own the persisted collection outright; nothing else may
/// mutate it. Callers only see the append/list/delete contract, so the
/// JSON-file backend can be swapped for an embedded database without
/// touching the rest of the pipeline.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Assign a fresh unique id, append the record, and return it as stored.
    ///
    /// On failure the previously persisted collection stays intact.
    async fn append(&self, new_message: NewMessage) -> Result<Message, StoreError>;

    /// The full collection in insertion order. Empty if nothing has been
    /// persisted yet; never an error on first use.
    async fn list(&self) -> Result<Vec<Message>, StoreError>;

    /// Remove the record with the given id, preserving the order of the
    /// rest. Returns whether anything was removed; an absent id is a no-op,
    /// not an error. Fails with [`StoreError::CollectionMissing`] when no
    /// collection exists at all.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
