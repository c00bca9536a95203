use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use tokio::fs;
use tokio::sync::Mutex;

use uuid::Uuid;

use crate::model::{Message, NewMessage};
use crate::repo::{MessageStore, StoreError};

const COLLECTION_FILE: &str = "messages.json";

/// Message store backed by a single pretty-printed JSON array on disk.
///
/// Every mutation is a read-modify-write cycle under one mutex, so two
/// concurrent writers can never interleave their read and write phases and
/// drop each other's changes. The rewrite goes to a temp file in the same
/// directory followed by a rename, so readers only ever observe the previous
/// or the next collection, never a truncated one.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(COLLECTION_FILE),
            lock: Mutex::new(()),
        }
    }

    /// `None` when no collection file exists yet.
    async fn read_collection(&self) -> Result<Option<Vec<Message>>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn write_collection(&self, messages: &[Message]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let payload = serde_json::to_vec_pretty(messages)?;

        // Temp file lives next to the target so the rename stays on one
        // filesystem and is atomic.
        let tmp_path = self
            .path
            .with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));

        fs::write(&tmp_path, payload).await?;

        if let Err(error) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(error.into());
        }

        Ok(())
    }
}

#[async_trait]
impl MessageStore for JsonFileStore {
    #[tracing::instrument(name = "Append message to collection", skip(self, new_message))]
    async fn append(&self, new_message: NewMessage) -> Result<Message, StoreError> {
        let _guard = self.lock.lock().await;

        let mut messages = self.read_collection().await?.unwrap_or_default();

        let stored = Message::assemble(Uuid::new_v4().simple().to_string(), new_message);
        messages.push(stored.clone());

        self.write_collection(&messages).await?;

        Ok(stored)
    }

    #[tracing::instrument(name = "List message collection", skip(self))]
    async fn list(&self) -> Result<Vec<Message>, StoreError> {
        // Takes the writer lock too, so a list can never race a rewrite.
        let _guard = self.lock.lock().await;

        Ok(self.read_collection().await?.unwrap_or_default())
    }

    #[tracing::instrument(name = "Delete message from collection", skip(self))]
    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;

        let mut messages = self
            .read_collection()
            .await?
            .ok_or(StoreError::CollectionMissing)?;

        let before = messages.len();
        messages.retain(|message| message.id != id);
        let removed = messages.len() < before;

        if removed {
            self.write_collection(&messages).await?;
        }

        Ok(removed)
    }
}
