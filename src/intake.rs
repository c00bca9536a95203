use std::sync::Arc;

use crate::domain::ValidationError;
use crate::model::{ContactForm, Message, NewMessage};
use crate::notify::Notifier;
use crate::repo::{MessageStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to save message")]
    Storage(#[from] StoreError),
}

/// Façade coordinating validation, persistence, and notification.
pub struct Intake {
    store: Arc<dyn MessageStore>,
    notifier: Arc<Notifier>,
}

impl Intake {
    pub fn new(store: Arc<dyn MessageStore>, notifier: Notifier) -> Self {
        Self {
            store,
            notifier: Arc::new(notifier),
        }
    }

    /// Validate a submission, persist it, and kick off the owner
    /// notification in the background.
    ///
    /// The returned result reflects validation and persistence only; the
    /// notification runs detached and can neither delay nor roll back an
    /// acknowledged append.
    #[tracing::instrument(name = "Accept a contact submission", skip(self))]
    pub async fn submit(&self, form: ContactForm) -> Result<Message, SubmissionError> {
        let new_message = NewMessage::try_from(form)?;

        let stored = self.store.append(new_message).await?;

        let notifier = Arc::clone(&self.notifier);
        let record = stored.clone();
        tokio::spawn(async move {
            notifier.notify(&record).await;
        });

        Ok(stored)
    }

    pub async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        self.store.list().await
    }

    pub async fn delete_message(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete(id).await
    }
}
