use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::StoreError;
use crate::domain::{AnswersWindow, UserCursor};

/// Per-user serve cursors. A cursor is a gate, not a ledger entry: losing it
/// costs a user one re-serve, never coins.
#[async_trait]
pub trait CursorStore: Send + Sync {
    /// The user's cursor, or an empty one if none exists yet
    async fn get(&self, user_id: Uuid) -> Result<UserCursor, StoreError>;

    /// Arms the cursor with the question just served
    async fn stamp_served(
        &self,
        user_id: Uuid,
        question_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Disarms the serve stamp and stores the advanced rate-limit window
    /// after an accepted answer; both halves change in one mutation
    async fn consume_serve(&self, user_id: Uuid, window: AnswersWindow) -> Result<(), StoreError>;
}

/// In-memory cursor map
pub struct InMemoryCursorStore {
    cursors: RwLock<HashMap<Uuid, UserCursor>>,
}

impl InMemoryCursorStore {
    pub fn new() -> Self {
        InMemoryCursorStore {
            cursors: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCursorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CursorStore for InMemoryCursorStore {
    async fn get(&self, user_id: Uuid) -> Result<UserCursor, StoreError> {
        let cursors = self.cursors.read().await;
        Ok(cursors.get(&user_id).copied().unwrap_or_default())
    }

    async fn stamp_served(
        &self,
        user_id: Uuid,
        question_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut cursors = self.cursors.write().await;
        let cursor = cursors.entry(user_id).or_default();
        cursor.last_served_question_id = Some(question_id);
        cursor.last_served_at = Some(at);
        Ok(())
    }

    async fn consume_serve(&self, user_id: Uuid, window: AnswersWindow) -> Result<(), StoreError> {
        let mut cursors = self.cursors.write().await;
        let cursor = cursors.entry(user_id).or_default();
        cursor.last_served_question_id = None;
        cursor.last_served_at = None;
        cursor.answers_window = Some(window);
        Ok(())
    }
}
