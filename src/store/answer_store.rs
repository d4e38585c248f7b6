use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::StoreError;
use crate::domain::Answer;

/// Recorded answers, append-only. A user's answer count always equals their
/// completed credit count in the wallet ledger.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    async fn record(&self, answer: Answer) -> Result<Answer, StoreError>;

    async fn for_user(&self, user_id: Uuid) -> Result<Vec<Answer>, StoreError>;

    async fn count_for_user(&self, user_id: Uuid) -> Result<usize, StoreError>;
}

/// In-memory answer log keyed by user id
pub struct InMemoryAnswerStore {
    answers: RwLock<HashMap<Uuid, Vec<Answer>>>,
}

impl InMemoryAnswerStore {
    pub fn new() -> Self {
        InMemoryAnswerStore {
            answers: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryAnswerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerStore for InMemoryAnswerStore {
    async fn record(&self, answer: Answer) -> Result<Answer, StoreError> {
        let mut answers = self.answers.write().await;
        answers
            .entry(answer.user_id)
            .or_default()
            .push(answer.clone());
        Ok(answer)
    }

    async fn for_user(&self, user_id: Uuid) -> Result<Vec<Answer>, StoreError> {
        let answers = self.answers.read().await;
        Ok(answers.get(&user_id).cloned().unwrap_or_default())
    }

    async fn count_for_user(&self, user_id: Uuid) -> Result<usize, StoreError> {
        let answers = self.answers.read().await;
        Ok(answers.get(&user_id).map(|list| list.len()).unwrap_or(0))
    }
}
