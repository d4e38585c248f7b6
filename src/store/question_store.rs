use async_trait::async_trait;
use tokio::sync::RwLock;

use super::StoreError;
use crate::domain::{Question, QuestionStatus};

/// Catalog of survey questions. Stored order is serving order, so rotation
/// stays deterministic.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn insert(&self, question: Question) -> Result<(), StoreError>;

    /// Questions currently eligible for serving
    async fn active_questions(&self) -> Result<Vec<Question>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}

/// In-memory question catalog
pub struct InMemoryQuestionStore {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        InMemoryQuestionStore {
            questions: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryQuestionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn insert(&self, question: Question) -> Result<(), StoreError> {
        self.questions.write().await.push(question);
        Ok(())
    }

    async fn active_questions(&self) -> Result<Vec<Question>, StoreError> {
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| q.status == QuestionStatus::Active)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.questions.read().await.len())
    }
}
