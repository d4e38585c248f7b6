// Store abstractions and in-memory implementations
//
// Services depend on these traits only; the in-memory maps stand in for a
// durable database and can be swapped without touching business logic.

mod answer_store;
mod cursor_store;
mod question_store;
mod wallet_store;

pub use answer_store::{AnswerStore, InMemoryAnswerStore};
pub use cursor_store::{CursorStore, InMemoryCursorStore};
pub use question_store::{InMemoryQuestionStore, QuestionStore};
pub use wallet_store::{InMemoryWalletStore, WalletStore};

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Payout request {0} not found")]
    PayoutNotFound(Uuid),
    #[error("Store error: {0}")]
    Internal(String),
}

/// Container for all stores
#[derive(Clone)]
pub struct Stores {
    pub questions: Arc<dyn QuestionStore>,
    pub answers: Arc<dyn AnswerStore>,
    pub wallet: Arc<dyn WalletStore>,
    pub cursors: Arc<dyn CursorStore>,
}

impl Stores {
    /// Creates the in-memory store set used by the reference deployment
    pub fn in_memory() -> Self {
        Stores {
            questions: Arc::new(InMemoryQuestionStore::new()),
            answers: Arc::new(InMemoryAnswerStore::new()),
            wallet: Arc::new(InMemoryWalletStore::new()),
            cursors: Arc::new(InMemoryCursorStore::new()),
        }
    }
}
