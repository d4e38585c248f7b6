// API endpoint handlers

mod auth;
mod health;
mod surveys;
mod wallet;

pub use auth::{AuthUser, MaybeAuthUser, USER_ID_HEADER};
pub use health::health_check;
pub use surveys::{get_next_question, post_answer};
pub use wallet::{get_wallet, request_withdrawal};

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{AnswerService, PayoutService, QuestionService, UserLocks};
use crate::store::Stores;

/// Shared application state handed to every handler
pub struct AppContext {
    pub config: AppConfig,
    pub stores: Stores,
    pub questions: QuestionService,
    pub answers: AnswerService,
    pub payouts: PayoutService,
}

impl AppContext {
    /// Wires the in-memory stores and services for one process
    pub fn new(config: AppConfig) -> Self {
        let stores = Stores::in_memory();
        let locks = Arc::new(UserLocks::new());

        let questions = QuestionService::new(stores.questions.clone(), stores.cursors.clone());
        let answers = AnswerService::new(
            config.gate,
            stores.answers.clone(),
            stores.cursors.clone(),
            stores.wallet.clone(),
            locks.clone(),
        );
        let payouts = PayoutService::new(config.settings, stores.wallet.clone(), locks);

        AppContext {
            config,
            stores,
            questions,
            answers,
            payouts,
        }
    }
}

// Type alias for the application state
pub type AppState = Arc<AppContext>;
