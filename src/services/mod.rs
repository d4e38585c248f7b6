// Business logic service implementations

pub mod answer_service;
pub mod locks;
pub mod payout_service;
pub mod question_service;

pub use answer_service::{AnswerService, SubmissionOutcome};
pub use locks::UserLocks;
pub use payout_service::PayoutService;
pub use question_service::QuestionService;
