// Core domain models

mod answer;
mod cursor;
mod question;
mod wallet;

pub use answer::{Answer, AnswerMeta};
pub use cursor::{AnswersWindow, UserCursor};
pub use question::{Question, QuestionMeta, QuestionStatus};
pub use wallet::{PayoutRequest, TxStatus, TxType, WalletBalance, WalletTransaction};
