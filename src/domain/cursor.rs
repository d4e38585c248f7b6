use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Rolling per-user submission window for the hourly rate limit
#[derive(Debug, Clone, Copy)]
pub struct AnswersWindow {
    pub start: DateTime<Utc>,
    pub count: u32,
}

/// Per-user serve cursor: which question was last shown and when, plus the
/// rate-limit window. Not part of the ledger: it gates submissions only and
/// may be reset without losing funds.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserCursor {
    pub last_served_question_id: Option<Uuid>,
    pub last_served_at: Option<DateTime<Utc>>,
    pub answers_window: Option<AnswersWindow>,
}
