use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-reported timing metadata recorded alongside an answer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_read_at: Option<i64>,
}

/// A recorded survey answer. Created once per accepted submission, never
/// mutated; exactly one credit transaction is written alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub answer_payload: serde_json::Value,
    pub awarded_coin: u32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<AnswerMeta>,
}
