// API request/response models

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::Settings;
use crate::domain::{AnswerMeta, PayoutRequest, Question, QuestionMeta, WalletTransaction};

/// Response for GET /api/surveys/next
#[derive(Debug, Serialize)]
pub struct NextQuestionResponse {
    pub question: Option<QuestionData>,
}

/// Question fields exposed to clients; catalog state stays internal
#[derive(Debug, Serialize)]
pub struct QuestionData {
    pub id: Uuid,
    pub text: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<QuestionMeta>,
}

impl From<Question> for QuestionData {
    fn from(q: Question) -> Self {
        QuestionData {
            id: q.id,
            text: q.text,
            explanation: q.explanation,
            metadata: q.metadata,
        }
    }
}

/// Request body for POST /api/surveys/answer
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    #[serde(rename = "questionId")]
    pub question_id: Option<Uuid>,
    pub answer: Option<Value>,
    #[serde(rename = "clientTs")]
    pub client_ts: Option<i64>,
    #[serde(rename = "explanationReadAt")]
    pub explanation_read_at: Option<i64>,
}

impl SubmitAnswerRequest {
    /// Client timing metadata recorded alongside the answer, if any was sent
    pub fn meta(&self) -> Option<AnswerMeta> {
        if self.client_ts.is_none() && self.explanation_read_at.is_none() {
            return None;
        }
        Some(AnswerMeta {
            client_ts: self.client_ts,
            explanation_read_at: self.explanation_read_at,
        })
    }
}

/// Response for POST /api/surveys/answer
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub ok: bool,
    pub balance: i64,
}

/// Response for GET /api/wallet
#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub balance: i64,
    pub pending: i64,
    pub transactions: Vec<WalletTransaction>,
    pub settings: Settings,
}

/// Request body for POST /api/wallet/withdraw
#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    pub coins: Option<u32>,
    pub mtn_mobile: Option<String>,
}

/// Response for POST /api/wallet/withdraw
#[derive(Debug, Serialize)]
pub struct WithdrawResponse {
    pub request: PayoutRequest,
}
