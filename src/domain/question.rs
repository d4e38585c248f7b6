use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog lifecycle state; only active questions are servable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Active,
    Paused,
    Archived,
}

/// Optional classification attached to a question
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// A survey question users answer for one coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<QuestionMeta>,
    pub status: QuestionStatus,
    pub created_at: DateTime<Utc>,
}
