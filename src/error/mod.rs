use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum RewardsError {
    // Submission gate rejections
    #[error("Question not served or expired")]
    QuestionNotServed,
    #[error("Too fast. Please read the explanation before confirming.")]
    TooFast,
    #[error("Rate limit exceeded. Try again later.")]
    RateLimited,

    // Payout eligibility rejections
    #[error("Minimum withdrawal is {0} coins")]
    BelowMinimum(u32),
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("MTN mobile number required")]
    MissingPaymentInfo,
    #[error("Only one withdrawal per day is allowed")]
    DailyLimitReached,
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Store error: {0}")]
    StoreFailure(String),
}

pub type RewardsResult<T> = Result<T, RewardsError>;

impl RewardsError {
    /// Stable machine-readable code exposed to API clients
    pub fn code(&self) -> &'static str {
        match self {
            RewardsError::QuestionNotServed => "QUESTION_NOT_SERVED",
            RewardsError::TooFast => "TOO_FAST",
            RewardsError::RateLimited => "RATE_LIMITED",
            RewardsError::BelowMinimum(_) => "BELOW_MINIMUM",
            RewardsError::InsufficientBalance => "INSUFFICIENT_BALANCE",
            RewardsError::MissingPaymentInfo => "MISSING_PAYMENT_INFO",
            RewardsError::DailyLimitReached => "DAILY_LIMIT_REACHED",
            RewardsError::InvalidAmount => "INVALID_AMOUNT",
            RewardsError::Unauthorized => "UNAUTHORIZED",
            RewardsError::InvalidRequest(_) => "INVALID_REQUEST",
            RewardsError::NotFound(_) => "NOT_FOUND",
            RewardsError::StoreFailure(_) => "STORE_ERROR",
        }
    }
}

impl IntoResponse for RewardsError {
    fn into_response(self) -> Response {
        let status = match self {
            RewardsError::TooFast | RewardsError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            RewardsError::Unauthorized => StatusCode::UNAUTHORIZED,
            RewardsError::NotFound(_) => StatusCode::NOT_FOUND,
            RewardsError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

// StoreError to RewardsError conversion implementation
impl From<StoreError> for RewardsError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PayoutNotFound(id) => {
                RewardsError::NotFound(format!("Payout request {} not found", id))
            }
            StoreError::Internal(msg) => RewardsError::StoreFailure(msg),
        }
    }
}
