// Survey question and answer endpoint handlers

use axum::{extract::State, Json};

use crate::error::{RewardsError, RewardsResult};
use crate::handlers::{AppState, AuthUser, MaybeAuthUser};
use crate::models::{AnswerResponse, NextQuestionResponse, QuestionData, SubmitAnswerRequest};

/// GET /api/surveys/next — Serve the next question for the caller
/// Guests get a question too, without cursor rotation
pub async fn get_next_question(
    State(state): State<AppState>,
    MaybeAuthUser(user_id): MaybeAuthUser,
) -> RewardsResult<Json<NextQuestionResponse>> {
    let question = state.questions.next_question(user_id).await?;
    Ok(Json(NextQuestionResponse {
        question: question.map(QuestionData::from),
    }))
}

/// POST /api/surveys/answer — Submit an answer for the served question
pub async fn post_answer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<SubmitAnswerRequest>,
) -> RewardsResult<Json<AnswerResponse>> {
    let question_id = body
        .question_id
        .ok_or_else(|| RewardsError::InvalidRequest("Missing questionId".to_string()))?;
    let meta = body.meta();
    let payload = body.answer.unwrap_or(serde_json::Value::Null);

    let outcome = state
        .answers
        .submit_answer(user_id, question_id, payload, meta)
        .await?;
    tracing::debug!(
        "answer recorded for user {} on question {}, balance {}",
        user_id,
        question_id,
        outcome.balance
    );

    Ok(Json(AnswerResponse {
        ok: true,
        balance: outcome.balance,
    }))
}
