use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::GateConfig;
use crate::domain::{Answer, AnswerMeta, AnswersWindow};
use crate::error::{RewardsError, RewardsResult};
use crate::services::UserLocks;
use crate::store::{AnswerStore, CursorStore, WalletStore};

/// Result of an accepted submission
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub answer: Answer,
    pub balance: i64,
}

/// Gates answer submissions behind three checks, first failure wins:
/// the submitted question must be the one currently served, the minimum
/// dwell time must have elapsed, and the hourly window must have room.
/// Past the gate, the answer is recorded, one coin is credited and the
/// window advances as a single logical step under the per-user lock.
pub struct AnswerService {
    gate: GateConfig,
    answers: Arc<dyn AnswerStore>,
    cursors: Arc<dyn CursorStore>,
    wallet: Arc<dyn WalletStore>,
    locks: Arc<UserLocks>,
}

impl AnswerService {
    pub fn new(
        gate: GateConfig,
        answers: Arc<dyn AnswerStore>,
        cursors: Arc<dyn CursorStore>,
        wallet: Arc<dyn WalletStore>,
        locks: Arc<UserLocks>,
    ) -> Self {
        AnswerService {
            gate,
            answers,
            cursors,
            wallet,
            locks,
        }
    }

    pub async fn submit_answer(
        &self,
        user_id: Uuid,
        question_id: Uuid,
        answer_payload: serde_json::Value,
        meta: Option<AnswerMeta>,
    ) -> RewardsResult<SubmissionOutcome> {
        // Serialize every check-then-credit sequence for this user
        let _guard = self.locks.acquire(user_id).await;

        let cursor = self.cursors.get(user_id).await?;
        if cursor.last_served_question_id != Some(question_id) {
            return Err(RewardsError::QuestionNotServed);
        }

        let now = Utc::now();
        let served_at = cursor.last_served_at.unwrap_or(now);
        if !dwell_elapsed(served_at, now, self.gate.min_dwell_ms) {
            return Err(RewardsError::TooFast);
        }

        let window = roll_window(cursor.answers_window, now);
        if window.count >= self.gate.max_answers_per_hour {
            return Err(RewardsError::RateLimited);
        }

        // Past the gate: answer, credit and window advance together
        let answer = self
            .answers
            .record(Answer {
                id: Uuid::new_v4(),
                user_id,
                question_id,
                answer_payload,
                awarded_coin: 1,
                created_at: now,
                meta,
            })
            .await?;
        self.wallet
            .credit_coins(user_id, 1, Some(format!("answer:{}", question_id)))
            .await?;
        self.cursors
            .consume_serve(
                user_id,
                AnswersWindow {
                    start: window.start,
                    count: window.count + 1,
                },
            )
            .await?;

        let balance = self.wallet.balance(user_id).await?;
        Ok(SubmissionOutcome {
            answer,
            balance: balance.available,
        })
    }
}

/// True when at least `min_dwell_ms` elapsed between serve and submission;
/// the exact boundary is accepted
fn dwell_elapsed(served_at: DateTime<Utc>, now: DateTime<Utc>, min_dwell_ms: i64) -> bool {
    now.signed_duration_since(served_at).num_milliseconds() >= min_dwell_ms
}

/// Rolls the hourly window: starts fresh when more than an hour has passed
/// since the window opened, otherwise keeps accumulating
fn roll_window(window: Option<AnswersWindow>, now: DateTime<Utc>) -> AnswersWindow {
    match window {
        Some(w) if now.signed_duration_since(w.start) <= Duration::hours(1) => w,
        _ => AnswersWindow {
            start: now,
            count: 0,
        },
    }
}
