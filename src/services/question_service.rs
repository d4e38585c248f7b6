use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Question, QuestionMeta, QuestionStatus};
use crate::error::RewardsResult;
use crate::store::{CursorStore, QuestionStore};

/// Serves questions from the active catalog, avoiding immediate repetition
/// of the question last served to the same user.
pub struct QuestionService {
    questions: Arc<dyn QuestionStore>,
    cursors: Arc<dyn CursorStore>,
}

impl QuestionService {
    pub fn new(questions: Arc<dyn QuestionStore>, cursors: Arc<dyn CursorStore>) -> Self {
        QuestionService { questions, cursors }
    }

    /// Picks the next question for a user and arms their serve cursor.
    /// An empty catalog yields `None`; guests get a question without any
    /// cursor rotation. The anti-repeat guarantee is weak on purpose: scan
    /// the active pool in stored order, skip the last-served id, fall back
    /// to the first question when the pool has nothing else to offer.
    pub async fn next_question(&self, user_id: Option<Uuid>) -> RewardsResult<Option<Question>> {
        let pool = self.questions.active_questions().await?;
        if pool.is_empty() {
            return Ok(None);
        }

        let last_served = match user_id {
            Some(uid) => self.cursors.get(uid).await?.last_served_question_id,
            None => None,
        };

        let question = pool
            .iter()
            .find(|q| Some(q.id) != last_served)
            .unwrap_or(&pool[0])
            .clone();

        if let Some(uid) = user_id {
            self.cursors
                .stamp_served(uid, question.id, Utc::now())
                .await?;
        }

        Ok(Some(question))
    }

    /// Seeds the catalog with the launch question set. Safe to call on every
    /// boot; an already-populated catalog is left untouched.
    pub async fn seed_questions(&self) -> RewardsResult<usize> {
        if self.questions.count().await? > 0 {
            return Ok(0);
        }

        let samples = launch_questions();
        let count = samples.len();
        let now = Utc::now();
        for (text, explanation, metadata) in samples {
            self.questions
                .insert(Question {
                    id: Uuid::new_v4(),
                    text: text.to_string(),
                    explanation: explanation.to_string(),
                    metadata: Some(metadata),
                    status: QuestionStatus::Active,
                    created_at: now,
                })
                .await?;
        }
        Ok(count)
    }
}

fn meta(tags: &[&str], category: &str) -> QuestionMeta {
    QuestionMeta {
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        category: Some(category.to_string()),
        difficulty: None,
    }
}

/// The launch question set served until operators load their own catalog
fn launch_questions() -> Vec<(&'static str, &'static str, QuestionMeta)> {
    vec![
        (
            "How many minutes do you typically spend commuting each weekday?",
            "We ask this to help urban planners and mobility startups understand travel patterns and reduce congestion. Your answer guides public transport schedules and micro-mobility placement.",
            meta(&["mobility", "lifestyle"], "daily"),
        ),
        (
            "Which grocery item have you noticed has increased most in price recently?",
            "Knowing price sensitivity by category helps retailers plan discounts and helps regulators monitor inflation. We never share personal data, only aggregated insights.",
            meta(&["retail", "inflation"], "economy"),
        ),
        (
            "How reliable is your mobile network during peak evening hours?",
            "This informs telecom providers about coverage gaps and capacity issues, so they can improve service in high-demand neighborhoods.",
            meta(&["telecom"], "utilities"),
        ),
        (
            "Do you prefer mobile money or cash for small purchases under 5,000?",
            "Fintech teams use this to improve checkout experiences and expand acceptance for small merchants. Your feedback shapes real-world payment experiences.",
            meta(&["fintech"], "payments"),
        ),
        (
            "How many hours of uninterrupted electricity did you have yesterday?",
            "Energy planners and backup power providers use this to plan capacity and support reliability improvements in your area.",
            meta(&["energy"], "utilities"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryCursorStore, InMemoryQuestionStore};

    fn service() -> (QuestionService, Arc<InMemoryCursorStore>) {
        let questions: Arc<dyn QuestionStore> = Arc::new(InMemoryQuestionStore::new());
        let cursor_store = Arc::new(InMemoryCursorStore::new());
        let cursors: Arc<dyn CursorStore> = cursor_store.clone();
        (QuestionService::new(questions, cursors), cursor_store)
    }

    #[tokio::test]
    async fn empty_catalog_yields_none() {
        let (service, _) = service();
        let next = service.next_question(Some(Uuid::new_v4())).await.unwrap();
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn rotation_skips_the_last_served_question() {
        let (service, _) = service();
        service.seed_questions().await.unwrap();
        let user = Uuid::new_v4();

        let first = service.next_question(Some(user)).await.unwrap().unwrap();
        let second = service.next_question(Some(user)).await.unwrap().unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn pool_of_one_repeats_the_same_question() {
        let (service, _) = service();
        let only = Question {
            id: Uuid::new_v4(),
            text: "only".to_string(),
            explanation: String::new(),
            metadata: None,
            status: QuestionStatus::Active,
            created_at: Utc::now(),
        };
        service.questions.insert(only.clone()).await.unwrap();
        let user = Uuid::new_v4();

        let first = service.next_question(Some(user)).await.unwrap().unwrap();
        let second = service.next_question(Some(user)).await.unwrap().unwrap();
        assert_eq!(first.id, only.id);
        assert_eq!(second.id, only.id);
    }

    #[tokio::test]
    async fn guest_serves_do_not_touch_cursors() {
        let (service, cursors) = service();
        service.seed_questions().await.unwrap();

        let next = service.next_question(None).await.unwrap();
        assert!(next.is_some());
        // No cursor entry was created for anyone
        let stray = cursors.get(Uuid::new_v4()).await.unwrap();
        assert!(stray.last_served_question_id.is_none());
    }

    #[tokio::test]
    async fn authenticated_serve_arms_the_cursor() {
        let (service, cursors) = service();
        service.seed_questions().await.unwrap();
        let user = Uuid::new_v4();

        let served = service.next_question(Some(user)).await.unwrap().unwrap();
        let cursor = cursors.get(user).await.unwrap();
        assert_eq!(cursor.last_served_question_id, Some(served.id));
        assert!(cursor.last_served_at.is_some());
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let (service, _) = service();
        assert_eq!(service.seed_questions().await.unwrap(), 5);
        assert_eq!(service.seed_questions().await.unwrap(), 0);
        assert_eq!(service.questions.count().await.unwrap(), 5);
    }
}
