use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-user mutual exclusion for check-then-act sequences: the answer gate's
/// check/credit/window update and the payout engine's balance check/create.
/// Locks are scoped to one user id; no cross-user ordering exists.
#[derive(Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for one user, creating it on first use
    pub async fn acquire(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
