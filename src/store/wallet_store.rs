use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::StoreError;
use crate::domain::{PayoutRequest, TxStatus, TxType, WalletBalance, WalletTransaction};

/// The append-only wallet ledger. Balances are always derived from the
/// transaction log. This store does no business-rule validation: thresholds,
/// balance checks and the daily limit are enforced by the payout service
/// before calls land here.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Appends a completed credit transaction
    async fn credit_coins(
        &self,
        user_id: Uuid,
        coins: u32,
        reference: Option<String>,
    ) -> Result<WalletTransaction, StoreError>;

    /// Appends a pending payout request together with its linked pending
    /// `payout_request` transaction. The pair is written under one lock so
    /// neither record can exist without the other.
    async fn create_payout(
        &self,
        user_id: Uuid,
        coins: u32,
        mtn: &str,
    ) -> Result<PayoutRequest, StoreError>;

    /// Flips a payout request and its linked transaction to completed.
    /// Driven by an external settlement process, not by user traffic.
    async fn mark_payout_completed(&self, user_id: Uuid, payout_id: Uuid)
        -> Result<(), StoreError>;

    /// Folds the transaction log into available/pending balances
    async fn balance(&self, user_id: Uuid) -> Result<WalletBalance, StoreError>;

    /// Most recent `payout_request` transaction for a user, if any
    async fn last_payout_request(
        &self,
        user_id: Uuid,
    ) -> Result<Option<WalletTransaction>, StoreError>;

    /// All payout requests for a user, oldest first
    async fn payout_requests(&self, user_id: Uuid) -> Result<Vec<PayoutRequest>, StoreError>;
}

/// Folds a transaction list into (available, pending) coin balances.
/// Completed credits add; non-failed debits and payout requests subtract;
/// the pending ones among those also accumulate into the pending balance.
fn fold_balance(txs: &[WalletTransaction]) -> (i64, i64) {
    let mut available = 0i64;
    let mut pending = 0i64;
    for tx in txs {
        let amount = i64::from(tx.amount_coins);
        match tx.tx_type {
            TxType::Credit if tx.status == TxStatus::Completed => available += amount,
            TxType::Debit | TxType::PayoutRequest if tx.status != TxStatus::Failed => {
                available -= amount;
                if tx.status == TxStatus::Pending {
                    pending += amount;
                }
            }
            _ => {}
        }
    }
    (available, pending)
}

#[derive(Default)]
struct WalletData {
    transactions: HashMap<Uuid, Vec<WalletTransaction>>,
    payout_requests: HashMap<Uuid, Vec<PayoutRequest>>,
}

/// In-memory wallet ledger keyed by user id
pub struct InMemoryWalletStore {
    data: RwLock<WalletData>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        InMemoryWalletStore {
            data: RwLock::new(WalletData::default()),
        }
    }
}

impl Default for InMemoryWalletStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn credit_coins(
        &self,
        user_id: Uuid,
        coins: u32,
        reference: Option<String>,
    ) -> Result<WalletTransaction, StoreError> {
        let tx = WalletTransaction {
            id: Uuid::new_v4(),
            user_id,
            tx_type: TxType::Credit,
            amount_coins: coins,
            status: TxStatus::Completed,
            reference,
            created_at: Utc::now(),
        };
        let mut data = self.data.write().await;
        data.transactions.entry(user_id).or_default().push(tx.clone());
        Ok(tx)
    }

    async fn create_payout(
        &self,
        user_id: Uuid,
        coins: u32,
        mtn: &str,
    ) -> Result<PayoutRequest, StoreError> {
        let now = Utc::now();
        let payout = PayoutRequest {
            id: Uuid::new_v4(),
            user_id,
            amount_coins: coins,
            mtn_mobile_number: mtn.to_string(),
            status: TxStatus::Pending,
            created_at: now,
        };
        let tx = WalletTransaction {
            id: Uuid::new_v4(),
            user_id,
            tx_type: TxType::PayoutRequest,
            amount_coins: coins,
            status: TxStatus::Pending,
            reference: Some(payout.id.to_string()),
            created_at: now,
        };

        // Both records land under the same write lock
        let mut data = self.data.write().await;
        data.payout_requests
            .entry(user_id)
            .or_default()
            .push(payout.clone());
        data.transactions.entry(user_id).or_default().push(tx);
        Ok(payout)
    }

    async fn mark_payout_completed(
        &self,
        user_id: Uuid,
        payout_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut data = self.data.write().await;

        let found = data
            .payout_requests
            .get_mut(&user_id)
            .and_then(|list| list.iter_mut().find(|p| p.id == payout_id))
            .map(|p| p.status = TxStatus::Completed)
            .is_some();
        if !found {
            return Err(StoreError::PayoutNotFound(payout_id));
        }

        let reference = payout_id.to_string();
        if let Some(tx) = data.transactions.get_mut(&user_id).and_then(|list| {
            list.iter_mut()
                .find(|t| t.reference.as_deref() == Some(reference.as_str()))
        }) {
            tx.status = TxStatus::Completed;
        }
        Ok(())
    }

    async fn balance(&self, user_id: Uuid) -> Result<WalletBalance, StoreError> {
        let data = self.data.read().await;
        let mut txs = data
            .transactions
            .get(&user_id)
            .cloned()
            .unwrap_or_default();
        let (available, pending) = fold_balance(&txs);
        txs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(WalletBalance {
            available,
            pending,
            transactions: txs,
        })
    }

    async fn last_payout_request(
        &self,
        user_id: Uuid,
    ) -> Result<Option<WalletTransaction>, StoreError> {
        let data = self.data.read().await;
        Ok(data.transactions.get(&user_id).and_then(|txs| {
            txs.iter()
                .rev()
                .find(|t| t.tx_type == TxType::PayoutRequest)
                .cloned()
        }))
    }

    async fn payout_requests(&self, user_id: Uuid) -> Result<Vec<PayoutRequest>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .payout_requests
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}
