use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of entry in the wallet ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxType {
    Credit,
    Debit,
    PayoutRequest,
    PayoutComplete,
}

/// Lifecycle state shared by ledger transactions and payout requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Pending,
    Completed,
    Failed,
}

/// A single entry in the append-only wallet ledger. Immutable once written
/// except for status transitions (pending -> completed | failed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    /// Positive coin amount; the sign is implied by the transaction type
    pub amount_coins: u32,
    pub status: TxStatus,
    /// Links a credit to its question or a payout transaction to its
    /// PayoutRequest id
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user-initiated request to convert coins into a mobile-money transfer.
/// Created together with a `payout_request` transaction whose `reference`
/// holds this record's id; the two always travel together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount_coins: u32,
    pub mtn_mobile_number: String,
    pub status: TxStatus,
    pub created_at: DateTime<Utc>,
}

/// Balances derived by folding a user's transaction log. Never stored; the
/// ledger is the single source of truth.
#[derive(Debug, Clone, Serialize)]
pub struct WalletBalance {
    pub available: i64,
    pub pending: i64,
    /// Full transaction history, newest first
    pub transactions: Vec<WalletTransaction>,
}
