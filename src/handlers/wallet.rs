// Wallet and payout endpoint handlers

use axum::{extract::State, Json};

use crate::error::{RewardsError, RewardsResult};
use crate::handlers::{AppState, AuthUser};
use crate::models::{WalletResponse, WithdrawRequest, WithdrawResponse};
use crate::store::WalletStore;

/// GET /api/wallet — Balances, transaction history and payout settings
pub async fn get_wallet(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> RewardsResult<Json<WalletResponse>> {
    let balance = state.stores.wallet.balance(user_id).await?;

    Ok(Json(WalletResponse {
        balance: balance.available,
        pending: balance.pending,
        transactions: balance.transactions,
        settings: state.config.settings,
    }))
}

/// POST /api/wallet/withdraw — Request a payout to a mobile-money number
pub async fn request_withdrawal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<WithdrawRequest>,
) -> RewardsResult<Json<WithdrawResponse>> {
    let coins = body.coins.ok_or(RewardsError::InvalidAmount)?;
    let mtn_mobile = body.mtn_mobile.as_deref().unwrap_or_default();

    let request = state.payouts.request_payout(user_id, coins, mtn_mobile).await?;
    tracing::info!(
        "payout request {} created for user {} ({} coins)",
        request.id,
        user_id,
        request.amount_coins
    );

    Ok(Json(WithdrawResponse { request }))
}
