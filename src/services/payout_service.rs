use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Settings;
use crate::domain::PayoutRequest;
use crate::error::{RewardsError, RewardsResult};
use crate::services::UserLocks;
use crate::store::WalletStore;

/// Validates withdrawal requests against the threshold, the derived balance
/// and the once-per-day rule before handing them to the ledger. The ledger
/// itself never rejects; every business rule lives here.
pub struct PayoutService {
    settings: Settings,
    wallet: Arc<dyn WalletStore>,
    locks: Arc<UserLocks>,
}

impl PayoutService {
    pub fn new(settings: Settings, wallet: Arc<dyn WalletStore>, locks: Arc<UserLocks>) -> Self {
        PayoutService {
            settings,
            wallet,
            locks,
        }
    }

    /// Checks run in a fixed order, first failure wins: minimum threshold,
    /// available balance, payment info, daily limit. The resulting payout
    /// stays pending until an external settlement step completes it.
    pub async fn request_payout(
        &self,
        user_id: Uuid,
        amount_coins: u32,
        mtn_number: &str,
    ) -> RewardsResult<PayoutRequest> {
        if amount_coins == 0 {
            return Err(RewardsError::InvalidAmount);
        }

        // Balance check and payout creation must not interleave with another
        // request for the same user
        let _guard = self.locks.acquire(user_id).await;

        if amount_coins < self.settings.min_withdraw_coins {
            return Err(RewardsError::BelowMinimum(self.settings.min_withdraw_coins));
        }

        let balance = self.wallet.balance(user_id).await?;
        if i64::from(amount_coins) > balance.available {
            return Err(RewardsError::InsufficientBalance);
        }

        let mtn_number = mtn_number.trim();
        if mtn_number.is_empty() {
            return Err(RewardsError::MissingPaymentInfo);
        }

        let now = Utc::now();
        if let Some(last) = self.wallet.last_payout_request(user_id).await? {
            if same_utc_day(last.created_at, now) {
                return Err(RewardsError::DailyLimitReached);
            }
        }

        let payout = self
            .wallet
            .create_payout(user_id, amount_coins, mtn_number)
            .await?;
        Ok(payout)
    }
}

/// The once-per-day rule compares UTC calendar dates, so behavior does not
/// depend on where the server happens to run
fn same_utc_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryWalletStore;
    use chrono::TimeZone;

    fn settings(min_withdraw_coins: u32) -> Settings {
        Settings {
            coin_to_currency: 100,
            min_withdraw_coins,
        }
    }

    fn service(min_withdraw_coins: u32) -> (PayoutService, Arc<InMemoryWalletStore>) {
        let wallet = Arc::new(InMemoryWalletStore::new());
        let service = PayoutService::new(
            settings(min_withdraw_coins),
            wallet.clone() as Arc<dyn WalletStore>,
            Arc::new(UserLocks::new()),
        );
        (service, wallet)
    }

    #[test]
    fn utc_dates_drive_the_daily_limit() {
        let a = Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 59).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 1).unwrap();
        let c = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 1).unwrap();
        assert!(same_utc_day(a, b));
        assert!(!same_utc_day(a, c));
    }

    #[tokio::test]
    async fn rejects_zero_amount() {
        let (service, _) = service(30);
        let result = service.request_payout(Uuid::new_v4(), 0, "670000003").await;
        assert!(matches!(result, Err(RewardsError::InvalidAmount)));
    }

    #[tokio::test]
    async fn rejects_below_the_minimum_threshold() {
        let (service, wallet) = service(30);
        let user = Uuid::new_v4();
        wallet.credit_coins(user, 29, None).await.unwrap();

        let result = service.request_payout(user, 29, "670000004").await;
        assert!(matches!(result, Err(RewardsError::BelowMinimum(30))));
    }

    #[tokio::test]
    async fn rejects_amounts_above_the_available_balance() {
        let (service, wallet) = service(30);
        let user = Uuid::new_v4();
        wallet.credit_coins(user, 30, None).await.unwrap();

        let result = service.request_payout(user, 31, "670000005").await;
        assert!(matches!(result, Err(RewardsError::InsufficientBalance)));
    }

    #[tokio::test]
    async fn rejects_missing_payment_info() {
        let (service, wallet) = service(30);
        let user = Uuid::new_v4();
        wallet.credit_coins(user, 30, None).await.unwrap();

        let result = service.request_payout(user, 30, "   ").await;
        assert!(matches!(result, Err(RewardsError::MissingPaymentInfo)));
    }

    #[tokio::test]
    async fn accepts_exactly_the_minimum_and_debits_the_balance() {
        let (service, wallet) = service(30);
        let user = Uuid::new_v4();
        wallet.credit_coins(user, 30, None).await.unwrap();

        let payout = service.request_payout(user, 30, "670000006").await.unwrap();
        assert_eq!(payout.amount_coins, 30);

        let balance = wallet.balance(user).await.unwrap();
        assert_eq!(balance.available, 0);
        assert_eq!(balance.pending, 30);
    }

    #[tokio::test]
    async fn second_request_on_the_same_day_is_rejected() {
        let (service, wallet) = service(10);
        let user = Uuid::new_v4();
        wallet.credit_coins(user, 50, None).await.unwrap();

        service.request_payout(user, 10, "670000007").await.unwrap();
        // Plenty of balance left; the calendar rule alone rejects
        let result = service.request_payout(user, 10, "670000007").await;
        assert!(matches!(result, Err(RewardsError::DailyLimitReached)));
    }
}
