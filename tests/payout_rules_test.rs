use uuid::Uuid;

use survey_rewards_api::config::{AppConfig, GateConfig, Settings};
use survey_rewards_api::domain::TxStatus;
use survey_rewards_api::error::RewardsError;
use survey_rewards_api::handlers::AppContext;
use survey_rewards_api::store::{StoreError, WalletStore};

fn config_with_minimum(min_withdraw_coins: u32) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        settings: Settings {
            coin_to_currency: 100,
            min_withdraw_coins,
        },
        gate: GateConfig {
            min_dwell_ms: 1500,
            max_answers_per_hour: 60,
        },
    }
}

#[tokio::test]
async fn withdrawal_boundaries_around_the_minimum() {
    let context = AppContext::new(config_with_minimum(30));
    let user = Uuid::new_v4();
    let wallet = &context.stores.wallet;

    wallet.credit_coins(user, 29, None).await.unwrap();
    let below = context.payouts.request_payout(user, 29, "671000001").await;
    assert!(matches!(below, Err(RewardsError::BelowMinimum(30))));

    wallet.credit_coins(user, 1, None).await.unwrap();
    let payout = context
        .payouts
        .request_payout(user, 30, "671000001")
        .await
        .unwrap();
    assert_eq!(payout.amount_coins, 30);
    assert_eq!(payout.status, TxStatus::Pending);

    let balance = wallet.balance(user).await.unwrap();
    assert_eq!(balance.available, 0);
    assert_eq!(balance.pending, 30);

    // Same calendar day: rejected no matter how much balance is left
    wallet.credit_coins(user, 100, None).await.unwrap();
    let again = context.payouts.request_payout(user, 30, "671000001").await;
    assert!(matches!(again, Err(RewardsError::DailyLimitReached)));
}

#[tokio::test]
async fn settlement_completes_both_payout_records() {
    let context = AppContext::new(config_with_minimum(10));
    let user = Uuid::new_v4();
    let wallet = &context.stores.wallet;

    wallet.credit_coins(user, 25, None).await.unwrap();
    let payout = context
        .payouts
        .request_payout(user, 10, "671000002")
        .await
        .unwrap();

    wallet.mark_payout_completed(user, payout.id).await.unwrap();

    let requests = wallet.payout_requests(user).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].status, TxStatus::Completed);

    let balance = wallet.balance(user).await.unwrap();
    assert_eq!(balance.available, 15);
    assert_eq!(balance.pending, 0);
}

#[tokio::test]
async fn settling_an_unknown_payout_is_an_error() {
    let context = AppContext::new(config_with_minimum(10));
    let user = Uuid::new_v4();

    let result = context
        .stores
        .wallet
        .mark_payout_completed(user, Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(StoreError::PayoutNotFound(_))));
}
