// Configuration management from environment variables

use dotenv::dotenv;
use serde::Serialize;
use std::env;

/// Wallet-facing settings returned to clients alongside balances
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Settings {
    /// Coins per currency unit, display-only; ledger math is coin-denominated
    pub coin_to_currency: u32,
    pub min_withdraw_coins: u32,
}

/// Submission gate thresholds
#[derive(Debug, Clone, Copy)]
pub struct GateConfig {
    /// Minimum ms between a question being served and its answer
    pub min_dwell_ms: i64,
    pub max_answers_per_hour: u32,
}

/// Configuration settings for the survey rewards API server
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server configuration
    pub host: String,
    pub port: u16,

    pub settings: Settings,
    pub gate: GateConfig,
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Creates configuration instance from environment variables with defaults
    pub fn from_env() -> Self {
        dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .unwrap_or(3000);

        let settings = Settings {
            coin_to_currency: env_u32("COIN_TO_CURRENCY", 100),
            min_withdraw_coins: env_u32("MIN_WITHDRAW_COINS", 1000),
        };
        let gate = GateConfig {
            min_dwell_ms: i64::from(env_u32("MIN_DWELL_MS", 1500)),
            max_answers_per_hour: env_u32("MAX_ANSWERS_PER_HOUR", 60),
        };

        Self {
            host,
            port,
            settings,
            gate,
        }
    }

    /// Returns formatted server address string (host:port)
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
