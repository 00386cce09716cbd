// Common test utilities and helpers
#![allow(dead_code)]

use stock_market_sim::{Config, LoggingConfig, MarketConfig, SeedMode, Symbol, TradingConfig};
use chrono::NaiveDate;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        market: MarketConfig {
            roster: Symbol::ALL.to_vec(),
            periods: 60,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"),
            initial_price_min: 100.0,
            initial_price_max: 500.0,
            volatility: 0.05,
            price_floor: 10.0,
            ohlc_noise_min: 0.01,
            ohlc_noise_max: 0.05,
            seed: 42,
            seed_mode: SeedMode::Full,
        },
        trading: TradingConfig {
            initial_balance: 100_000.0,
            currency_symbol: "₹".to_string(),
            max_order_quantity: 100,
        },
        logging: LoggingConfig {
            enable_event_logging: false,
            enable_trade_logging: false,
        },
    }
}

/// A market config tuned to hit the price floor often
pub fn create_crash_prone_market(seed: u64) -> MarketConfig {
    MarketConfig {
        initial_price_min: 10.0,
        initial_price_max: 20.0,
        volatility: 0.5,
        periods: 120,
        seed,
        ..create_test_config().market
    }
}
