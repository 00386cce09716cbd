// Configuration management for the market simulator

use crate::types::{
    Symbol, DEFAULT_CURRENCY, DEFAULT_INITIAL_BALANCE, DEFAULT_PERIODS, DEFAULT_PRICE_FLOOR,
    DEFAULT_SEED, DEFAULT_START_DATE, DEFAULT_VOLATILITY,
};
use crate::error::{TradingError, TradingResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Which random streams are driven by the configured seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedMode {
    /// Price changes, event selection and OHLC noise are all seeded
    Full,
    /// Only price changes are seeded; everything else draws from entropy
    ChangesOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub roster: Vec<Symbol>,
    pub periods: usize,
    pub start_date: NaiveDate,
    pub initial_price_min: f64,
    pub initial_price_max: f64,
    pub volatility: f64,          // Std deviation of the monthly change
    pub price_floor: f64,         // Closing prices never drop below this
    pub ohlc_noise_min: f64,      // Wick inflation lower bound (fraction)
    pub ohlc_noise_max: f64,      // Wick inflation upper bound (fraction)
    pub seed: u64,
    pub seed_mode: SeedMode,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            roster: Symbol::ALL.to_vec(),
            periods: DEFAULT_PERIODS,
            start_date: NaiveDate::parse_from_str(DEFAULT_START_DATE, "%Y-%m-%d")
                .unwrap_or(NaiveDate::MIN),
            initial_price_min: 100.0,
            initial_price_max: 500.0,
            volatility: DEFAULT_VOLATILITY,
            price_floor: DEFAULT_PRICE_FLOOR,
            ohlc_noise_min: 0.01,
            ohlc_noise_max: 0.05,
            seed: DEFAULT_SEED,
            seed_mode: SeedMode::Full,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingConfig {
    pub initial_balance: f64,
    pub currency_symbol: String,
    pub max_order_quantity: u32,  // Upper bound enforced by the host before trading
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            currency_symbol: DEFAULT_CURRENCY.to_string(),
            max_order_quantity: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable_event_logging: bool,
    pub enable_trade_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_event_logging: true,
            enable_trade_logging: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub market: MarketConfig,
    pub trading: TradingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration, reporting a missing file as `ConfigNotFound`
    pub fn load_or_error<P: AsRef<Path>>(path: P) -> TradingResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TradingError::ConfigNotFound(path.display().to_string()));
        }

        let config = Self::from_file(path)?;
        info!("📁 Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.market.validate()?;

        if !(self.trading.initial_balance >= 0.0) || !self.trading.initial_balance.is_finite() {
            return Err(ConfigError::Validation("initial_balance must be a non-negative number".to_string()));
        }

        if self.trading.max_order_quantity == 0 {
            return Err(ConfigError::Validation("max_order_quantity must be greater than 0".to_string()));
        }

        Ok(())
    }
}

impl MarketConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster.is_empty() {
            return Err(ConfigError::Validation("roster must list at least one symbol".to_string()));
        }

        let mut seen = HashSet::new();
        for symbol in &self.roster {
            if !seen.insert(symbol) {
                return Err(ConfigError::Validation(format!("roster lists {} more than once", symbol)));
            }
        }

        if self.periods == 0 {
            return Err(ConfigError::Validation("periods must be greater than 0".to_string()));
        }

        if !(self.initial_price_min > 0.0)
            || !(self.initial_price_max > self.initial_price_min)
            || !self.initial_price_max.is_finite()
        {
            return Err(ConfigError::Validation(
                "initial price range must satisfy 0 < initial_price_min < initial_price_max".to_string()
            ));
        }

        if !(self.volatility >= 0.0) || !self.volatility.is_finite() {
            return Err(ConfigError::Validation("volatility must be non-negative".to_string()));
        }

        if !(self.price_floor > 0.0) || !self.price_floor.is_finite() {
            return Err(ConfigError::Validation("price_floor must be a positive finite number".to_string()));
        }

        if !(self.ohlc_noise_min >= 0.0)
            || !(self.ohlc_noise_max > self.ohlc_noise_min)
            || self.ohlc_noise_max >= 1.0
        {
            return Err(ConfigError::Validation(
                "OHLC noise range must satisfy 0 <= ohlc_noise_min < ohlc_noise_max < 1".to_string()
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
