// Stock Market Simulator Library
//
// Synthetic monthly market with news shocks and a virtual trading portfolio

pub mod core;
pub mod config;
pub mod error;       // Unified error handling
pub mod simulation;
pub mod types;

// Re-export core trading types
pub use crate::core::{
    execute_trade, Portfolio, PortfolioSummary, PositionSummary, Session, TradeEngine,
    TradeExecution, TradeOutcome, TradeRejected,
};

// Re-export error types
pub use error::{TradingError, TradingResult};

// Re-export configuration
pub use config::{Config, ConfigError, LoggingConfig, MarketConfig, SeedMode, TradingConfig};

// Re-export simulation components
pub use simulation::{
    generate, get_current_price, EventLogEntry, MarketEvent, MarketGenerator, MarketHistory,
    NewsEvent, OHLCData, PeriodRecord, PriceSeries, NEWS_CATALOG,
};

pub use types::{Symbol, TradeAction};
