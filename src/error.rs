//! Unified error handling for the market simulator
//!
//! Trade rejections are ordinary outcomes and surface as `TradeRejected`
//! values; everything else funnels into `TradingError`.

use crate::config::ConfigError;
use crate::core::trade_engine::TradeRejected;
use std::fmt;
use std::io;

/// Main error type for the market simulator
#[derive(Debug)]
pub enum TradingError {
    // Configuration errors
    ConfigNotFound(String),
    ConfigParse(String),
    ConfigValidation(String),

    // Market errors
    UnknownSymbol(String),
    EmptyHistory(String),

    // Trading errors
    TradeRejected(TradeRejected),
    InvalidQuantity(String),

    // IO errors
    FileNotFound(String),
    FileRead(String),
    FileWrite(String),
    Serialization(String),

    // General errors
    Internal(String),
}

impl TradingError {
    /// Get a user-friendly error message with helpful context
    pub fn user_message(&self) -> String {
        match self {
            TradingError::ConfigNotFound(path) => {
                format!(
                    "Configuration file not found: {}\n\n\
                    💡 Quick fix:\n\
                    1. Run: market-sim init\n\
                    2. Adjust config.toml if needed\n\
                    3. Try again",
                    path
                )
            }
            TradingError::ConfigValidation(msg) => {
                format!(
                    "Configuration validation error: {}\n\n\
                    💡 Check config.toml for:\n\
                    - A non-empty roster without duplicates\n\
                    - At least one period\n\
                    - Positive price floor and well-ordered ranges",
                    msg
                )
            }
            TradingError::UnknownSymbol(symbol) => {
                format!(
                    "Unknown symbol: {}\n\n\
                    💡 Listed companies: Doc, Grumpy, Happy, Sleepy, Bashful, Sneezy, Dopey",
                    symbol
                )
            }
            TradingError::TradeRejected(TradeRejected::InsufficientBalance { required, available }) => {
                format!(
                    "Insufficient balance for trade\n\
                    Required: {:.2}\n\
                    Available: {:.2}\n\n\
                    💡 Reduce the quantity or sell other holdings first",
                    required, available
                )
            }
            TradingError::TradeRejected(TradeRejected::InsufficientHoldings { requested, held }) => {
                format!(
                    "Not enough stock to sell\n\
                    Requested: {}\n\
                    Held: {}\n\n\
                    💡 Check the portfolio before selling",
                    requested, held
                )
            }
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            TradingError::ConfigNotFound(_)
            | TradingError::ConfigParse(_)
            | TradingError::ConfigValidation(_) => "config",

            TradingError::UnknownSymbol(_) | TradingError::EmptyHistory(_) => "market",

            TradingError::TradeRejected(_) | TradingError::InvalidQuantity(_) => "trading",

            TradingError::FileNotFound(_)
            | TradingError::FileRead(_)
            | TradingError::FileWrite(_)
            | TradingError::Serialization(_) => "io",

            TradingError::Internal(_) => "internal",
        }
    }
}

impl fmt::Display for TradingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path)
            }
            TradingError::ConfigParse(msg) => {
                write!(f, "Configuration parse error: {}", msg)
            }
            TradingError::ConfigValidation(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }

            TradingError::UnknownSymbol(symbol) => {
                write!(f, "Unknown symbol: {}", symbol)
            }
            TradingError::EmptyHistory(symbol) => {
                write!(f, "No generated prices for {}", symbol)
            }

            TradingError::TradeRejected(rejection) => {
                write!(f, "Trade rejected: {}", rejection)
            }
            TradingError::InvalidQuantity(msg) => {
                write!(f, "Invalid quantity: {}", msg)
            }

            TradingError::FileNotFound(path) => {
                write!(f, "File not found: {}", path)
            }
            TradingError::FileRead(msg) => {
                write!(f, "File read error: {}", msg)
            }
            TradingError::FileWrite(msg) => {
                write!(f, "File write error: {}", msg)
            }
            TradingError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }

            TradingError::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TradingError {}

// Conversion implementations for common error types

impl From<io::Error> for TradingError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => TradingError::FileNotFound(err.to_string()),
            io::ErrorKind::PermissionDenied => TradingError::FileRead(err.to_string()),
            _ => TradingError::Internal(format!("IO error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for TradingError {
    fn from(err: serde_json::Error) -> Self {
        TradingError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for TradingError {
    fn from(err: toml::de::Error) -> Self {
        TradingError::ConfigParse(format!("TOML parse error: {}", err))
    }
}

impl From<ConfigError> for TradingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileRead(msg) => TradingError::FileRead(msg),
            ConfigError::FileWrite(msg) => TradingError::FileWrite(msg),
            ConfigError::Parse(msg) => TradingError::ConfigParse(msg),
            ConfigError::Serialize(msg) => TradingError::Serialization(msg),
            ConfigError::Validation(msg) => TradingError::ConfigValidation(msg),
        }
    }
}

impl From<TradeRejected> for TradingError {
    fn from(rejection: TradeRejected) -> Self {
        TradingError::TradeRejected(rejection)
    }
}

impl From<String> for TradingError {
    fn from(msg: String) -> Self {
        TradingError::Internal(msg)
    }
}

impl From<&str> for TradingError {
    fn from(msg: &str) -> Self {
        TradingError::Internal(msg.to_string())
    }
}

/// Result type alias using TradingError
pub type TradingResult<T> = Result<T, TradingError>;
