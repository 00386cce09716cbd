// Common types used across the application

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fictitious companies listed on the simulated market
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Doc,
    Grumpy,
    Happy,
    Sleepy,
    Bashful,
    Sneezy,
    Dopey,
}

impl Symbol {
    /// Every listed symbol, in listing order
    pub const ALL: [Symbol; 7] = [
        Symbol::Doc,
        Symbol::Grumpy,
        Symbol::Happy,
        Symbol::Sleepy,
        Symbol::Bashful,
        Symbol::Sneezy,
        Symbol::Dopey,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Doc => "Doc",
            Symbol::Grumpy => "Grumpy",
            Symbol::Happy => "Happy",
            Symbol::Sleepy => "Sleepy",
            Symbol::Bashful => "Bashful",
            Symbol::Sneezy => "Sneezy",
            Symbol::Dopey => "Dopey",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbol {
    type Err = String;

    // Case-insensitive so the interactive session accepts "doc" and "DOC"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::ALL
            .iter()
            .copied()
            .find(|symbol| symbol.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown symbol '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => f.write_str("Buy"),
            TradeAction::Sell => f.write_str("Sell"),
        }
    }
}

impl FromStr for TradeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TradeAction::Buy),
            "sell" => Ok(TradeAction::Sell),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

/// Round to two decimal places, the precision every quoted price carries
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Default market constants
pub const DEFAULT_PERIODS: usize = 60;
pub const DEFAULT_START_DATE: &str = "2020-01-01";
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_INITIAL_BALANCE: f64 = 100_000.0;
pub const DEFAULT_PRICE_FLOOR: f64 = 10.0;
pub const DEFAULT_VOLATILITY: f64 = 0.05;
pub const DEFAULT_CURRENCY: &str = "₹";
