// Trade execution against the session portfolio
//
// Trades are all-or-nothing: a rejected request leaves the portfolio untouched.

use crate::core::portfolio::Portfolio;
use crate::types::{Symbol, TradeAction, DEFAULT_CURRENCY};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::num::NonZeroU32;
use tracing::{info, warn};
use uuid::Uuid;

/// Why a trade did not go through. Recoverable; the portfolio is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TradeRejected {
    #[error("Insufficient balance.")]
    InsufficientBalance { required: f64, available: f64 },

    #[error("Not enough stock to sell.")]
    InsufficientHoldings { requested: u32, held: u64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeExecution {
    pub id: Uuid,
    pub symbol: Symbol,
    pub action: TradeAction,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
    pub balance_after: f64,
    pub timestamp: DateTime<Utc>,
}

/// What the host shows after a trade attempt
#[derive(Debug, Clone)]
pub struct TradeOutcome {
    pub success: bool,
    pub message: String,
    pub execution: Option<TradeExecution>,
    pub rejection: Option<TradeRejected>,
}

impl TradeOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            execution: None,
            rejection: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TradeEngine {
    currency_symbol: String,
    log_trades: bool,
}

impl Default for TradeEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl TradeEngine {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            log_trades: true,
        }
    }

    pub fn with_trade_logging(mut self, enabled: bool) -> Self {
        self.log_trades = enabled;
        self
    }

    /// Apply a trade at `price`, the caller-supplied latest close
    pub fn apply(
        &self,
        portfolio: &mut Portfolio,
        symbol: Symbol,
        action: TradeAction,
        quantity: NonZeroU32,
        price: f64,
    ) -> Result<TradeExecution, TradeRejected> {
        let shares = u64::from(quantity.get());
        let total = price * f64::from(quantity.get());

        match action {
            TradeAction::Buy => {
                if total > portfolio.balance() {
                    return Err(TradeRejected::InsufficientBalance {
                        required: total,
                        available: portfolio.balance(),
                    });
                }
                portfolio.add_shares(symbol, shares, total);
            }
            TradeAction::Sell => {
                let held = portfolio.shares(symbol);
                if held < shares {
                    return Err(TradeRejected::InsufficientHoldings {
                        requested: quantity.get(),
                        held,
                    });
                }
                portfolio.remove_shares(symbol, shares, total);
            }
        }

        Ok(TradeExecution {
            id: Uuid::new_v4(),
            symbol,
            action,
            quantity: quantity.get(),
            price,
            total,
            balance_after: portfolio.balance(),
            timestamp: Utc::now(),
        })
    }

    /// Apply a trade and describe the result for display
    pub fn execute_trade(
        &self,
        portfolio: &mut Portfolio,
        symbol: Symbol,
        action: TradeAction,
        quantity: NonZeroU32,
        price: f64,
    ) -> TradeOutcome {
        match self.apply(portfolio, symbol, action, quantity, price) {
            Ok(execution) => {
                let verb = match action {
                    TradeAction::Buy => "Bought",
                    TradeAction::Sell => "Sold",
                };
                let message = format!(
                    "{} {} of {} at {}{:.2}",
                    verb, quantity, symbol, self.currency_symbol, price
                );
                if self.log_trades {
                    info!("💼 {} (balance {}{:.2})", message, self.currency_symbol, execution.balance_after);
                }

                TradeOutcome {
                    success: true,
                    message,
                    execution: Some(execution),
                    rejection: None,
                }
            }
            Err(rejection) => {
                if self.log_trades {
                    warn!("⛔ {} {} {} rejected: {:?}", action, quantity, symbol, rejection);
                }

                TradeOutcome {
                    success: false,
                    message: rejection.to_string(),
                    execution: None,
                    rejection: Some(rejection),
                }
            }
        }
    }
}

/// Execute a trade with the default engine
pub fn execute_trade(
    portfolio: &mut Portfolio,
    symbol: Symbol,
    action: TradeAction,
    quantity: NonZeroU32,
    current_price: f64,
) -> TradeOutcome {
    TradeEngine::default().execute_trade(portfolio, symbol, action, quantity, current_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_buy_then_oversell() {
        let mut portfolio = Portfolio::new(100_000.0, &Symbol::ALL);

        let bought = execute_trade(&mut portfolio, Symbol::Doc, TradeAction::Buy, qty(10), 200.0);
        assert!(bought.success);
        assert_eq!(bought.message, "Bought 10 of Doc at ₹200.00");
        assert_eq!(portfolio.balance(), 98_000.0);
        assert_eq!(portfolio.shares(Symbol::Doc), 10);

        let sold = execute_trade(&mut portfolio, Symbol::Doc, TradeAction::Sell, qty(15), 200.0);
        assert!(!sold.success);
        assert_eq!(sold.message, "Not enough stock to sell.");
        assert_eq!(
            sold.rejection,
            Some(TradeRejected::InsufficientHoldings { requested: 15, held: 10 })
        );
        assert_eq!(portfolio.balance(), 98_000.0);
        assert_eq!(portfolio.shares(Symbol::Doc), 10);
    }

    #[test]
    fn test_buy_exact_balance() {
        let mut portfolio = Portfolio::new(1_000.0, &Symbol::ALL);
        let engine = TradeEngine::new("$");

        let outcome = engine.execute_trade(&mut portfolio, Symbol::Happy, TradeAction::Buy, qty(4), 250.0);
        assert!(outcome.success);
        assert_eq!(portfolio.balance(), 0.0);
        assert_eq!(outcome.message, "Bought 4 of Happy at $250.00");
    }

    #[test]
    fn test_insufficient_balance() {
        let mut portfolio = Portfolio::new(1_000.0, &Symbol::ALL);
        let before = portfolio.clone();

        let result = TradeEngine::default().apply(&mut portfolio, Symbol::Sneezy, TradeAction::Buy, qty(11), 100.0);
        assert_eq!(
            result.unwrap_err(),
            TradeRejected::InsufficientBalance { required: 1_100.0, available: 1_000.0 }
        );
        assert_eq!(portfolio, before);
    }

    #[test]
    fn test_sell_credits_balance() {
        let mut portfolio = Portfolio::new(10_000.0, &Symbol::ALL);
        let engine = TradeEngine::default().with_trade_logging(false);

        engine.apply(&mut portfolio, Symbol::Grumpy, TradeAction::Buy, qty(20), 100.0).unwrap();
        let execution = engine.apply(&mut portfolio, Symbol::Grumpy, TradeAction::Sell, qty(5), 120.0).unwrap();

        assert_eq!(execution.total, 600.0);
        assert_eq!(execution.balance_after, 8_600.0);
        assert_eq!(portfolio.shares(Symbol::Grumpy), 15);
    }

    #[test]
    fn test_rejection_messages() {
        let balance = TradeRejected::InsufficientBalance { required: 2.0, available: 1.0 };
        assert_eq!(balance.to_string(), "Insufficient balance.");
    }
}
