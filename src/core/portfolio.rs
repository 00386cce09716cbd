// Session portfolio: cash balance and per-symbol share counts

use crate::types::Symbol;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    balance: f64,
    initial_balance: f64,
    holdings: BTreeMap<Symbol, u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionSummary {
    pub symbol: Symbol,
    pub shares: u64,
    pub price: f64,
    pub market_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub cash: f64,
    pub holdings_value: f64,
    pub total_value: f64,
    pub total_pnl: f64,
    pub total_pnl_pct: f64,
    pub positions: Vec<PositionSummary>,
}

impl Portfolio {
    /// Open a portfolio with `initial_balance` cash and no shares of any roster symbol
    pub fn new(initial_balance: f64, roster: &[Symbol]) -> Self {
        Self {
            balance: initial_balance,
            initial_balance,
            holdings: roster.iter().map(|&symbol| (symbol, 0)).collect(),
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    /// Shares held of `symbol`; zero for anything never bought
    pub fn shares(&self, symbol: Symbol) -> u64 {
        self.holdings.get(&symbol).copied().unwrap_or(0)
    }

    pub fn holdings(&self) -> &BTreeMap<Symbol, u64> {
        &self.holdings
    }

    pub(crate) fn add_shares(&mut self, symbol: Symbol, quantity: u64, cost: f64) {
        *self.holdings.entry(symbol).or_insert(0) += quantity;
        self.balance -= cost;
    }

    pub(crate) fn remove_shares(&mut self, symbol: Symbol, quantity: u64, proceeds: f64) {
        if let Some(held) = self.holdings.get_mut(&symbol) {
            *held -= quantity;
        }
        self.balance += proceeds;
    }

    /// Value the portfolio at the given prices
    pub fn summary(&self, prices: &[(Symbol, f64)]) -> PortfolioSummary {
        let positions: Vec<PositionSummary> = prices
            .iter()
            .map(|&(symbol, price)| {
                let shares = self.shares(symbol);
                PositionSummary {
                    symbol,
                    shares,
                    price,
                    market_value: shares as f64 * price,
                }
            })
            .collect();

        let holdings_value: f64 = positions.iter().map(|p| p.market_value).sum();
        let total_value = self.balance + holdings_value;
        let total_pnl = total_value - self.initial_balance;
        let total_pnl_pct = if self.initial_balance > 0.0 {
            total_pnl / self.initial_balance * 100.0
        } else {
            0.0
        };

        PortfolioSummary {
            cash: self.balance,
            holdings_value,
            total_value,
            total_pnl,
            total_pnl_pct,
            positions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_portfolio_holds_nothing() {
        let portfolio = Portfolio::new(100_000.0, &Symbol::ALL);
        assert_eq!(portfolio.balance(), 100_000.0);
        assert_eq!(portfolio.holdings().len(), 7);
        assert!(portfolio.holdings().values().all(|&shares| shares == 0));
    }

    #[test]
    fn test_summary_values_holdings() {
        let mut portfolio = Portfolio::new(1_000.0, &[Symbol::Doc, Symbol::Happy]);
        portfolio.add_shares(Symbol::Doc, 2, 200.0);

        let summary = portfolio.summary(&[(Symbol::Doc, 150.0), (Symbol::Happy, 50.0)]);
        assert_eq!(summary.cash, 800.0);
        assert_eq!(summary.holdings_value, 300.0);
        assert_eq!(summary.total_value, 1_100.0);
        assert_eq!(summary.total_pnl, 100.0);
        assert!((summary.total_pnl_pct - 10.0).abs() < 1e-9);
    }
}
