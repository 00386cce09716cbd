// Trading session: owns the generated history and the portfolio
//
// Created once at startup, mutated only through trades, dropped at exit.

use crate::config::Config;
use crate::core::portfolio::{Portfolio, PortfolioSummary};
use crate::core::trade_engine::{TradeEngine, TradeExecution, TradeOutcome};
use crate::error::{TradingError, TradingResult};
use crate::simulation::{MarketGenerator, MarketHistory};
use crate::types::{Symbol, TradeAction};
use std::num::NonZeroU32;
use tracing::info;

pub struct Session {
    config: Config,
    history: MarketHistory,
    portfolio: Portfolio,
    engine: TradeEngine,
    trades: Vec<TradeExecution>,
}

impl Session {
    /// Validate the config, generate the market and open the portfolio
    pub fn start(config: &Config) -> TradingResult<Self> {
        config.validate()?;

        let history = MarketGenerator::new(config.market.clone())?
            .with_event_logging(config.logging.enable_event_logging)
            .generate()?;

        let portfolio = Portfolio::new(config.trading.initial_balance, history.roster());
        let engine = TradeEngine::new(config.trading.currency_symbol.clone())
            .with_trade_logging(config.logging.enable_trade_logging);

        info!(
            "🏦 Session opened with {}{:.2}",
            config.trading.currency_symbol, config.trading.initial_balance
        );

        Ok(Self {
            config: config.clone(),
            history,
            portfolio,
            engine,
            trades: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> &MarketHistory {
        &self.history
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Trades executed during this session, oldest first
    pub fn trades(&self) -> &[TradeExecution] {
        &self.trades
    }

    pub fn current_price(&self, symbol: Symbol) -> TradingResult<f64> {
        self.history.current_price(symbol)
    }

    /// Execute at the latest close, returning the typed result
    pub fn try_execute(
        &mut self,
        symbol: Symbol,
        action: TradeAction,
        quantity: u32,
    ) -> TradingResult<TradeExecution> {
        let quantity = self.check_quantity(quantity)?;
        let price = self.current_price(symbol)?;

        let execution = self
            .engine
            .apply(&mut self.portfolio, symbol, action, quantity, price)?;
        self.trades.push(execution.clone());
        Ok(execution)
    }

    /// Execute at the latest close, returning a displayable outcome
    pub fn execute(&mut self, symbol: Symbol, action: TradeAction, quantity: u32) -> TradeOutcome {
        let checked = self
            .check_quantity(quantity)
            .and_then(|quantity| Ok((quantity, self.current_price(symbol)?)));

        let (quantity, price) = match checked {
            Ok(checked) => checked,
            Err(err) => return TradeOutcome::failed(err.to_string()),
        };

        let outcome = self
            .engine
            .execute_trade(&mut self.portfolio, symbol, action, quantity, price);
        if let Some(execution) = &outcome.execution {
            self.trades.push(execution.clone());
        }
        outcome
    }

    /// Portfolio valued at the latest closes
    pub fn summary(&self) -> PortfolioSummary {
        self.portfolio.summary(&self.history.current_prices())
    }

    fn check_quantity(&self, quantity: u32) -> TradingResult<NonZeroU32> {
        let max = self.config.trading.max_order_quantity;
        if quantity > max {
            return Err(TradingError::InvalidQuantity(format!(
                "{} exceeds the per-order limit of {}",
                quantity, max
            )));
        }

        NonZeroU32::new(quantity)
            .ok_or_else(|| TradingError::InvalidQuantity("must be at least 1".to_string()))
    }
}
