// Core trading logic modules

pub mod portfolio;
pub mod session;
pub mod trade_engine;

// Re-export commonly used types
pub use portfolio::{Portfolio, PortfolioSummary, PositionSummary};
pub use session::Session;
pub use trade_engine::{execute_trade, TradeEngine, TradeExecution, TradeOutcome, TradeRejected};
