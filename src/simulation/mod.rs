// Market simulation
// Generates synthetic monthly price history with news shocks

pub mod events;
pub mod generator;
pub mod history;

pub use events::{MarketEvent, NewsEvent, NEWS_CATALOG};
pub use generator::{generate, period_timestamps, MarketGenerator};
pub use history::{get_current_price, EventLogEntry, MarketHistory, OHLCData, PeriodRecord, PriceSeries};
