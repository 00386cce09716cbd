// Generated market history: price series, candles and the monthly event log

use crate::error::{TradingError, TradingResult};
use crate::simulation::events::MarketEvent;
use crate::types::Symbol;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OHLCData {
    pub timestamp: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OHLCData {
    /// `low <= min(open, close) <= max(open, close) <= high`
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.high >= self.open.max(self.close)
    }
}

/// One month of the simulation across every listed symbol
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRecord {
    pub timestamp: NaiveDate,
    pub quotes: BTreeMap<Symbol, OHLCData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventLogEntry {
    pub timestamp: NaiveDate,
    pub label: String, // "Jan 2020"
    pub event: Option<MarketEvent>,
}

impl EventLogEntry {
    /// Event text as shown in the news table, empty on quiet months
    pub fn description(&self) -> String {
        self.event.map(|e| e.to_string()).unwrap_or_default()
    }

    pub fn affected_symbol(&self) -> Option<Symbol> {
        self.event.map(|e| e.symbol)
    }

    /// Direction marker for display; blank for quiet periods
    pub fn icon(&self) -> &'static str {
        match self.event {
            Some(market_event) if market_event.event.is_positive() => "📈",
            Some(_) => "📉",
            None => "  ",
        }
    }
}

/// Closing prices of one symbol in chronological order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub closes: Vec<f64>,
}

impl PriceSeries {
    pub fn current(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// Everything the generator produced for one session. Read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct MarketHistory {
    pub(crate) roster: Vec<Symbol>,
    pub(crate) timestamps: Vec<NaiveDate>,
    pub(crate) initial_prices: BTreeMap<Symbol, f64>,
    pub(crate) series: BTreeMap<Symbol, PriceSeries>,
    pub(crate) candles: BTreeMap<Symbol, Vec<OHLCData>>,
    pub(crate) events: Vec<EventLogEntry>,
}

impl MarketHistory {
    pub fn roster(&self) -> &[Symbol] {
        &self.roster
    }

    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Price each symbol started from before the first period
    pub fn initial_price(&self, symbol: Symbol) -> Option<f64> {
        self.initial_prices.get(&symbol).copied()
    }

    pub fn price_series(&self, symbol: Symbol) -> Option<&PriceSeries> {
        self.series.get(&symbol)
    }

    /// Data for the line chart
    pub fn line_series(&self, symbol: Symbol) -> Option<Vec<(NaiveDate, f64)>> {
        self.series.get(&symbol).map(|series| {
            self.timestamps
                .iter()
                .copied()
                .zip(series.closes.iter().copied())
                .collect()
        })
    }

    /// Data for the candlestick chart
    pub fn candles(&self, symbol: Symbol) -> Option<&[OHLCData]> {
        self.candles.get(&symbol).map(Vec::as_slice)
    }

    pub fn events(&self) -> &[EventLogEntry] {
        &self.events
    }

    /// The last `count` event log entries, oldest first
    pub fn recent_events(&self, count: usize) -> &[EventLogEntry] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    /// Rebuild the per-period view of the history
    pub fn periods(&self) -> Vec<PeriodRecord> {
        self.timestamps
            .iter()
            .enumerate()
            .map(|(index, &timestamp)| PeriodRecord {
                timestamp,
                quotes: self
                    .candles
                    .iter()
                    .filter_map(|(&symbol, candles)| candles.get(index).map(|c| (symbol, *c)))
                    .collect(),
            })
            .collect()
    }

    /// Most recent closing price of `symbol`
    pub fn current_price(&self, symbol: Symbol) -> TradingResult<f64> {
        let series = self
            .series
            .get(&symbol)
            .ok_or_else(|| TradingError::UnknownSymbol(symbol.to_string()))?;

        series
            .current()
            .ok_or_else(|| TradingError::EmptyHistory(symbol.to_string()))
    }

    /// Latest close of every listed symbol, in roster order
    pub fn current_prices(&self) -> Vec<(Symbol, f64)> {
        self.roster
            .iter()
            .filter_map(|&symbol| self.current_price(symbol).ok().map(|p| (symbol, p)))
            .collect()
    }

    pub fn to_json(&self) -> TradingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Most recent closing price of `symbol` in `history`
pub fn get_current_price(history: &MarketHistory, symbol: Symbol) -> TradingResult<f64> {
    history.current_price(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::events::NEWS_CATALOG;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, month, 28).unwrap()
    }

    fn sample_history() -> MarketHistory {
        let timestamps = vec![date(1), date(2), date(3)];
        let closes = vec![101.5, 99.25, 120.0];
        let candles = timestamps
            .iter()
            .zip(closes.iter())
            .map(|(&timestamp, &close)| OHLCData {
                timestamp,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
            })
            .collect();

        let events = timestamps
            .iter()
            .enumerate()
            .map(|(i, &timestamp)| EventLogEntry {
                timestamp,
                label: timestamp.format("%b %Y").to_string(),
                event: (i == 1).then_some(MarketEvent { symbol: Symbol::Doc, event: NEWS_CATALOG[0] }),
            })
            .collect();

        MarketHistory {
            roster: vec![Symbol::Doc],
            timestamps,
            initial_prices: BTreeMap::from([(Symbol::Doc, 100.0)]),
            series: BTreeMap::from([(Symbol::Doc, PriceSeries { symbol: Symbol::Doc, closes })]),
            candles: BTreeMap::from([(Symbol::Doc, candles)]),
            events,
        }
    }

    #[test]
    fn test_current_price_is_last_close() {
        let history = sample_history();
        assert_eq!(get_current_price(&history, Symbol::Doc).unwrap(), 120.0);
    }

    #[test]
    fn test_unknown_symbol() {
        let history = sample_history();
        let result = history.current_price(Symbol::Grumpy);
        assert!(matches!(result, Err(TradingError::UnknownSymbol(_))));
    }

    #[test]
    fn test_recent_events_window() {
        let history = sample_history();
        assert_eq!(history.recent_events(2).len(), 2);
        assert_eq!(history.recent_events(10).len(), 3);
        assert_eq!(history.recent_events(1)[0].label, "Mar 2020");
        assert_eq!(history.recent_events(2)[0].description(), "Doc: Positive Earnings Report (+10.0%)");
        assert_eq!(history.recent_events(1)[0].description(), "");
    }

    #[test]
    fn test_event_icon_follows_impact() {
        let history = sample_history();
        let events = history.events();
        assert_eq!(events[0].icon(), "  ");
        assert_eq!(events[1].icon(), "📈");

        let crash = EventLogEntry {
            timestamp: date(4),
            label: "Apr 2020".to_string(),
            event: Some(MarketEvent { symbol: Symbol::Doc, event: NEWS_CATALOG[4] }),
        };
        assert_eq!(crash.icon(), "📉");
    }

    #[test]
    fn test_period_view() {
        let history = sample_history();
        let periods = history.periods();
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[1].quotes[&Symbol::Doc].close, 99.25);
    }

    #[test]
    fn test_line_series_pairs_dates() {
        let history = sample_history();
        let line = history.line_series(Symbol::Doc).unwrap();
        assert_eq!(line[0], (date(1), 101.5));
        assert!(history.line_series(Symbol::Happy).is_none());
    }
}
