// Synthetic market generator
//
// Random walk per symbol with at most one news shock per month. Three
// independent random streams drive it: price changes, event selection and
// OHLC wick noise.

use crate::config::{ConfigError, MarketConfig, SeedMode};
use crate::error::TradingResult;
use crate::simulation::events::{MarketEvent, NEWS_CATALOG};
use crate::simulation::history::{EventLogEntry, MarketHistory, OHLCData, PriceSeries};
use crate::types::{round_cents, Symbol};
use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub struct MarketGenerator {
    config: MarketConfig,
    change_rng: StdRng,
    event_rng: StdRng,
    noise_rng: StdRng,
    change_distribution: Normal<f64>,
    log_events: bool,
}

impl MarketGenerator {
    /// Create a generator, failing fast on an invalid configuration
    pub fn new(config: MarketConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let change_distribution = Normal::new(0.0, config.volatility)
            .map_err(|e| ConfigError::Validation(format!("volatility: {}", e)))?;

        let change_rng = StdRng::seed_from_u64(config.seed);
        let (event_rng, noise_rng) = match config.seed_mode {
            SeedMode::Full => (
                StdRng::seed_from_u64(config.seed.wrapping_add(1)),
                StdRng::seed_from_u64(config.seed.wrapping_add(2)),
            ),
            SeedMode::ChangesOnly => (StdRng::from_entropy(), StdRng::from_entropy()),
        };

        Ok(Self {
            config,
            change_rng,
            event_rng,
            noise_rng,
            change_distribution,
            log_events: true,
        })
    }

    pub fn with_event_logging(mut self, enabled: bool) -> Self {
        self.log_events = enabled;
        self
    }

    /// Run the whole simulation. Consumes the generator; history is built once.
    pub fn generate(mut self) -> TradingResult<MarketHistory> {
        let roster = self.config.roster.clone();
        let timestamps = period_timestamps(self.config.start_date, self.config.periods)?;

        info!(
            "🎲 Generating {} months for {} symbols (seed {}, {:?})",
            timestamps.len(),
            roster.len(),
            self.config.seed,
            self.config.seed_mode
        );

        let initial_prices: BTreeMap<Symbol, f64> = roster
            .iter()
            .map(|&symbol| {
                let price = self
                    .noise_rng
                    .gen_range(self.config.initial_price_min..self.config.initial_price_max);
                (symbol, price)
            })
            .collect();

        let mut last_prices = initial_prices.clone();
        let mut closes: BTreeMap<Symbol, Vec<f64>> = roster
            .iter()
            .map(|&symbol| (symbol, Vec::with_capacity(timestamps.len())))
            .collect();
        let mut candles: BTreeMap<Symbol, Vec<OHLCData>> = roster
            .iter()
            .map(|&symbol| (symbol, Vec::with_capacity(timestamps.len())))
            .collect();
        let mut events = Vec::with_capacity(timestamps.len());

        for &timestamp in &timestamps {
            // One extra slot stands for "no news this month"
            let pick = self.event_rng.gen_range(0..=roster.len());
            let affected = roster.get(pick).copied();
            let mut fired = None;

            for &symbol in &roster {
                let last_price = last_prices[&symbol];
                let mut change = self.change_distribution.sample(&mut self.change_rng);

                if affected == Some(symbol) {
                    let event = *NEWS_CATALOG
                        .choose(&mut self.event_rng)
                        .ok_or("news catalog is empty")?;
                    change += event.impact;
                    fired = Some(MarketEvent { symbol, event });
                }

                let close = round_cents(last_price * (1.0 + change)).max(self.config.price_floor);
                let candle = self.build_candle(timestamp, last_price, close);

                last_prices.insert(symbol, close);
                if let Some(series) = closes.get_mut(&symbol) {
                    series.push(close);
                }
                if let Some(series) = candles.get_mut(&symbol) {
                    series.push(candle);
                }
            }

            let label = timestamp.format("%b %Y").to_string();
            if let (Some(event), true) = (fired, self.log_events) {
                debug!("📰 {}: {}", label, event);
            }

            events.push(EventLogEntry { timestamp, label, event: fired });
        }

        let fired_count = events.iter().filter(|e| e.event.is_some()).count();
        info!("✅ Generated {} months, {} news events", timestamps.len(), fired_count);

        let series = closes
            .into_iter()
            .map(|(symbol, closes)| (symbol, PriceSeries { symbol, closes }))
            .collect();

        Ok(MarketHistory {
            roster,
            timestamps,
            initial_prices,
            series,
            candles,
            events,
        })
    }

    fn build_candle(&mut self, timestamp: NaiveDate, last_price: f64, close: f64) -> OHLCData {
        let open = round_cents(last_price);
        let top = open.max(close);
        let bottom = open.min(close);

        let noise_range = self.config.ohlc_noise_min..self.config.ohlc_noise_max;
        let high = round_cents(top * (1.0 + self.noise_rng.gen_range(noise_range.clone())));
        let low = round_cents(bottom * (1.0 - self.noise_rng.gen_range(noise_range)));

        // Rounding must never pull a wick inside the body
        OHLCData {
            timestamp,
            open,
            high: high.max(top),
            low: low.min(bottom),
            close,
        }
    }
}

/// Month-end dates for `periods` months, starting with the month of `start`
pub fn period_timestamps(start: NaiveDate, periods: usize) -> TradingResult<Vec<NaiveDate>> {
    let first_of_month = NaiveDate::from_ymd_opt(start.year(), start.month(), 1)
        .ok_or_else(|| format!("invalid start date {}", start))?;

    (1..=periods)
        .map(|offset| -> TradingResult<NaiveDate> {
            let offset = u32::try_from(offset).map_err(|_| format!("too many periods: {}", periods))?;
            first_of_month
                .checked_add_months(Months::new(offset))
                .and_then(|next| next.pred_opt())
                .ok_or_else(|| format!("period {} overflows the calendar", offset).into())
        })
        .collect()
}

/// Generate a fully seeded history for `roster` using default market parameters
pub fn generate(roster: &[Symbol], periods: usize, seed: u64) -> TradingResult<MarketHistory> {
    let config = MarketConfig {
        roster: roster.to_vec(),
        periods,
        seed,
        ..MarketConfig::default()
    };

    MarketGenerator::new(config)?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_timestamps_are_month_ends() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let dates = period_timestamps(start, 3).unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2020, 3, 31).unwrap(),
            ]
        );
    }

    #[test]
    fn test_period_timestamps_cross_year() {
        let start = NaiveDate::from_ymd_opt(2021, 11, 15).unwrap();
        let dates = period_timestamps(start, 3).unwrap();
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2022, 1, 31).unwrap());
    }

    #[test]
    fn test_candle_wicks_cover_body() {
        let mut generator = MarketGenerator::new(MarketConfig::default()).unwrap();
        let timestamp = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();

        for _ in 0..500 {
            let candle = generator.build_candle(timestamp, 10.004, 10.0);
            assert!(candle.is_consistent(), "{:?}", candle);
        }
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = MarketConfig { periods: 0, ..MarketConfig::default() };
        assert!(MarketGenerator::new(config).is_err());

        let config = MarketConfig { roster: vec![], ..MarketConfig::default() };
        assert!(MarketGenerator::new(config).is_err());
    }

    #[test]
    fn test_event_labels() {
        let history = generate(&Symbol::ALL, 13, 7).unwrap();
        assert_eq!(history.events()[0].label, "Jan 2020");
        assert_eq!(history.events()[12].label, "Jan 2021");
    }
}
