// News events that shock a single symbol's price for one period

use crate::types::Symbol;
use serde::Serialize;
use std::fmt;

/// A headline from the fixed news catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewsEvent {
    pub name: &'static str,
    pub impact: f64, // Added to the affected symbol's change, e.g. -0.15 = -15%
}

/// Every headline the generator can draw from
pub const NEWS_CATALOG: [NewsEvent; 6] = [
    NewsEvent { name: "Positive Earnings Report", impact: 0.10 },
    NewsEvent { name: "Scandal Exposed", impact: -0.15 },
    NewsEvent { name: "New Tech Launched", impact: 0.15 },
    NewsEvent { name: "Regulation Hit", impact: -0.10 },
    NewsEvent { name: "Market Crash", impact: -0.20 },
    NewsEvent { name: "Buyout Rumors", impact: 0.20 },
];

impl NewsEvent {
    pub fn impact_pct(&self) -> f64 {
        self.impact * 100.0
    }

    pub fn is_positive(&self) -> bool {
        self.impact > 0.0
    }
}

/// A news event that fired against a specific symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketEvent {
    pub symbol: Symbol,
    pub event: NewsEvent,
}

impl fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({:+.1}%)", self.symbol, self.event.name, self.event.impact_pct())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_text_format() {
        let scandal = MarketEvent { symbol: Symbol::Doc, event: NEWS_CATALOG[1] };
        assert_eq!(scandal.to_string(), "Doc: Scandal Exposed (-15.0%)");

        let buyout = MarketEvent { symbol: Symbol::Dopey, event: NEWS_CATALOG[5] };
        assert_eq!(buyout.to_string(), "Dopey: Buyout Rumors (+20.0%)");
    }

    #[test]
    fn test_catalog_is_balanced() {
        let positive = NEWS_CATALOG.iter().filter(|e| e.is_positive()).count();
        assert_eq!(positive, 3);
        assert!(NEWS_CATALOG.iter().all(|e| e.impact.abs() <= 0.20));
    }
}
