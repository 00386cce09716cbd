// Market command implementations: generate and inspect a history
use tracing::info;
use std::fs;
use std::path::Path;
use stock_market_sim::{Config, MarketGenerator, TradingResult};

pub fn generate_market(
    config: &Config,
    seed: Option<u64>,
    events: usize,
    export: Option<&Path>,
) -> TradingResult<()> {
    let mut market = config.market.clone();
    if let Some(seed) = seed {
        market.seed = seed;
    }

    let history = MarketGenerator::new(market)?
        .with_event_logging(config.logging.enable_event_logging)
        .generate()?;

    let currency = &config.trading.currency_symbol;
    let first = history.timestamps().first().map(|d| d.to_string()).unwrap_or_default();
    let last = history.timestamps().last().map(|d| d.to_string()).unwrap_or_default();

    println!("📈 Market from {} to {}", first, last);
    println!("{:<10} {:>12} {:>12} {:>9}", "Symbol", "Start", "Current", "Change");
    for (symbol, current) in history.current_prices() {
        let start = history.initial_price(symbol).unwrap_or(current);
        println!(
            "{:<10} {:>12} {:>12} {:>+8.1}%",
            symbol.name(),
            format!("{}{:.2}", currency, start),
            format!("{}{:.2}", currency, current),
            (current / start - 1.0) * 100.0
        );
    }

    println!();
    println!("📰 Recent Market Events");
    for entry in history.recent_events(events) {
        println!("   {:<9} {} {}", entry.label, entry.icon(), entry.description());
    }

    if let Some(path) = export {
        fs::write(path, history.to_json()?)?;
        info!("💾 Exported history to {}", path.display());
    }

    Ok(())
}
