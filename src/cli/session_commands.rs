// Interactive trading session on stdin
use tracing::info;
use std::io::{self, BufRead, Write};
use stock_market_sim::{Config, Session, Symbol, TradeAction, TradingResult};

const RECENT_EVENTS: usize = 10;
const CHART_MONTHS: usize = 12;

#[derive(Debug, PartialEq)]
pub enum SessionCommand {
    Trade { action: TradeAction, symbol: Symbol, quantity: u32 },
    Price(Symbol),
    Chart(Symbol),
    Portfolio,
    Events,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        [action @ ("buy" | "sell"), symbol, quantity] => Ok(SessionCommand::Trade {
            action: action.parse()?,
            symbol: symbol.parse()?,
            quantity: quantity
                .parse()
                .map_err(|_| format!("'{}' is not a whole number of shares", quantity))?,
        }),
        ["price", symbol] => Ok(SessionCommand::Price(symbol.parse()?)),
        ["chart", symbol] => Ok(SessionCommand::Chart(symbol.parse()?)),
        ["portfolio"] => Ok(SessionCommand::Portfolio),
        ["events"] => Ok(SessionCommand::Events),
        ["help"] => Ok(SessionCommand::Help),
        ["quit"] | ["exit"] => Ok(SessionCommand::Quit),
        [] => Err("empty command".to_string()),
        _ => Err(format!("unrecognised command '{}' (try: help)", line.trim())),
    }
}

pub fn run_session(config: &Config) -> TradingResult<()> {
    let mut session = Session::start(config)?;
    info!("💼 Trading session started. Type 'help' for commands.");
    print_portfolio(&session);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line.to_ascii_lowercase()) {
            Ok(SessionCommand::Trade { action, symbol, quantity }) => {
                let outcome = session.execute(symbol, action, quantity);
                let marker = if outcome.success { "✅" } else { "❌" };
                println!("{} {}", marker, outcome.message);
            }
            Ok(SessionCommand::Price(symbol)) => match session.current_price(symbol) {
                Ok(price) => println!("{}: {}{:.2}", symbol, config.trading.currency_symbol, price),
                Err(e) => println!("❌ {}", e),
            },
            Ok(SessionCommand::Chart(symbol)) => print_candles(&session, symbol),
            Ok(SessionCommand::Portfolio) => print_portfolio(&session),
            Ok(SessionCommand::Events) => {
                for entry in session.history().recent_events(RECENT_EVENTS) {
                    println!("   {:<9} {} {}", entry.label, entry.icon(), entry.description());
                }
            }
            Ok(SessionCommand::Help) => print_help(),
            Ok(SessionCommand::Quit) => break,
            Err(msg) => println!("❌ {}", msg),
        }
    }

    info!("👋 Session closed after {} trades", session.trades().len());
    Ok(())
}

fn print_portfolio(session: &Session) {
    let currency = &session.config().trading.currency_symbol;
    let summary = session.summary();

    println!("Balance: {}{:.2}", currency, summary.cash);
    for position in &summary.positions {
        println!(
            "   {:<8} {:>5} shares  @ {}{:.2}  = {}{:.2}",
            position.symbol.name(),
            position.shares,
            currency,
            position.price,
            currency,
            position.market_value
        );
    }
    println!(
        "Total: {}{:.2} ({:+.2}%)",
        currency, summary.total_value, summary.total_pnl_pct
    );
}

fn print_candles(session: &Session, symbol: Symbol) {
    let Some(candles) = session.history().candles(symbol) else {
        println!("❌ {} is not listed", symbol);
        return;
    };

    println!("{:<12} {:>10} {:>10} {:>10} {:>10}", "Date", "Open", "High", "Low", "Close");
    let start = candles.len().saturating_sub(CHART_MONTHS);
    for candle in &candles[start..] {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            candle.timestamp.to_string(),
            candle.open,
            candle.high,
            candle.low,
            candle.close
        );
    }
}

fn print_help() {
    println!("   buy <symbol> <qty>    buy shares at the latest close");
    println!("   sell <symbol> <qty>   sell shares at the latest close");
    println!("   price <symbol>        latest close");
    println!("   chart <symbol>        last {} monthly candles", CHART_MONTHS);
    println!("   portfolio             balance and holdings");
    println!("   events                recent market events");
    println!("   quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trade() {
        assert_eq!(
            parse_command("buy doc 10").unwrap(),
            SessionCommand::Trade { action: TradeAction::Buy, symbol: Symbol::Doc, quantity: 10 }
        );
        assert_eq!(
            parse_command("sell  sneezy 3\n").unwrap(),
            SessionCommand::Trade { action: TradeAction::Sell, symbol: Symbol::Sneezy, quantity: 3 }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_command("buy doc ten").is_err());
        assert!(parse_command("buy snowwhite 1").is_err());
        assert!(parse_command("hold doc").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn test_parse_queries() {
        assert_eq!(parse_command("price happy").unwrap(), SessionCommand::Price(Symbol::Happy));
        assert_eq!(parse_command("portfolio").unwrap(), SessionCommand::Portfolio);
        assert_eq!(parse_command("exit").unwrap(), SessionCommand::Quit);
    }
}
