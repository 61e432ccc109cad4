use std::env;

use binance_signals::config::Config;
use binance_signals::klines::{fetch_klines, KlineQuery};
use binance_signals::score_candles;

// cargo run --bin signal_score [SYMBOL]

const INTERVAL: &str = "1h";
const CANDLES: u32 = 500;
const STRATEGY: &str = "default";
const TAIL: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env();
    let symbol = env::args()
        .nth(1)
        .unwrap_or_else(|| config.default_symbol.clone());

    let query = KlineQuery::new(&symbol, INTERVAL, CANDLES);
    let candles = fetch_klines(&config, &query)?;
    let score = score_candles(&candles, STRATEGY)?;

    println!(
        "Signal scores for {} ({} candles, strategy {}):",
        symbol,
        candles.len(),
        score.strategy
    );
    let tail_start = score.rows.len().saturating_sub(TAIL);
    for row in &score.rows[tail_start..] {
        println!(
            "{} positive: {:.1}, negative: {:.1}, signal: {}",
            row.open_time, row.positive_score, row.negative_score, row.final_signal
        );
    }

    Ok(())
}
