use std::env;

use binance_signals::config::Config;
use binance_signals::ticker::latest_prices;
use chrono::Utc;

// cargo run --bin latest_prices [SYMBOL ...]

const DEFAULT_SYMBOLS: [&str; 3] = ["BTCUSDC", "BNBUSDC", "EURIUSDC"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env();
    let mut symbols: Vec<String> = env::args().skip(1).collect();
    if symbols.is_empty() {
        symbols = DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect();
    }

    let prices = latest_prices(&config, &symbols)?;

    println!("Latest Crypto Prices at time {}:", Utc::now());
    for price in prices {
        println!("{}: {} USDC", price.symbol, price.price);
    }

    Ok(())
}
