use std::env;
use std::path::PathBuf;

use binance_signals::stocks::load_stock;

// cargo run --bin stock_analysis STOCK_NAME [START_DATE]

const DATA_DIR: &str = "data";
const DEFAULT_START: &str = "03/01/2022";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let name = match env::args().nth(1) {
        Some(name) => name,
        None => {
            eprintln!("usage: stock_analysis STOCK_NAME [START_DATE]");
            std::process::exit(1);
        }
    };
    let start_date = env::args().nth(2).unwrap_or_else(|| DEFAULT_START.to_string());

    let stock = load_stock(&PathBuf::from(DATA_DIR), &name)?;
    let roi = stock.roi(&start_date, None)?;
    let (sd_annual, sd) = stock.sd(&start_date, None)?;

    println!("{} since {}:", stock.name, start_date);
    println!("  annual RoI: {:.2}%", roi * 100.0);
    println!("  standard deviation: {:.4} (annualized {:.4})", sd, sd_annual);

    Ok(())
}
