use serde::{Deserialize, Deserializer};

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{build_client, get_json};

const TICKER_PATH: &str = "/api/v3/ticker/price";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TickerPrice {
    pub symbol: String,
    #[serde(deserialize_with = "deserialize_f64_from_str")]
    pub price: f64,
}

fn deserialize_f64_from_str<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<f64>().map_err(serde::de::Error::custom)
}

/// Keeps only the requested symbols, in upstream order. No price for any
/// of them is the same "no data" condition as an empty kline response.
pub fn filter_symbols(
    prices: Vec<TickerPrice>,
    symbols: &[String],
) -> Result<Vec<TickerPrice>, ApiError> {
    let filtered: Vec<TickerPrice> = prices
        .into_iter()
        .filter(|p| symbols.contains(&p.symbol))
        .collect();

    if filtered.is_empty() {
        return Err(ApiError::EmptyResult);
    }
    Ok(filtered)
}

/// Fetches the full price ticker and filters it to the requested symbols.
pub fn latest_prices(config: &Config, symbols: &[String]) -> Result<Vec<TickerPrice>, ApiError> {
    let client = build_client(config)?;
    let url = format!("{}{}", config.base_url, TICKER_PATH);

    println!("Fetching latest prices");

    let prices: Vec<TickerPrice> = get_json(&client, &url, &[])?;
    filter_symbols(prices, symbols)
}
