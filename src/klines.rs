use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{build_client, get_json};

const KLINES_PATH: &str = "/api/v3/klines";

// exchange-side maximum for the limit parameter
pub const MAX_LIMIT: u32 = 1000;

/// One kline row as Binance returns it: a 12-element array with the
/// numeric fields encoded as strings. The last element is documented
/// as "ignore" and is dropped during conversion.
#[derive(Clone, Debug, Deserialize)]
pub struct BinanceKline {
    pub open_time: i64,
    #[serde(deserialize_with = "deserialize_f64_from_str")]
    pub open: f64,
    #[serde(deserialize_with = "deserialize_f64_from_str")]
    pub high: f64,
    #[serde(deserialize_with = "deserialize_f64_from_str")]
    pub low: f64,
    #[serde(deserialize_with = "deserialize_f64_from_str")]
    pub close: f64,
    #[serde(deserialize_with = "deserialize_f64_from_str")]
    pub volume: f64,
    pub close_time: i64,
    #[serde(deserialize_with = "deserialize_f64_from_str")]
    pub quote_asset_volume: f64,
    pub number_of_trades: i64,
    #[serde(deserialize_with = "deserialize_f64_from_str")]
    pub taker_buy_base_volume: f64,
    #[serde(deserialize_with = "deserialize_f64_from_str")]
    pub taker_buy_quote_volume: f64,
    pub ignore: String,
}

fn deserialize_f64_from_str<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<f64>().map_err(serde::de::Error::custom)
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub quote_asset_volume: f64,
    pub number_of_trades: i64,
    pub taker_buy_base_volume: f64,
    pub taker_buy_quote_volume: f64,
    pub close_time: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct KlineQuery {
    pub symbol: String,
    pub interval: String,
    pub limit: u32,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl KlineQuery {
    pub fn new(symbol: &str, interval: &str, limit: u32) -> KlineQuery {
        KlineQuery {
            symbol: symbol.to_string(),
            interval: interval.to_string(),
            limit,
            start_time: None,
            end_time: None,
        }
    }
}

pub fn kline_to_candle(k: BinanceKline) -> Candle {
    Candle {
        open_time: Utc.timestamp_millis_opt(k.open_time).unwrap(),
        open: k.open,
        high: k.high,
        low: k.low,
        close: k.close,
        volume: k.volume,
        quote_asset_volume: k.quote_asset_volume,
        number_of_trades: k.number_of_trades,
        taker_buy_base_volume: k.taker_buy_base_volume,
        taker_buy_quote_volume: k.taker_buy_quote_volume,
        close_time: Utc.timestamp_millis_opt(k.close_time).unwrap(),
    }
}

/// A zero-row result for otherwise valid parameters is its own error so
/// callers can tell "no data for this query" from a broken upstream.
pub fn klines_to_candles(rows: Vec<BinanceKline>) -> Result<Vec<Candle>, ApiError> {
    if rows.is_empty() {
        return Err(ApiError::EmptyResult);
    }
    Ok(rows.into_iter().map(kline_to_candle).collect())
}

/// Query parameters as they are actually sent: the limit is clamped to
/// the exchange maximum and the time bounds appear only when set.
pub fn query_params(query: &KlineQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("symbol", query.symbol.clone()),
        ("interval", query.interval.clone()),
        ("limit", query.limit.min(MAX_LIMIT).to_string()),
    ];
    if let Some(start) = query.start_time {
        params.push(("startTime", start.to_string()));
    }
    if let Some(end) = query.end_time {
        params.push(("endTime", end.to_string()));
    }
    params
}

pub fn fetch_klines(config: &Config, query: &KlineQuery) -> Result<Vec<Candle>, ApiError> {
    let client = build_client(config)?;
    let url = format!("{}{}", config.base_url, KLINES_PATH);
    let params = query_params(query);

    let query_string: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    println!("{}: {}?{}", query.symbol, url, query_string.join("&"));

    let rows: Vec<BinanceKline> = get_json(&client, &url, &params)?;
    klines_to_candles(rows)
}
