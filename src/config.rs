use std::env;
use std::time::Duration;

use dotenv::dotenv;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const DEFAULT_WEATHER_URL: &str = "http://api.weatherapi.com/v1";
const DEFAULT_SYMBOL: &str = "BTCUSDC";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the API clients, passed explicitly at call sites
/// instead of living in module-level globals.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub weather_url: String,
    /// weatherapi.com key, only needed by the weather client
    pub api_key: Option<String>,
    pub default_symbol: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Config {
        dotenv().ok();

        let timeout = env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Config {
            base_url: env::var("BINANCE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            weather_url: env::var("WEATHER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_URL.to_string()),
            api_key: env::var("WEATHER_API_KEY").ok(),
            default_symbol: env::var("DEFAULT_SYMBOL")
                .unwrap_or_else(|_| DEFAULT_SYMBOL.to_string()),
            timeout: Duration::from_secs(timeout),
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            api_key: None,
            default_symbol: DEFAULT_SYMBOL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
