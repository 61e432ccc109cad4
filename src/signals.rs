use chrono::{DateTime, Utc};

use crate::indicators::{rolling_mean, rolling_std, FeatureRow};

pub const BUY_PRESSURE_UPPER: f64 = 0.7;
pub const BUY_PRESSURE_LOWER: f64 = 0.3;

// volatility is "low" below this fraction of its own rolling mean
pub const LOW_VOLATILITY_FACTOR: f64 = 0.8;
// a spike is a volatility reading this many deviations above its rolling mean
pub const SPIKE_STDS: f64 = 2.0;
pub const VOLATILITY_WINDOW: usize = 60;

/// Boolean flags per candle. A flag whose input is still NaN (rolling
/// window not yet filled) is false: NaN compares false against anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalRow {
    pub open_time: DateTime<Utc>,
    pub buy_pressure_upper: bool,
    pub buy_pressure_lower: bool,
    pub net_quote_flow_upper: bool,
    pub net_quote_flow_lower: bool,
    pub flow_momentum_upper: bool,
    pub flow_momentum_lower: bool,
    pub vwap_upper: bool,
    pub vwap_lower: bool,
    pub price_momentum_upper: bool,
    pub price_momentum_lower: bool,
    pub low_volatility: bool,
    pub volatility_spike: bool,
}

/// Thresholds the feature table into signal flags. Pure and stateless:
/// the same input always yields the same output.
pub fn generate_signals(features: &[FeatureRow]) -> Vec<SignalRow> {
    let volatility: Vec<f64> = features.iter().map(|f| f.volatility).collect();
    let vol_mean = rolling_mean(&volatility, VOLATILITY_WINDOW);
    let vol_std = rolling_std(&volatility, VOLATILITY_WINDOW);

    features
        .iter()
        .enumerate()
        .map(|(i, f)| SignalRow {
            open_time: f.open_time,
            buy_pressure_upper: f.buy_pressure > BUY_PRESSURE_UPPER,
            buy_pressure_lower: f.buy_pressure < BUY_PRESSURE_LOWER,
            net_quote_flow_upper: f.net_quote_flow > 0.0,
            net_quote_flow_lower: f.net_quote_flow < 0.0,
            flow_momentum_upper: f.flow_momentum > 0.0,
            flow_momentum_lower: f.flow_momentum < 0.0,
            vwap_upper: f.vwap > f.ma_20,
            vwap_lower: f.vwap < f.ma_20,
            price_momentum_upper: f.price_momentum > 0.0,
            price_momentum_lower: f.price_momentum < 0.0,
            low_volatility: f.volatility < LOW_VOLATILITY_FACTOR * vol_mean[i],
            volatility_spike: f.volatility > vol_mean[i] + SPIKE_STDS * vol_std[i],
        })
        .collect()
}
