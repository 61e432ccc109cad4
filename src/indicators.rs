use chrono::{DateTime, Utc};

use crate::klines::Candle;

pub const MA_WINDOW: usize = 20;
pub const MOMENTUM_WINDOW: usize = 3;

/// Derived per-candle metrics, keyed by the candle's open time.
/// Rolling metrics hold NaN until their window is filled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureRow {
    pub open_time: DateTime<Utc>,
    pub vwap: f64,
    pub buy_pressure: f64,
    pub net_quote_flow: f64,
    pub flow_momentum: f64,
    pub ma_20: f64,
    pub volatility: f64,
    pub price_momentum: f64,
}

/// Trailing mean over the last `window` values, current row included.
/// NaN until the window is filled or while it contains a NaN.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                f64::NAN
            } else {
                values[i + 1 - window..=i].iter().sum::<f64>() / window as f64
            }
        })
        .collect()
}

/// Trailing population standard deviation, same window rules as `rolling_mean`.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    let means = rolling_mean(values, window);
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                f64::NAN
            } else {
                let mean = means[i];
                let var = values[i + 1 - window..=i]
                    .iter()
                    .map(|v| (v - mean) * (v - mean))
                    .sum::<f64>()
                    / window as f64;
                var.sqrt()
            }
        })
        .collect()
}

pub fn compute_features(candles: &[Candle]) -> Vec<FeatureRow> {
    let vwap: Vec<f64> = candles
        .iter()
        .map(|c| {
            // deliberate policy: vwap of an empty candle is 0, not NaN
            if c.volume != 0.0 {
                c.quote_asset_volume / c.volume
            } else {
                0.0
            }
        })
        .collect();

    let net_quote_flow: Vec<f64> = candles
        .iter()
        .map(|c| 2.0 * c.taker_buy_quote_volume - c.quote_asset_volume)
        .collect();

    let ma_20 = rolling_mean(&vwap, MA_WINDOW);
    let volatility = rolling_std(&vwap, MA_WINDOW);

    candles
        .iter()
        .enumerate()
        .map(|(i, c)| FeatureRow {
            open_time: c.open_time,
            vwap: vwap[i],
            buy_pressure: c.taker_buy_base_volume / c.volume,
            net_quote_flow: net_quote_flow[i],
            // first difference, zero (not NaN) on the first row
            flow_momentum: if i == 0 {
                0.0
            } else {
                net_quote_flow[i] - net_quote_flow[i - 1]
            },
            ma_20: ma_20[i],
            volatility: volatility[i],
            // trailing sum of the last MOMENTUM_WINDOW close differences;
            // the difference itself is undefined on row 0
            price_momentum: if i < MOMENTUM_WINDOW {
                f64::NAN
            } else {
                (i + 1 - MOMENTUM_WINDOW..=i)
                    .map(|j| candles[j].close - candles[j - 1].close)
                    .sum()
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn synthetic_candle(i: usize, close: f64, volume: f64, quote_volume: f64) -> Candle {
        let open_ms = 1672531200000 + (i as i64) * 3_600_000;
        Candle {
            open_time: Utc.timestamp_millis_opt(open_ms).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume,
            quote_asset_volume: quote_volume,
            number_of_trades: 100,
            taker_buy_base_volume: volume / 2.0,
            taker_buy_quote_volume: quote_volume / 2.0,
            close_time: Utc.timestamp_millis_opt(open_ms + 3_599_999).unwrap(),
        }
    }

    #[test]
    fn vwap_is_zero_when_volume_is_zero() {
        let candles = vec![synthetic_candle(0, 10.0, 0.0, 500.0)];
        let features = compute_features(&candles);
        assert_eq!(features[0].vwap, 0.0);
        // no zero guard on buy pressure, so it is NaN here
        assert!(features[0].buy_pressure.is_nan());
    }

    #[test]
    fn flow_momentum_first_row_is_zero() {
        let candles: Vec<Candle> = (0..5)
            .map(|i| synthetic_candle(i, 10.0, 100.0, 1000.0 + i as f64))
            .collect();
        let features = compute_features(&candles);
        assert_eq!(features[0].flow_momentum, 0.0);
        // 2 * taker_buy_quote - quote_volume = 0 for every row here
        assert_eq!(features[1].flow_momentum, 0.0);
    }

    #[test]
    fn rolling_metrics_undefined_before_window_fills() {
        let candles: Vec<Candle> = (0..25)
            .map(|i| synthetic_candle(i, 10.0, 100.0, 100.0))
            .collect();
        let features = compute_features(&candles);

        for row in &features[..MA_WINDOW - 1] {
            assert!(row.ma_20.is_nan());
            assert!(row.volatility.is_nan());
        }
        // constant vwap of 1: mean 1, deviation 0 once the window fills
        assert_eq!(features[MA_WINDOW - 1].ma_20, 1.0);
        assert_eq!(features[MA_WINDOW - 1].volatility, 0.0);
        assert_eq!(features[24].ma_20, 1.0);
    }

    #[test]
    fn price_momentum_is_trailing_diff_sum() {
        let closes = [10.0, 11.0, 13.0, 16.0, 20.0];
        let candles: Vec<Candle> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| synthetic_candle(i, c, 100.0, 100.0))
            .collect();
        let features = compute_features(&candles);

        for row in &features[..MOMENTUM_WINDOW] {
            assert!(row.price_momentum.is_nan());
        }
        // (11-10) + (13-11) + (16-13) telescopes to close[3] - close[0]
        assert_eq!(features[3].price_momentum, 16.0 - 10.0);
        assert_eq!(features[4].price_momentum, 20.0 - 11.0);
    }

    #[test]
    fn feature_table_keeps_candle_index() {
        let candles: Vec<Candle> = (0..30)
            .map(|i| synthetic_candle(i, 10.0 + i as f64, 100.0, 1000.0))
            .collect();
        let features = compute_features(&candles);

        assert_eq!(features.len(), candles.len());
        for (c, f) in candles.iter().zip(features.iter()) {
            assert_eq!(c.open_time, f.open_time);
        }
    }

    #[test]
    fn rolling_windows_are_trailing_only() {
        let mut values: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let before = rolling_mean(&values, 20);
        values[29] = 1000.0;
        let after = rolling_mean(&values, 20);
        // changing a later value must not affect earlier rows
        assert_eq!(before[..29], after[..29]);
        assert!(before[29] != after[29]);
    }
}
