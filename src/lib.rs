pub mod config;
pub mod error;
pub mod http;
pub mod indicators;
pub mod klines;
pub mod score;
pub mod signals;
pub mod stocks;
pub mod ticker;
pub mod weather;

use crate::error::ApiError;
use crate::indicators::compute_features;
use crate::klines::Candle;
use crate::score::{evaluate_signal_score, SignalScore};
use crate::signals::generate_signals;

/// Runs the full scoring pipeline over a candle table. Every run
/// recomputes everything from scratch; nothing is cached between calls.
pub fn score_candles(candles: &[Candle], strategy: &str) -> Result<SignalScore, ApiError> {
    let features = compute_features(candles);
    let signals = generate_signals(&features);
    evaluate_signal_score(&signals, strategy)
}
