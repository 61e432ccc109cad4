use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::signals::SignalRow;

// each score sums five flags
const FLAGS_PER_SIDE: f64 = 5.0;
const SIGNAL_THRESHOLD: f64 = 0.5;

pub const STRATEGIES: [&str; 2] = ["default", "st1"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalSignal {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for FinalSignal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FinalSignal::Positive => write!(f, "positive"),
            FinalSignal::Negative => write!(f, "negative"),
            FinalSignal::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreRow {
    pub open_time: DateTime<Utc>,
    pub positive_score: f64,
    pub negative_score: f64,
    pub final_signal: FinalSignal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SignalScore {
    pub strategy: String,
    pub rows: Vec<ScoreRow>,
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn classify(positive_score: f64, negative_score: f64) -> FinalSignal {
    if positive_score > SIGNAL_THRESHOLD && negative_score <= SIGNAL_THRESHOLD {
        FinalSignal::Positive
    } else if negative_score > SIGNAL_THRESHOLD && positive_score <= SIGNAL_THRESHOLD {
        FinalSignal::Negative
    } else {
        FinalSignal::Neutral
    }
}

/// Aggregates signal flags into bounded scores under a named strategy.
/// Only "default"/"st1" exists; any other name is an error, not a fallback.
///
/// low_volatility is counted in both sums. The asymmetry (no distinct
/// high-volatility flag on the negative side) is kept on purpose.
pub fn evaluate_signal_score(
    signals: &[SignalRow],
    strategy: &str,
) -> Result<SignalScore, ApiError> {
    if !STRATEGIES.contains(&strategy) {
        return Err(ApiError::UnknownStrategy(strategy.to_string()));
    }

    let rows = signals
        .iter()
        .map(|s| {
            let positive_score = (flag(s.buy_pressure_upper)
                + flag(s.net_quote_flow_upper)
                + flag(s.flow_momentum_upper)
                + flag(s.vwap_upper)
                + flag(s.low_volatility))
                / FLAGS_PER_SIDE;
            let negative_score = (flag(s.buy_pressure_lower)
                + flag(s.net_quote_flow_lower)
                + flag(s.flow_momentum_lower)
                + flag(s.vwap_lower)
                + flag(s.low_volatility))
                / FLAGS_PER_SIDE;

            ScoreRow {
                open_time: s.open_time,
                positive_score,
                negative_score,
                final_signal: classify(positive_score, negative_score),
            }
        })
        .collect();

    Ok(SignalScore {
        strategy: strategy.to_string(),
        rows,
    })
}
