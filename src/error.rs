use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status from an upstream API
    #[error("upstream returned {status}: {body}")]
    Transport { status: u16, body: String },

    /// The request was valid but the upstream returned zero rows
    #[error("no data returned for the given parameters")]
    EmptyResult,

    #[error("strategy {0} is not implemented")]
    UnknownStrategy(String),

    #[error("data file not found: {0}")]
    MissingDataFile(String),

    #[error("date {0} not found in the price data")]
    UnknownDate(String),

    #[error("empty period from {0} to {1}")]
    InvalidDateRange(String, String),

    #[error("WEATHER_API_KEY is not set")]
    MissingApiKey,

    #[error("could not parse date: {0}")]
    Date(#[from] chrono::format::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read csv: {0}")]
    Csv(#[from] csv::Error),
}
