use log::{error, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::ApiError;

/// Builds the blocking client with the configured request timeout.
pub fn build_client(config: &Config) -> Result<Client, ApiError> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(client)
}

fn decode_response<T: DeserializeOwned>(
    url: &str,
    status: StatusCode,
    body: String,
) -> Result<T, ApiError> {
    if !status.is_success() {
        error!("{} returned {}: {}", url, status, body);
        return Err(ApiError::Transport {
            status: status.as_u16(),
            body,
        });
    }
    info!("{} returned {}", url, status);

    Ok(serde_json::from_str(&body)?)
}

/// Performs a GET request and decodes the JSON body. All domain clients
/// (klines, ticker, weather) go through here so status handling is uniform.
pub fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    params: &[(&str, String)],
) -> Result<T, ApiError> {
    let response = client.get(url).query(params).send()?;
    let status = response.status();
    let body = response.text()?;
    decode_response(url, status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_is_a_transport_error() {
        let res: Result<Vec<i64>, ApiError> = decode_response(
            "https://api.binance.com/api/v3/klines",
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream exploded".to_string(),
        );
        match res {
            Err(ApiError::Transport { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected Transport, got {:?}", other),
        }
    }

    #[test]
    fn success_status_decodes_the_body() {
        let res: Result<Vec<i64>, ApiError> =
            decode_response("http://localhost", StatusCode::OK, "[1, 2, 3]".to_string());
        assert_eq!(res.unwrap(), vec![1, 2, 3]);
    }
}
