use serde::Deserialize;

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{build_client, get_json};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Condition {
    pub text: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AirQuality {
    pub pm2_5: f64,
    pub pm10: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Current {
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub humidity: f64,
    pub precip_mm: f64,
    pub condition: Condition,
    pub air_quality: Option<AirQuality>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Day {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avghumidity: f64,
    pub totalprecip_mm: f64,
    pub condition: Condition,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub day: Day,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CurrentWeather {
    pub location: Location,
    pub current: Current,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ForecastWeather {
    pub location: Location,
    pub forecast: Forecast,
}

// weatherapi.com wants booleans as yes/no query values
fn yes_no(b: bool) -> String {
    let s = if b { "yes" } else { "no" };
    s.to_string()
}

fn api_key(config: &Config) -> Result<String, ApiError> {
    config.api_key.clone().ok_or(ApiError::MissingApiKey)
}

pub fn current_weather(
    config: &Config,
    location: &str,
    aqi: bool,
) -> Result<CurrentWeather, ApiError> {
    let client = build_client(config)?;
    let url = format!("{}/current.json", config.weather_url);
    let params = [
        ("key", api_key(config)?),
        ("q", location.to_string()),
        ("aqi", yes_no(aqi)),
    ];
    get_json(&client, &url, &params)
}

pub fn forecast(
    config: &Config,
    location: &str,
    days: u8,
    aqi: bool,
    alerts: bool,
) -> Result<ForecastWeather, ApiError> {
    let client = build_client(config)?;
    let url = format!("{}/forecast.json", config.weather_url);
    let params = [
        ("key", api_key(config)?),
        ("q", location.to_string()),
        ("days", days.to_string()),
        ("aqi", yes_no(aqi)),
        ("alerts", yes_no(alerts)),
    ];
    get_json(&client, &url, &params)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"{
        "location": {
            "name": "Paris",
            "region": "Ile-de-France",
            "country": "France",
            "lat": 48.87,
            "lon": 2.33
        },
        "current": {
            "temp_c": 18.0,
            "feelslike_c": 17.4,
            "humidity": 72,
            "precip_mm": 0.1,
            "condition": {
                "text": "Partly cloudy",
                "code": 1003
            },
            "air_quality": {
                "pm2_5": 8.1,
                "pm10": 11.6,
                "co": 230.3
            }
        }
    }"#;

    #[test]
    fn parse_current_weather_test() {
        let report: CurrentWeather = serde_json::from_str(INPUT).unwrap();
        assert_eq!(report.location.name, "Paris");
        assert_eq!(report.current.temp_c, 18.0);
        assert_eq!(report.current.humidity, 72.0);
        assert_eq!(report.current.condition.text, "Partly cloudy");
        assert_eq!(
            report.current.air_quality,
            Some(AirQuality {
                pm2_5: 8.1,
                pm10: 11.6,
            })
        );
    }

    const FORECAST_INPUT: &str = r#"{
        "location": {
            "name": "Paris",
            "region": "Ile-de-France",
            "country": "France"
        },
        "forecast": {
            "forecastday": [
                {
                    "date": "2023-01-03",
                    "date_epoch": 1672704000,
                    "day": {
                        "maxtemp_c": 9.4,
                        "mintemp_c": 3.1,
                        "avghumidity": 81.0,
                        "totalprecip_mm": 2.3,
                        "condition": {
                            "text": "Light rain",
                            "code": 1183
                        }
                    }
                },
                {
                    "date": "2023-01-04",
                    "date_epoch": 1672790400,
                    "day": {
                        "maxtemp_c": 11.0,
                        "mintemp_c": 4.8,
                        "avghumidity": 74.0,
                        "totalprecip_mm": 0.0,
                        "condition": {
                            "text": "Sunny",
                            "code": 1000
                        }
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn parse_forecast_test() {
        let report: ForecastWeather = serde_json::from_str(FORECAST_INPUT).unwrap();
        assert_eq!(report.location.name, "Paris");
        assert_eq!(report.forecast.forecastday.len(), 2);

        let first = &report.forecast.forecastday[0];
        assert_eq!(first.date, "2023-01-03");
        assert_eq!(first.day.maxtemp_c, 9.4);
        assert_eq!(first.day.mintemp_c, 3.1);
        assert_eq!(first.day.avghumidity, 81.0);
        assert_eq!(first.day.totalprecip_mm, 2.3);
        assert_eq!(first.day.condition.text, "Light rain");
        assert_eq!(report.forecast.forecastday[1].day.condition.text, "Sunny");
    }

    #[test]
    fn missing_api_key_test() {
        let config = Config::default();
        let res = current_weather(&config, "Paris", true);
        assert!(matches!(res, Err(ApiError::MissingApiKey)));
    }
}
