use std::env;

use binance_signals::config::Config;
use binance_signals::weather::{current_weather, forecast};

// cargo run --bin console_weather [LOCATION] [FORECAST_DAYS]

const DEFAULT_LOCATION: &str = "Paris";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env();
    let location = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let forecast_days: Option<u8> = env::args().nth(2).and_then(|s| s.parse().ok());

    match forecast_days {
        None => {
            let report = current_weather(&config, &location, true)?;
            let current = &report.current;

            println!("Current weather in {}:", report.location.name);
            println!(
                "  Temperature: {}°C (feels like {}°C)",
                current.temp_c, current.feelslike_c
            );
            println!("  Humidity: {}%", current.humidity);
            println!("  Precipitation: {} mm", current.precip_mm);
            println!("  Weather: {}", current.condition.text);

            if let Some(air_quality) = &current.air_quality {
                println!("Air quality:");
                println!("  PM2.5: {} μg/m3", air_quality.pm2_5);
                println!("  PM10: {} μg/m3", air_quality.pm10);
            }
        }
        Some(days) => {
            let report = forecast(&config, &location, days, false, true)?;

            println!(
                "Forecast in {} for the next {} days:",
                report.location.name, days
            );
            for day in &report.forecast.forecastday {
                println!("  {}:", day.date);
                println!("    Maximum temperature: {}°C", day.day.maxtemp_c);
                println!("    Minimum temperature: {}°C", day.day.mintemp_c);
                println!("    Average humidity: {}%", day.day.avghumidity);
                println!("    Precipitation: {} mm", day.day.totalprecip_mm);
                println!("    Weather: {}", day.day.condition.text);
            }
        }
    }

    Ok(())
}
