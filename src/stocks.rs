use std::path::Path;

use chrono::NaiveDate;
use log::warn;
use serde::Deserialize;

use crate::error::ApiError;

const DATE_FORMAT: &str = "%d/%m/%Y";
const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PriceRow {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub closing: f64,
    pub volume: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DividendRow {
    pub date: String,
    pub dividende: f64,
}

#[derive(Clone, Debug)]
pub struct StockData {
    pub name: String,
    pub prices: Vec<PriceRow>,
    pub dividends: Vec<DividendRow>,
}

fn parse_date(s: &str) -> Result<NaiveDate, ApiError> {
    Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

/// Reads `<name>_price.csv` and, when present, `<name>_dividende.csv` from
/// the given data directory. A missing price file is an error; a missing
/// dividend file only logs a warning.
pub fn load_stock(data_dir: &Path, name: &str) -> Result<StockData, ApiError> {
    let price_path = data_dir.join(format!("{}_price.csv", name));
    if !price_path.exists() {
        return Err(ApiError::MissingDataFile(
            price_path.to_string_lossy().to_string(),
        ));
    }

    let mut prices: Vec<PriceRow> = vec![];
    let mut reader = csv::Reader::from_path(&price_path)?;
    for row in reader.deserialize() {
        prices.push(row?);
    }

    let dividend_path = data_dir.join(format!("{}_dividende.csv", name));
    let mut dividends: Vec<DividendRow> = vec![];
    if dividend_path.exists() {
        let mut reader = csv::Reader::from_path(&dividend_path)?;
        for row in reader.deserialize() {
            dividends.push(row?);
        }
    } else {
        warn!("no dividend data for {}", name);
    }

    Ok(StockData {
        name: name.to_string(),
        prices,
        dividends,
    })
}

impl StockData {
    fn closing_on(&self, date: &str) -> Result<f64, ApiError> {
        self.prices
            .iter()
            .find(|p| p.date == date)
            .map(|p| p.closing)
            .ok_or_else(|| ApiError::UnknownDate(date.to_string()))
    }

    fn resolve_end<'a>(&'a self, end_date: Option<&'a str>) -> Result<&'a str, ApiError> {
        match end_date {
            Some(d) => Ok(d),
            None => self
                .prices
                .last()
                .map(|p| p.date.as_str())
                .ok_or(ApiError::EmptyResult),
        }
    }

    // annualization divides by the day count, so the period must be non-empty
    fn period_days(start_date: &str, end_date: &str) -> Result<f64, ApiError> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        let nb_days = (end - start).num_days();
        if nb_days <= 0 {
            return Err(ApiError::InvalidDateRange(
                start_date.to_string(),
                end_date.to_string(),
            ));
        }
        Ok(nb_days as f64)
    }

    /// Annualized return on investment between two dates, dividends paid
    /// after the start date added to the final closing price.
    pub fn roi(&self, start_date: &str, end_date: Option<&str>) -> Result<f64, ApiError> {
        let end_date = self.resolve_end(end_date)?;
        let start = parse_date(start_date)?;
        let nb_days = StockData::period_days(start_date, end_date)?;

        let mut dividends = 0.0;
        for row in &self.dividends {
            if parse_date(&row.date)? > start {
                dividends += row.dividende;
            }
        }

        let open = self.closing_on(start_date)?;
        let close = self.closing_on(end_date)?;

        Ok(((close + dividends) / open).powf(DAYS_PER_YEAR / nb_days) - 1.0)
    }

    /// Standard deviation of the dividend-adjusted closing price over the
    /// period, annualized and raw. The divisor is the number of calendar
    /// days, not the number of quotes.
    pub fn sd(&self, start_date: &str, end_date: Option<&str>) -> Result<(f64, f64), ApiError> {
        let end_date = self.resolve_end(end_date)?;
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        let nb_days = StockData::period_days(start_date, end_date)?;

        // closing prices adjusted by subtracting each dividend from every
        // quote up to and including its payment date
        let mut adjusted: Vec<(NaiveDate, f64)> = vec![];
        for row in &self.prices {
            adjusted.push((parse_date(&row.date)?, row.closing));
        }
        for div in &self.dividends {
            let div_date = parse_date(&div.date)?;
            if div_date > start {
                for (date, closing) in adjusted.iter_mut() {
                    if *date <= div_date {
                        *closing -= div.dividende;
                    }
                }
            }
        }

        let in_period: Vec<f64> = adjusted
            .iter()
            .filter(|(date, _)| *date >= start && *date <= end)
            .map(|(_, closing)| *closing)
            .collect();
        if in_period.is_empty() {
            return Err(ApiError::UnknownDate(start_date.to_string()));
        }

        let mean = in_period.iter().sum::<f64>() / in_period.len() as f64;
        let sd = (in_period.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / nb_days).sqrt();
        let sd_annual = sd * (DAYS_PER_YEAR / nb_days).sqrt();

        Ok((sd_annual, sd))
    }
}
