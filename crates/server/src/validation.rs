//! Turning loosely typed request fields into engine values.

use api_types::DecimalInput;
use chrono::NaiveDate;
use engine::{ExchangeRate, MoneyCents};

use crate::ServerError;

const DATE_FORMAT_ERROR: &str = "Formato de data inválido. Use AAAA-MM-DD";

/// Strict `YYYY-MM-DD`. Unpadded forms such as `2024-1-5` are rejected.
pub fn parse_date(value: &str) -> Result<NaiveDate, ServerError> {
    let value = value.trim();
    if value.len() != 10 {
        return Err(ServerError::Generic(DATE_FORMAT_ERROR.to_string()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ServerError::Generic(DATE_FORMAT_ERROR.to_string()))
}

pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, ServerError> {
    value.map(parse_date).transpose()
}

pub fn parse_amount(value: &DecimalInput) -> Result<MoneyCents, ServerError> {
    Ok(value.as_text().parse::<MoneyCents>()?)
}

pub fn parse_optional_amount(
    value: Option<&DecimalInput>,
) -> Result<Option<MoneyCents>, ServerError> {
    value.map(parse_amount).transpose()
}

pub fn parse_rate(value: &DecimalInput) -> Result<ExchangeRate, ServerError> {
    Ok(value.as_text().parse::<ExchangeRate>()?)
}

/// Presence check: `0` and `false` count as provided.
pub fn required<T>(value: Option<T>, message: &str) -> Result<T, ServerError> {
    value.ok_or_else(|| ServerError::Generic(message.to_string()))
}

/// Present and non-blank.
pub fn required_text(value: Option<String>, message: &str) -> Result<String, ServerError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ServerError::Generic(message.to_string())),
    }
}
