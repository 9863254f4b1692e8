use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::constants::{ENV_DATA_DIR, ENV_MODEL_ROOT};
use crate::error::{AppError, Result};

/// Get downloaded-data directory from environment variable or use default
pub fn get_data_dir() -> PathBuf {
    std::env::var(ENV_DATA_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

/// Get model artifact root from environment variable or use default
pub fn get_model_root() -> PathBuf {
    std::env::var(ENV_MODEL_ROOT)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("models/pricecast"))
}

/// Parse a stored timestamp, accepting both `YYYY-MM-DD HH:MM:SS` and
/// bare `YYYY-MM-DD` (treated as midnight UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }
    Err(AppError::InvalidInput(format!(
        "Unrecognized timestamp: {}",
        value
    )))
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidInput(format!("Invalid date (expected YYYY-MM-DD): {}", value)))
}

pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn format_date(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_timestamp_full() {
        let dt = parse_timestamp("2024-01-02 14:30:00").unwrap();
        assert_eq!(format_timestamp(&dt), "2024-01-02 14:30:00");
        assert_eq!(format_date(&dt), "2024-01-02");
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_parse_timestamp_date_only() {
        let dt = parse_timestamp("2024-01-02").unwrap();
        assert_eq!(format_timestamp(&dt), "2024-01-02 00:00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("02/01/2024").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-03-15").unwrap();
        assert_eq!(date.to_string(), "2024-03-15");
        assert!(parse_date("2024-3-x").is_err());
    }
}
