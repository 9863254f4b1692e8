use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV row with its traded-value estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Timestamp of the bar (UTC)
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Trading volume
    pub volume: u64,

    /// Traded value: volume x mean of open and close
    pub amount: f64,
}

impl Bar {
    /// Create a bar, deriving the traded-value estimate
    pub fn new(time: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        let amount = volume as f64 * (open + close) / 2.0;
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_derivation() {
        let time = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let bar = Bar::new(time, 10.0, 12.0, 9.0, 11.0, 1000);
        assert_eq!(bar.amount, 1000.0 * 10.5);
    }
}
