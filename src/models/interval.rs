use serde::{Deserialize, Serialize};

/// Bar intervals supported by the chart endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    Minute1,
    Minute2,
    Minute5,
    Minute15,
    Minute30,
    Minute60,
    Minute90,
    Hour1,
    Day1,
    Day5,
    Week1,
    Month1,
    Month3,
}

impl Interval {
    /// All intervals, in the order the catalog lists them
    pub fn all() -> &'static [Interval] {
        &[
            Interval::Minute1,
            Interval::Minute2,
            Interval::Minute5,
            Interval::Minute15,
            Interval::Minute30,
            Interval::Minute60,
            Interval::Minute90,
            Interval::Hour1,
            Interval::Day1,
            Interval::Day5,
            Interval::Week1,
            Interval::Month1,
            Interval::Month3,
        ]
    }

    /// Convert to the chart API code ("1m", "1h", "1d", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute2 => "2m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Minute60 => "60m",
            Interval::Minute90 => "90m",
            Interval::Hour1 => "1h",
            Interval::Day1 => "1d",
            Interval::Day5 => "5d",
            Interval::Week1 => "1wk",
            Interval::Month1 => "1mo",
            Interval::Month3 => "3mo",
        }
    }

    /// Human description for catalog listings
    pub fn description(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1 minute",
            Interval::Minute2 => "2 minutes",
            Interval::Minute5 => "5 minutes",
            Interval::Minute15 => "15 minutes",
            Interval::Minute30 => "30 minutes",
            Interval::Minute60 => "60 minutes",
            Interval::Minute90 => "90 minutes",
            Interval::Hour1 => "1 hour",
            Interval::Day1 => "1 day",
            Interval::Day5 => "5 days",
            Interval::Week1 => "1 week",
            Interval::Month1 => "1 month",
            Interval::Month3 => "3 months",
        }
    }

    /// Default fetch window when no start date is given.
    ///
    /// The chart endpoint caps minute-family lookback at 7 days and hourly
    /// at 60 days; everything else defaults to a year.
    pub fn default_window_days(&self) -> i64 {
        match self {
            Interval::Minute1
            | Interval::Minute2
            | Interval::Minute5
            | Interval::Minute15
            | Interval::Minute30
            | Interval::Minute60
            | Interval::Minute90 => 7,
            Interval::Hour1 => 60,
            _ => 365,
        }
    }

    /// Whether bars are finer than one day
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            Interval::Minute1
                | Interval::Minute2
                | Interval::Minute5
                | Interval::Minute15
                | Interval::Minute30
                | Interval::Minute60
                | Interval::Minute90
                | Interval::Hour1
        )
    }

    /// Parse from a chart API code (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "1m" => Ok(Interval::Minute1),
            "2m" => Ok(Interval::Minute2),
            "5m" => Ok(Interval::Minute5),
            "15m" => Ok(Interval::Minute15),
            "30m" => Ok(Interval::Minute30),
            "60m" => Ok(Interval::Minute60),
            "90m" => Ok(Interval::Minute90),
            "1h" => Ok(Interval::Hour1),
            "1d" => Ok(Interval::Day1),
            "5d" => Ok(Interval::Day5),
            "1wk" => Ok(Interval::Week1),
            "1mo" => Ok(Interval::Month1),
            "3mo" => Ok(Interval::Month3),
            _ => Err(format!(
                "Invalid interval: {}. Valid options: 1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo",
                s
            )),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_as_str() {
        assert_eq!(Interval::Minute1.as_str(), "1m");
        assert_eq!(Interval::Hour1.as_str(), "1h");
        assert_eq!(Interval::Day1.as_str(), "1d");
        assert_eq!(Interval::Week1.as_str(), "1wk");
        assert_eq!(Interval::Month3.as_str(), "3mo");
    }

    #[test]
    fn test_interval_from_str() {
        assert_eq!(Interval::from_str("1d").unwrap(), Interval::Day1);
        assert_eq!(Interval::from_str("1D").unwrap(), Interval::Day1);
        assert_eq!(Interval::from_str("1mo").unwrap(), Interval::Month1);
        assert_eq!(Interval::from_str("90m").unwrap(), Interval::Minute90);
        assert!(Interval::from_str("4h").is_err());
        assert!(Interval::from_str("").is_err());
    }

    #[test]
    fn test_interval_round_trip() {
        for interval in Interval::all() {
            assert_eq!(Interval::from_str(interval.as_str()).unwrap(), *interval);
        }
    }

    #[test]
    fn test_default_window_days() {
        assert_eq!(Interval::Minute1.default_window_days(), 7);
        assert_eq!(Interval::Minute90.default_window_days(), 7);
        assert_eq!(Interval::Hour1.default_window_days(), 60);
        assert_eq!(Interval::Day1.default_window_days(), 365);
        assert_eq!(Interval::Month3.default_window_days(), 365);
    }

    #[test]
    fn test_is_intraday() {
        assert!(Interval::Minute5.is_intraday());
        assert!(Interval::Hour1.is_intraday());
        assert!(!Interval::Day1.is_intraday());
        assert!(!Interval::Week1.is_intraday());
    }
}
