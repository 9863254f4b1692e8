//! Bar CSV Store
//!
//! Saved-file layout: `{symbol}_{interval}_{start}_{end}.csv` with columns
//! `timestamps,open,high,low,close,volume,amount`. Symbols are cleaned for
//! the filesystem; row timestamps are `YYYY-MM-DD HH:MM:SS` in UTC.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{Reader, Writer};
use tracing::info;

use crate::constants::CSV_HEADER;
use crate::error::Result;
use crate::models::{Bar, Interval};
use crate::utils::{format_timestamp, parse_timestamp};

/// File name for a saved window. Dots and dashes in the symbol become
/// underscores so exchange suffixes survive as plain file names.
pub fn output_file_name(
    symbol: &str,
    interval: Interval,
    start: NaiveDate,
    end: NaiveDate,
) -> String {
    let clean = symbol.replace('.', "_").replace('-', "_");
    format!("{}_{}_{}_{}.csv", clean, interval.as_str(), start, end)
}

/// Write bars to `dir`, creating it if needed. Returns the full path.
pub fn save_window(
    dir: &Path,
    symbol: &str,
    interval: Interval,
    start: NaiveDate,
    end: NaiveDate,
    bars: &[Bar],
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(output_file_name(symbol, interval, start, end));

    let mut writer = Writer::from_path(&path)?;
    writer.write_record(&CSV_HEADER)?;

    for bar in bars {
        writer.write_record(&[
            format_timestamp(&bar.time),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
            bar.amount.to_string(),
        ])?;
    }

    writer.flush()?;
    info!(path = %path.display(), records = bars.len(), "bars saved");
    Ok(path)
}

/// Read a saved bar file back
pub fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = Reader::from_path(path)?;
    let mut bars = Vec::new();

    for result in reader.records() {
        let record = result?;

        let time = parse_timestamp(record.get(0).unwrap_or(""))?;
        let open: f64 = record.get(1).unwrap_or("").parse().unwrap_or(0.0);
        let high: f64 = record.get(2).unwrap_or("").parse().unwrap_or(0.0);
        let low: f64 = record.get(3).unwrap_or("").parse().unwrap_or(0.0);
        let close: f64 = record.get(4).unwrap_or("").parse().unwrap_or(0.0);
        let volume: u64 = record.get(5).unwrap_or("").parse().unwrap_or(0);
        let amount: f64 = record.get(6).unwrap_or("").parse().unwrap_or(0.0);

        bars.push(Bar {
            time,
            open,
            high,
            low,
            close,
            volume,
            amount,
        });
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use tempfile::TempDir;

    fn sample_bars() -> Vec<Bar> {
        (0..3)
            .map(|i| {
                let time = DateTime::from_timestamp(1_704_121_200 + i * 86_400, 0).unwrap();
                Bar::new(time, 100.0 + i as f64, 102.0, 99.0, 101.0, 1_000 + i as u64)
            })
            .collect()
    }

    #[test]
    fn test_output_file_name_cleans_symbol() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        assert_eq!(
            output_file_name("AAPL", Interval::Day1, start, end),
            "AAPL_1d_2024-01-01_2024-02-01.csv"
        );
        assert_eq!(
            output_file_name("0700.HK", Interval::Hour1, start, end),
            "0700_HK_1h_2024-01-01_2024-02-01.csv"
        );
        assert_eq!(
            output_file_name("BRK-B", Interval::Day1, start, end),
            "BRK_B_1d_2024-01-01_2024-02-01.csv"
        );
    }

    #[test]
    fn test_round_trip_preserves_rows() {
        let dir = TempDir::new().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let bars = sample_bars();

        let path = save_window(dir.path(), "AAPL", Interval::Day1, start, end, &bars).unwrap();

        let header = fs::read_to_string(&path).unwrap();
        assert!(header.starts_with("timestamps,open,high,low,close,volume,amount"));

        let loaded = load_bars(&path).unwrap();
        assert_eq!(loaded.len(), bars.len());
        for (a, b) in loaded.iter().zip(bars.iter()) {
            assert_eq!(a.time, b.time);
            assert_eq!(a.open, b.open);
            assert_eq!(a.volume, b.volume);
            assert_eq!(a.amount, b.amount);
        }
        assert!(loaded.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("quotes").join("daily");
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let path = save_window(&nested, "MSFT", Interval::Day1, start, start, &sample_bars());
        assert!(path.unwrap().exists());
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(load_bars(Path::new("/nonexistent/file.csv")).is_err());
    }
}
