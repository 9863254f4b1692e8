//! Download Orchestration
//!
//! Resolves default date windows, then pulls bars through the quote client
//! into the CSV store. This is the service behind `fetch`.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::Result;
use crate::models::{Bar, Interval};
use crate::services::bar_store;
use crate::services::quote::QuoteClient;

/// Resolve an optional date window to concrete bounds.
///
/// The end defaults to today. A missing start is measured back from today
/// by the interval's default window, not from a user-supplied end.
pub fn resolve_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    interval: Interval,
) -> (NaiveDate, NaiveDate) {
    let today = Utc::now().date_naive();
    let end = end.unwrap_or(today);
    let start = start.unwrap_or_else(|| today - chrono::Duration::days(interval.default_window_days()));
    (start, end)
}

/// Fetch a symbol's history and save it. Returns the bars and the file path.
pub async fn download_history(
    client: &QuoteClient,
    symbol: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    interval: Interval,
    out_dir: &Path,
) -> Result<(Vec<Bar>, PathBuf)> {
    let (start, end) = resolve_window(start, end, interval);
    info!(symbol, %interval, %start, %end, "downloading history");

    let bars = client.fetch_window(symbol, start, end, interval).await?;
    let path = bar_store::save_window(out_dir, symbol, interval, start, end, &bars)?;

    Ok((bars, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_window_passthrough() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let resolved = resolve_window(Some(start), Some(end), Interval::Day1);
        assert_eq!(resolved, (start, end));
    }

    #[test]
    fn test_resolve_window_defaults() {
        let today = Utc::now().date_naive();

        let (start, end) = resolve_window(None, None, Interval::Day1);
        assert_eq!(end, today);
        assert_eq!((end - start).num_days(), 365);

        let (start, _) = resolve_window(None, None, Interval::Minute5);
        assert_eq!((today - start).num_days(), 7);

        let (start, _) = resolve_window(None, None, Interval::Hour1);
        assert_eq!((today - start).num_days(), 60);
    }

    #[test]
    fn test_resolve_window_default_start_ignores_custom_end() {
        let today = Utc::now().date_naive();
        let end = today - chrono::Duration::days(100);

        // Start stays anchored to today even with an earlier end
        let (start, resolved_end) = resolve_window(None, Some(end), Interval::Day1);
        assert_eq!(resolved_end, end);
        assert_eq!((today - start).num_days(), 365);
    }
}
