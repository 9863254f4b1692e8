use std::path::PathBuf;

use crate::error::Error;
use crate::models::{Bar, Interval};
use crate::services::{download_history, normalize_ticker, QuoteClient};
use crate::utils::{format_timestamp, get_data_dir, parse_date};

pub fn run(
    symbol: String,
    start: Option<String>,
    end: Option<String>,
    interval: String,
    out: Option<PathBuf>,
) {
    let interval = match Interval::from_str(&interval) {
        Ok(interval) => interval,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let start = match start.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    let end = match end.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let out_dir = out.unwrap_or_else(get_data_dir);
    let symbol = normalize_ticker(&symbol).to_string();

    println!("📥 Fetching {} ({})...", symbol, interval);

    match run_download(&symbol, start, end, interval, &out_dir) {
        Ok((bars, path)) => {
            println!("\n✅ Download complete!");
            println!("   Symbol:   {}", symbol);
            println!("   Interval: {}", interval.description());
            if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
                println!(
                    "   Range:    {} → {}",
                    format_timestamp(&first.time),
                    format_timestamp(&last.time)
                );
            }
            println!("   Records:  {}", bars.len());
            println!("   Saved:    {}", path.display());
        }
        Err(e) => {
            eprintln!("\n❌ Download failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_download(
    symbol: &str,
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
    interval: Interval,
    out_dir: &std::path::Path,
) -> Result<(Vec<Bar>, PathBuf), Error> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::ConnectionFailure(format!("Failed to create runtime: {}", e)))?;

    runtime.block_on(async {
        let client = QuoteClient::new()?;
        download_history(&client, symbol, start, end, interval, out_dir).await
    })
}
