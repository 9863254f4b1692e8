use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::constants::DEFAULT_PORT;

#[derive(Parser)]
#[command(name = "aipricecast")]
#[command(about = "AI Price Cast CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download historical OHLCV data to CSV
    Fetch {
        /// Ticker symbol, optionally exchange-prefixed (NASDAQ:AAPL)
        symbol: String,
        /// Start date (YYYY-MM-DD); defaults per interval
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        end: Option<String>,
        /// Bar interval (1m, 5m, 1h, 1d, 1wk, ...)
        #[arg(short, long, default_value = "1d")]
        interval: String,
        /// Output directory; defaults to the data directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Start the forecast server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Show model and data status
    Status,
    /// List popular symbols and supported intervals
    Symbols,
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            symbol,
            start,
            end,
            interval,
            out,
        } => {
            commands::fetch::run(symbol, start, end, interval, out);
        }
        Commands::Serve { port } => {
            commands::serve::run(port);
        }
        Commands::Status => {
            commands::status::run();
        }
        Commands::Symbols => {
            commands::symbols::run();
        }
    }
}
