//! Shared Constants
//!
//! Request bounds, fetch defaults and on-disk layout used across the
//! downloader and the forecast server.
//!
//! ## Prediction Parameter Bounds
//!
//! | Parameter    | Min | Max | Default |
//! |--------------|-----|-----|---------|
//! | lookback     | 100 | 512 | 400     |
//! | pred_len     | 30  | 180 | 120     |
//! | temperature  | 0.1 | 2.0 | 1.0     |
//! | top_p        | 0.1 | 1.0 | 0.9     |
//! | sample_count | 1   | 5   | 1       |

/// Chart API host used for all historical quote requests
pub const QUOTE_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Browser-like User-Agent; the chart endpoint rejects default client UAs
pub const QUOTE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Per-request timeout for quote fetches (seconds)
pub const QUOTE_TIMEOUT_SECS: u64 = 30;

/// Column order of saved bar files
pub const CSV_HEADER: [&str; 7] = [
    "timestamps",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "amount",
];

/// Daily history pulled for a prediction request (about two years)
pub const PREDICT_HISTORY_DAYS: i64 = 730;

/// Smallest context the forecaster accepts
pub const MIN_LOOKBACK: usize = 100;

/// Smallest horizon the forecaster will produce
pub const MIN_HORIZON: usize = 30;

/// Requested-lookback bounds for the predict endpoint
pub const LOOKBACK_MAX: usize = 512;
pub const LOOKBACK_DEFAULT: usize = 400;

/// Requested-horizon bounds for the predict endpoint
pub const HORIZON_MAX: usize = 180;
pub const HORIZON_DEFAULT: usize = 120;

/// Sampling temperature bounds
pub const TEMPERATURE_MIN: f64 = 0.1;
pub const TEMPERATURE_MAX: f64 = 2.0;
pub const TEMPERATURE_DEFAULT: f64 = 1.0;

/// Nucleus (top-p) bounds
pub const TOP_P_MIN: f64 = 0.1;
pub const TOP_P_MAX: f64 = 1.0;
pub const TOP_P_DEFAULT: f64 = 0.9;

/// Sample path count bounds
pub const SAMPLE_COUNT_MIN: usize = 1;
pub const SAMPLE_COUNT_MAX: usize = 5;
pub const SAMPLE_COUNT_DEFAULT: usize = 1;

/// Model key used when a request names no model or an unknown one
pub const DEFAULT_MODEL_KEY: &str = "pricecast-base";

/// Subdirectory of the model root holding pretrained artifacts
pub const PRETRAINED_DIR: &str = "pretrained";

/// Default HTTP port for `serve`
pub const DEFAULT_PORT: u16 = 8000;

/// Environment variable overriding the downloaded-data directory
pub const ENV_DATA_DIR: &str = "AIPRICECAST_DATA_DIR";

/// Environment variable overriding the model artifact root
pub const ENV_MODEL_ROOT: &str = "AIPRICECAST_MODEL_ROOT";
