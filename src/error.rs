use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error("No data available: {0}")]
    DataUnavailable(String),

    #[error("No history returned: {0}")]
    NoHistory(String),

    #[error("Connection failed: {0}")]
    ConnectionFailure(String),

    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    #[error("Insufficient data: need at least {required} rows, got {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Model backend unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Failed to load model: {0}")]
    ModelLoadFailure(String),

    #[error("Prediction failed: {0}")]
    PredictionFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<tokio::io::Error> for AppError {
    fn from(err: tokio::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Io(format!("CSV error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::FetchFailure(err.to_string())
        } else {
            AppError::ConnectionFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::FetchFailure(format!("JSON decode error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// Alias for convenience
pub type Error = AppError;
