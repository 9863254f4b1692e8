pub mod bar_store;
pub mod download;
pub mod quote;

pub use download::download_history;
pub use quote::{normalize_ticker, QuoteClient};
