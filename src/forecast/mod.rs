//! Forecasting Core
//!
//! Pure window/schedule arithmetic plus the predictor seam. A request's
//! lookback and horizon are first reconciled against the rows on hand and
//! future timestamps laid out on a business-day calendar; a loaded model
//! behind the `Predictor` trait then fills in the rows.

pub mod reconcile;
pub mod registry;
pub mod sampler;
pub mod schedule;

pub use reconcile::{reconcile_window, WindowPlan};
pub use registry::{spec_for, LoadedModelInfo, ModelRegistry, ModelSpec, MODEL_CATALOG};
pub use sampler::PathSampler;
pub use schedule::{future_timestamps, median_gap};

use chrono::{DateTime, Utc};

use crate::constants::{SAMPLE_COUNT_DEFAULT, TEMPERATURE_DEFAULT, TOP_P_DEFAULT};
use crate::error::Result;
use crate::models::Bar;

/// Sampling knobs forwarded to the predictor
#[derive(Debug, Clone, Copy)]
pub struct SampleParams {
    pub temperature: f64,
    pub top_p: f64,
    pub sample_count: usize,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE_DEFAULT,
            top_p: TOP_P_DEFAULT,
            sample_count: SAMPLE_COUNT_DEFAULT,
        }
    }
}

/// One forecast row. Volume and traded value stay unset for backends that
/// model prices only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
    pub amount: Option<f64>,
}

/// A loaded forecasting backend
pub trait Predictor: Send + Sync + std::fmt::Debug {
    /// Produce one predicted row per future timestamp
    fn predict(
        &self,
        context: &[Bar],
        future: &[DateTime<Utc>],
        params: &SampleParams,
    ) -> Result<Vec<PredictedBar>>;
}
