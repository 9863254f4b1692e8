use std::collections::BTreeMap;

use axum::extract::{Json, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::constants::{
    DEFAULT_MODEL_KEY, HORIZON_DEFAULT, HORIZON_MAX, LOOKBACK_DEFAULT, LOOKBACK_MAX, MIN_HORIZON,
    MIN_LOOKBACK, SAMPLE_COUNT_DEFAULT, SAMPLE_COUNT_MAX, SAMPLE_COUNT_MIN, TEMPERATURE_DEFAULT,
    TEMPERATURE_MAX, TEMPERATURE_MIN, TOP_P_DEFAULT, TOP_P_MAX, TOP_P_MIN,
};
use crate::forecast::{
    future_timestamps, reconcile_window, spec_for, PredictedBar, SampleParams, MODEL_CATALOG,
};
use crate::models::Bar;
use crate::server::{chart, AppState};
use crate::services::normalize_ticker;
use crate::utils::format_timestamp;

/// Request body for /forecast/predict
#[derive(Debug, Deserialize, Clone)]
pub struct PredictRequest {
    /// Ticker symbol, optionally exchange-prefixed ("NASDAQ:AAPL")
    pub ticker: String,

    /// Context rows fed to the model
    #[serde(default = "default_lookback")]
    pub lookback: usize,

    /// Forecast rows requested
    #[serde(default = "default_pred_len")]
    pub pred_len: usize,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus mass kept when sampling
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Independent sample paths averaged into the forecast
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Catalog key; unknown keys fall back to the default model
    #[serde(default = "default_model_key")]
    pub model_key: String,
}

/// Request body for /forecast/load-model
#[derive(Debug, Deserialize, Clone)]
pub struct LoadModelRequest {
    #[serde(default = "default_model_key")]
    pub model_key: String,

    #[serde(default = "default_device")]
    pub device: String,
}

fn default_lookback() -> usize {
    LOOKBACK_DEFAULT
}

fn default_pred_len() -> usize {
    HORIZON_DEFAULT
}

fn default_temperature() -> f64 {
    TEMPERATURE_DEFAULT
}

fn default_top_p() -> f64 {
    TOP_P_DEFAULT
}

fn default_sample_count() -> usize {
    SAMPLE_COUNT_DEFAULT
}

fn default_model_key() -> String {
    DEFAULT_MODEL_KEY.to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

impl PredictRequest {
    /// Bounds check; anything out of range is rejected before any work
    pub fn validate(&self) -> Result<(), String> {
        if self.ticker.trim().is_empty() {
            return Err("ticker must not be empty".to_string());
        }
        if !(MIN_LOOKBACK..=LOOKBACK_MAX).contains(&self.lookback) {
            return Err(format!(
                "lookback must be between {} and {}",
                MIN_LOOKBACK, LOOKBACK_MAX
            ));
        }
        if !(MIN_HORIZON..=HORIZON_MAX).contains(&self.pred_len) {
            return Err(format!(
                "pred_len must be between {} and {}",
                MIN_HORIZON, HORIZON_MAX
            ));
        }
        if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between {} and {}",
                TEMPERATURE_MIN, TEMPERATURE_MAX
            ));
        }
        if !(TOP_P_MIN..=TOP_P_MAX).contains(&self.top_p) {
            return Err(format!(
                "top_p must be between {} and {}",
                TOP_P_MIN, TOP_P_MAX
            ));
        }
        if !(SAMPLE_COUNT_MIN..=SAMPLE_COUNT_MAX).contains(&self.sample_count) {
            return Err(format!(
                "sample_count must be between {} and {}",
                SAMPLE_COUNT_MIN, SAMPLE_COUNT_MAX
            ));
        }
        Ok(())
    }
}

/// One forecast row as served to clients
#[derive(Debug, Clone, Serialize)]
pub struct ForecastPoint {
    /// ISO timestamp of the predicted bar
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub amount: f64,
}

/// Bounds of the context window and the forecast window
#[derive(Debug, Clone, Serialize)]
pub struct TimeRange {
    pub input_start: String,
    pub input_end: String,
    pub pred_start: String,
    pub pred_end: String,
}

/// Envelope for /forecast/predict. Failures keep HTTP 200 and flip
/// `success`; `message` carries the reason.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<ForecastPoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<Value>,

    /// Reserved for backtest comparisons; always empty here
    pub actual_data: Vec<ForecastPoint>,
    pub has_comparison: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_type: Option<String>,
}

impl PredictionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Vec::new(),
            time_range: None,
            chart: None,
            actual_data: Vec::new(),
            has_comparison: false,
            prediction_type: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentModel {
    pub name: String,
    pub device: String,
    pub model_key: String,
}

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub available: bool,
    pub loaded: bool,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_model: Option<CurrentModel>,
}

#[derive(Debug, Serialize)]
pub struct ModelCatalogEntry {
    pub name: String,
    pub context_length: usize,
    pub params: String,
    pub description: String,
    pub model_id: String,
    pub tokenizer_id: String,
}

#[derive(Debug, Serialize)]
pub struct AvailableModelsResponse {
    pub models: BTreeMap<String, ModelCatalogEntry>,
    pub default_model: String,
    pub model_available: bool,
}

/// Result envelope for /forecast/load-model
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

/// GET /health - liveness probe
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let loaded = state.registry.current().await.is_some();
    Json(serde_json::json!({
        "status": "ok",
        "model_available": state.registry.backend_available(),
        "model_loaded": loaded,
    }))
}

/// GET /forecast/model-status - backend availability and the loaded model
pub async fn model_status_handler(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    let available = state.registry.backend_available();

    let response = match state.registry.current().await {
        Some(current) => ModelStatusResponse {
            available,
            loaded: true,
            message: format!("Model loaded: {}", current.name),
            current_model: Some(CurrentModel {
                name: current.name,
                device: current.device,
                model_key: current.key,
            }),
        },
        None => ModelStatusResponse {
            available,
            loaded: false,
            message: if available {
                "No model loaded".to_string()
            } else {
                "Model backend not available".to_string()
            },
            current_model: None,
        },
    };

    Json(response)
}

/// GET /forecast/available-models - the pretrained catalog
pub async fn available_models_handler(State(state): State<AppState>) -> Json<AvailableModelsResponse> {
    let models = MODEL_CATALOG
        .iter()
        .map(|spec| {
            (
                spec.key.to_string(),
                ModelCatalogEntry {
                    name: spec.name.to_string(),
                    context_length: spec.context_length,
                    params: spec.params.to_string(),
                    description: spec.description.to_string(),
                    model_id: state.registry.model_dir(spec.key).display().to_string(),
                    tokenizer_id: state.registry.tokenizer_dir(spec.key).display().to_string(),
                },
            )
        })
        .collect();

    Json(AvailableModelsResponse {
        models,
        default_model: DEFAULT_MODEL_KEY.to_string(),
        model_available: state.registry.backend_available(),
    })
}

/// POST /forecast/load-model - load or switch the active configuration
#[instrument(skip(state))]
pub async fn load_model_handler(
    State(state): State<AppState>,
    Json(request): Json<LoadModelRequest>,
) -> Json<ApiMessage> {
    let Some(spec) = spec_for(&request.model_key) else {
        return Json(ApiMessage {
            success: false,
            message: format!("Unsupported model: {}", request.model_key),
        });
    };

    match state.registry.load(spec.key, &request.device).await {
        Ok(_) => Json(ApiMessage {
            success: true,
            message: format!(
                "Model loaded: {} ({}) on {}",
                spec.name, spec.params, request.device
            ),
        }),
        Err(e) => {
            error!("model load failed: {}", e);
            Json(ApiMessage {
                success: false,
                message: e.to_string(),
            })
        }
    }
}

/// POST /forecast/predict - run a forecast for one ticker
///
/// Pipeline: validate, ensure a model is loaded (switching when the
/// request names a different one), pull about two years of daily bars,
/// reconcile the window against what came back, lay out future business
/// days and let the predictor fill them in.
#[instrument(skip(state), fields(ticker = %request.ticker))]
pub async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Json<PredictionResponse> {
    if let Err(message) = request.validate() {
        return Json(PredictionResponse::failure(format!(
            "Invalid request: {}",
            message
        )));
    }

    if !state.registry.backend_available() {
        return Json(PredictionResponse::failure(
            "Model backend not available. Place pretrained artifacts under the model root.",
        ));
    }

    let model_key = if spec_for(&request.model_key).is_some() {
        request.model_key.clone()
    } else {
        warn!(requested = %request.model_key, "unknown model key, using default");
        DEFAULT_MODEL_KEY.to_string()
    };

    let predictor = match state.registry.ensure_loaded(&model_key, "cpu").await {
        Ok(p) => p,
        Err(e) => return Json(PredictionResponse::failure(e.to_string())),
    };

    let ticker = normalize_ticker(&request.ticker).to_string();

    let bars = match state.quotes.daily_history(&ticker).await {
        Ok(bars) => bars,
        Err(e) => {
            warn!(%ticker, "history fetch failed: {}", e);
            return Json(PredictionResponse::failure(e.to_string()));
        }
    };

    if bars.is_empty() {
        return Json(PredictionResponse::failure(format!(
            "No data available for ticker: {}",
            ticker
        )));
    }

    let plan = match reconcile_window(request.lookback, request.pred_len, bars.len()) {
        Ok(plan) => plan,
        Err(e) => return Json(PredictionResponse::failure(e.to_string())),
    };

    if plan.lookback != request.lookback || plan.horizon != request.pred_len {
        info!(
            requested_lookback = request.lookback,
            requested_horizon = request.pred_len,
            lookback = plan.lookback,
            horizon = plan.horizon,
            available = bars.len(),
            "window reconciled"
        );
    }

    let context = &bars[bars.len() - plan.lookback..];
    let context_times: Vec<DateTime<Utc>> = context.iter().map(|b| b.time).collect();
    let future = future_timestamps(&context_times, plan.horizon);

    let params = SampleParams {
        temperature: request.temperature,
        top_p: request.top_p,
        sample_count: request.sample_count,
    };

    let predicted = match predictor.predict(context, &future, &params) {
        Ok(rows) => rows,
        Err(e) => {
            error!(%ticker, "prediction failed: {}", e);
            return Json(PredictionResponse::failure(e.to_string()));
        }
    };

    Json(assemble_response(&ticker, context, &future, &predicted))
}

/// Pair predicted rows with their timestamps and build the envelope
fn assemble_response(
    ticker: &str,
    context: &[Bar],
    future: &[DateTime<Utc>],
    predicted: &[PredictedBar],
) -> PredictionResponse {
    let data: Vec<ForecastPoint> = future
        .iter()
        .zip(predicted.iter())
        .map(|(time, row)| ForecastPoint {
            timestamp: time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume.unwrap_or(0.0),
            amount: row.amount.unwrap_or(0.0),
        })
        .collect();

    let time_range = match (context.first(), context.last(), future.first(), future.last()) {
        (Some(input_start), Some(input_end), Some(pred_start), Some(pred_end)) => Some(TimeRange {
            input_start: format_timestamp(&input_start.time),
            input_end: format_timestamp(&input_end.time),
            pred_start: format_timestamp(pred_start),
            pred_end: format_timestamp(pred_end),
        }),
        _ => None,
    };

    let chart = chart::prediction_chart(ticker, context, future, predicted);

    PredictionResponse {
        success: true,
        message: format!("Prediction completed with {} points", data.len()),
        data,
        time_range,
        chart,
        actual_data: Vec::new(),
        has_comparison: false,
        prediction_type: Some(format!("Price forecast for {}", ticker)),
    }
}
