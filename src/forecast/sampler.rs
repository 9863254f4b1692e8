//! Bundled Sampling Backend
//!
//! The default `Predictor`: an empirical bootstrap walker. Each step
//! resamples the context's close-to-close log returns with the nucleus
//! (top-p) and temperature controls applied, walking sample paths forward
//! from the last close. Paths are averaged elementwise into the returned
//! rows. A fixed seed derived from the context keeps repeated requests
//! reproducible.

use std::path::Path;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::forecast::{PredictedBar, Predictor, SampleParams};
use crate::models::Bar;

const SUPPORTED_DEVICES: &[&str] = &["cpu", "cuda"];

#[derive(Debug)]
pub struct PathSampler {
    max_context: usize,
}

impl PathSampler {
    /// Validate the artifact layout and devices before standing up.
    ///
    /// `max_context` comes from the catalog entry; longer contexts are
    /// truncated at predict time.
    pub fn load(
        model_dir: &Path,
        tokenizer_dir: &Path,
        device: &str,
        max_context: usize,
    ) -> Result<Self> {
        if !SUPPORTED_DEVICES.contains(&device) {
            return Err(AppError::ModelLoadFailure(format!(
                "unsupported device: {}",
                device
            )));
        }
        if !model_dir.is_dir() {
            return Err(AppError::ModelLoadFailure(format!(
                "model artifacts not found: {}",
                model_dir.display()
            )));
        }
        if !tokenizer_dir.is_dir() {
            return Err(AppError::ModelLoadFailure(format!(
                "tokenizer artifacts not found: {}",
                tokenizer_dir.display()
            )));
        }

        debug!(model = %model_dir.display(), device, max_context, "sampler ready");
        Ok(Self { max_context })
    }
}

impl Predictor for PathSampler {
    fn predict(
        &self,
        context: &[Bar],
        future: &[DateTime<Utc>],
        params: &SampleParams,
    ) -> Result<Vec<PredictedBar>> {
        let horizon = future.len();
        if horizon == 0 {
            return Ok(Vec::new());
        }

        let context = if context.len() > self.max_context {
            &context[context.len() - self.max_context..]
        } else {
            context
        };

        if context.len() < 2 {
            return Err(AppError::PredictionFailure(
                "context too short to sample returns".to_string(),
            ));
        }

        let returns = log_returns(context);
        let pool = nucleus_pool(&returns, params.top_p);
        if pool.is_empty() {
            return Err(AppError::PredictionFailure(
                "no usable returns in context".to_string(),
            ));
        }

        let mean = pool.iter().sum::<f64>() / pool.len() as f64;
        let volumes: Vec<f64> = context.iter().map(|b| b.volume as f64).collect();
        let last_close = context[context.len() - 1].close;
        let seed = seed_from(context, horizon);

        let paths = params.sample_count.max(1);
        let mut open_sum = vec![0.0; horizon];
        let mut high_sum = vec![0.0; horizon];
        let mut low_sum = vec![0.0; horizon];
        let mut close_sum = vec![0.0; horizon];
        let mut volume_sum = vec![0.0; horizon];

        for path in 0..paths {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(path as u64));
            let mut prev_close = last_close;

            for i in 0..horizon {
                let draw = pool[rng.gen_range(0..pool.len())];
                let step = mean + (draw - mean) * params.temperature;

                let open = prev_close;
                let close = open * step.exp();
                let wick = pool[rng.gen_range(0..pool.len())].abs() * 0.5;
                let high = open.max(close) * (1.0 + wick);
                let low = (open.min(close) * (1.0 - wick)).max(0.0);
                let volume = volumes[rng.gen_range(0..volumes.len())];

                open_sum[i] += open;
                high_sum[i] += high;
                low_sum[i] += low;
                close_sum[i] += close;
                volume_sum[i] += volume;

                prev_close = close;
            }
        }

        let n = paths as f64;
        let rows = (0..horizon)
            .map(|i| {
                let open = open_sum[i] / n;
                let close = close_sum[i] / n;
                let volume = volume_sum[i] / n;
                PredictedBar {
                    open,
                    high: high_sum[i] / n,
                    low: low_sum[i] / n,
                    close,
                    volume: Some(volume),
                    amount: Some(volume * (open + close) / 2.0),
                }
            })
            .collect();

        Ok(rows)
    }
}

fn log_returns(bars: &[Bar]) -> Vec<f64> {
    bars.windows(2)
        .filter_map(|w| {
            if w[0].close > 0.0 && w[1].close > 0.0 {
                Some((w[1].close / w[0].close).ln())
            } else {
                None
            }
        })
        .collect()
}

/// Central `top_p` quantile mass of the sorted return pool. A tiny pool
/// collapses to its middle element rather than emptying out.
fn nucleus_pool(returns: &[f64], top_p: f64) -> Vec<f64> {
    let mut sorted = returns.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n == 0 {
        return sorted;
    }

    let cut = (((1.0 - top_p.clamp(0.0, 1.0)) / 2.0) * n as f64).floor() as usize;
    if cut * 2 >= n {
        return vec![sorted[n / 2]];
    }
    sorted[cut..n - cut].to_vec()
}

fn seed_from(context: &[Bar], horizon: usize) -> u64 {
    let mut seed = context.last().map(|b| b.close.to_bits()).unwrap_or(0);
    seed ^= (context.len() as u64).rotate_left(17);
    seed ^= (horizon as u64).rotate_left(33);
    seed
}
