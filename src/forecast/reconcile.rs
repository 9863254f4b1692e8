//! Window Reconciliation
//!
//! A prediction request names a lookback and a horizon, but the provider
//! may have returned fewer rows than the two need together. The window is
//! renegotiated against what is actually available before any model work.

use crate::constants::{MIN_HORIZON, MIN_LOOKBACK};
use crate::error::{AppError, Result};

/// The window actually used for a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    pub lookback: usize,
    pub horizon: usize,
}

/// Reconcile a requested window against the rows on hand.
///
/// - Enough rows for both: the request passes through unchanged.
/// - Fewer rows than `MIN_LOOKBACK + MIN_HORIZON`: the request fails.
/// - Enough rows for the full lookback plus a minimal horizon: the lookback
///   is kept and the horizon takes whatever remains.
/// - Otherwise the lookback shrinks to at most three quarters of the rows
///   (floored) and the horizon takes the rest. The shrunken lookback may
///   land below `MIN_LOOKBACK`; only the combined minimum is enforced.
pub fn reconcile_window(
    requested_lookback: usize,
    requested_horizon: usize,
    available: usize,
) -> Result<WindowPlan> {
    if available >= requested_lookback + requested_horizon {
        return Ok(WindowPlan {
            lookback: requested_lookback,
            horizon: requested_horizon,
        });
    }

    if available < MIN_LOOKBACK + MIN_HORIZON {
        return Err(AppError::InsufficientHistory {
            required: MIN_LOOKBACK + MIN_HORIZON,
            available,
        });
    }

    if available >= requested_lookback + MIN_HORIZON {
        return Ok(WindowPlan {
            lookback: requested_lookback,
            horizon: available - requested_lookback,
        });
    }

    let lookback = requested_lookback.min((available as f64 * 0.75).floor() as usize);
    Ok(WindowPlan {
        lookback,
        horizon: available - lookback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sufficient_rows_pass_through() {
        let plan = reconcile_window(400, 120, 600).unwrap();
        assert_eq!(plan, WindowPlan { lookback: 400, horizon: 120 });

        // Exact fit counts as sufficient
        let plan = reconcile_window(400, 120, 520).unwrap();
        assert_eq!(plan, WindowPlan { lookback: 400, horizon: 120 });
    }

    #[test]
    fn test_below_combined_minimum_fails() {
        let err = reconcile_window(400, 120, 50).unwrap_err();
        match err {
            AppError::InsufficientHistory { required, available } => {
                assert_eq!(required, 130);
                assert_eq!(available, 50);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // The minimum is absolute, not relative to the request
        assert!(reconcile_window(100, 30, 50).is_err());
        assert!(reconcile_window(400, 120, 129).is_err());
    }

    #[test]
    fn test_lookback_kept_horizon_shrinks() {
        let plan = reconcile_window(400, 120, 450).unwrap();
        assert_eq!(plan, WindowPlan { lookback: 400, horizon: 50 });

        // Boundary: exactly lookback + minimal horizon
        let plan = reconcile_window(400, 120, 430).unwrap();
        assert_eq!(plan, WindowPlan { lookback: 400, horizon: 30 });

        // Small requested lookback leaves plenty for the horizon
        let plan = reconcile_window(100, 120, 200).unwrap();
        assert_eq!(plan, WindowPlan { lookback: 100, horizon: 100 });
    }

    #[test]
    fn test_lookback_shrinks_to_three_quarters() {
        let plan = reconcile_window(400, 120, 150).unwrap();
        assert_eq!(plan, WindowPlan { lookback: 112, horizon: 38 });

        // At the minimum row count the lookback floors below 100
        let plan = reconcile_window(400, 120, 130).unwrap();
        assert_eq!(plan, WindowPlan { lookback: 97, horizon: 33 });
    }

    #[test]
    fn test_adjusted_windows_consume_all_rows() {
        for available in [130, 150, 300, 429, 450, 519] {
            let plan = reconcile_window(400, 120, available).unwrap();
            assert_eq!(plan.lookback + plan.horizon, available);
            assert!(plan.horizon >= MIN_HORIZON);
        }
    }
}
