use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::forecast::PredictedBar;
use crate::models::Bar;
use crate::utils::format_date;

/// Build a Plotly figure with two candlestick traces, the context window
/// and the forecast. Returns None when either side is empty.
pub fn prediction_chart(
    ticker: &str,
    history: &[Bar],
    future: &[DateTime<Utc>],
    predicted: &[PredictedBar],
) -> Option<Value> {
    if history.is_empty() || predicted.is_empty() {
        return None;
    }

    let hist_x: Vec<String> = history.iter().map(|bar| format_date(&bar.time)).collect();
    let pred_x: Vec<String> = future
        .iter()
        .take(predicted.len())
        .map(format_date)
        .collect();

    let historical_trace = json!({
        "type": "candlestick",
        "name": "Historical",
        "x": hist_x,
        "open": history.iter().map(|b| b.open).collect::<Vec<f64>>(),
        "high": history.iter().map(|b| b.high).collect::<Vec<f64>>(),
        "low": history.iter().map(|b| b.low).collect::<Vec<f64>>(),
        "close": history.iter().map(|b| b.close).collect::<Vec<f64>>(),
        "increasing": {"line": {"color": "#26A69A"}},
        "decreasing": {"line": {"color": "#EF5350"}},
    });

    let prediction_trace = json!({
        "type": "candlestick",
        "name": "Prediction",
        "x": pred_x,
        "open": predicted.iter().map(|p| p.open).collect::<Vec<f64>>(),
        "high": predicted.iter().map(|p| p.high).collect::<Vec<f64>>(),
        "low": predicted.iter().map(|p| p.low).collect::<Vec<f64>>(),
        "close": predicted.iter().map(|p| p.close).collect::<Vec<f64>>(),
        "increasing": {"line": {"color": "#66BB6A"}},
        "decreasing": {"line": {"color": "#FF7043"}},
    });

    let layout = json!({
        "title": format!("{} Price Forecast", ticker),
        "xaxis": {"title": "Time", "rangeslider": {"visible": false}},
        "yaxis": {"title": "Price"},
        "height": 420,
        "showlegend": true,
    });

    Some(json!({
        "data": [historical_trace, prediction_trace],
        "layout": layout,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_bars(count: usize) -> Vec<Bar> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..count)
            .map(|i| {
                Bar::new(
                    t0 + chrono::Duration::days(i as i64),
                    100.0 + i as f64,
                    101.0 + i as f64,
                    99.0 + i as f64,
                    100.5 + i as f64,
                    1_000,
                )
            })
            .collect()
    }

    fn sample_predictions(count: usize) -> (Vec<DateTime<Utc>>, Vec<PredictedBar>) {
        let t0 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let future = (0..count)
            .map(|i| t0 + chrono::Duration::days(i as i64))
            .collect();
        let predicted = (0..count)
            .map(|i| PredictedBar {
                open: 110.0 + i as f64,
                high: 112.0 + i as f64,
                low: 109.0 + i as f64,
                close: 111.0 + i as f64,
                volume: Some(1_000.0),
                amount: Some(110_500.0),
            })
            .collect();
        (future, predicted)
    }

    #[test]
    fn test_chart_has_two_traces() {
        let history = sample_bars(5);
        let (future, predicted) = sample_predictions(3);

        let chart = prediction_chart("AAPL", &history, &future, &predicted).unwrap();

        let traces = chart["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["name"], "Historical");
        assert_eq!(traces[1]["name"], "Prediction");
        assert_eq!(traces[0]["type"], "candlestick");
        assert_eq!(traces[1]["type"], "candlestick");
    }

    #[test]
    fn test_chart_axis_lengths_match() {
        let history = sample_bars(5);
        let (future, predicted) = sample_predictions(3);

        let chart = prediction_chart("AAPL", &history, &future, &predicted).unwrap();

        assert_eq!(chart["data"][0]["x"].as_array().unwrap().len(), 5);
        assert_eq!(chart["data"][0]["open"].as_array().unwrap().len(), 5);
        assert_eq!(chart["data"][1]["x"].as_array().unwrap().len(), 3);
        assert_eq!(chart["data"][1]["close"].as_array().unwrap().len(), 3);
        assert_eq!(chart["data"][0]["x"][0], "2024-01-01");
        assert_eq!(chart["data"][1]["x"][0], "2024-02-01");
    }

    #[test]
    fn test_chart_colors_and_layout() {
        let history = sample_bars(2);
        let (future, predicted) = sample_predictions(2);

        let chart = prediction_chart("MSFT", &history, &future, &predicted).unwrap();

        assert_eq!(chart["data"][0]["increasing"]["line"]["color"], "#26A69A");
        assert_eq!(chart["data"][0]["decreasing"]["line"]["color"], "#EF5350");
        assert_eq!(chart["data"][1]["increasing"]["line"]["color"], "#66BB6A");
        assert_eq!(chart["data"][1]["decreasing"]["line"]["color"], "#FF7043");

        assert_eq!(chart["layout"]["title"], "MSFT Price Forecast");
        assert_eq!(chart["layout"]["height"], 420);
        assert_eq!(chart["layout"]["showlegend"], true);
        assert_eq!(chart["layout"]["xaxis"]["rangeslider"]["visible"], false);
    }

    #[test]
    fn test_chart_empty_inputs_yield_none() {
        let history = sample_bars(5);
        let (future, predicted) = sample_predictions(3);

        assert!(prediction_chart("AAPL", &[], &future, &predicted).is_none());
        assert!(prediction_chart("AAPL", &history, &future, &[]).is_none());
    }
}
