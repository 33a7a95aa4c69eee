//! Projection of a candle history onto the price/volume chart series.
use chrono::NaiveDate;

use crate::quote::HistoryCandle;

/// Number of most recent candles shown on the chart.
pub const CHART_WINDOW: usize = 20;
/// Volume is plotted in thousands of shares.
pub const VOLUME_SCALE: f64 = 1000.0;

/// A single chart point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Trade date.
    pub date: NaiveDate,
    /// Closing price.
    pub price: f64,
    /// Volume in thousands.
    pub volume: f64,
}

/// Keeps the last [`CHART_WINDOW`] candles, oldest first, with scaled volume.
///
/// Pure: the same history always yields the same series.
pub fn project_series(history: &[HistoryCandle]) -> Vec<ChartPoint> {
    let start = history.len().saturating_sub(CHART_WINDOW);
    history[start..]
        .iter()
        .map(|candle| ChartPoint {
            date: candle.date,
            price: candle.close,
            volume: candle.volume / VOLUME_SCALE,
        })
        .collect()
}
