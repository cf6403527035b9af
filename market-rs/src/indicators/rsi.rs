//! RSI (Relative Strength Index) indicator
//!
//! Average gain and loss are simple means over the last `period` close-to-close
//! moves rather than Wilder's exponential smoothing. A value is reported only
//! once a full window of `period` moves exists, so for a series of closes the
//! first `period` outputs are `None`.

use crate::indicators::Indicator;
use std::collections::VecDeque;

/// Look-back used by the dashboard charts
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// RSI indicator over a rolling window of gains and losses
#[derive(Debug, Clone)]
pub struct RSI {
    period: usize,
    prev_close: Option<f64>,
    /// (gain, loss) per close-to-close move, newest at the back
    window: VecDeque<(f64, f64)>,
    last_value: Option<f64>,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prev_close: None,
            window: VecDeque::with_capacity(period + 1),
            last_value: None,
        }
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for RSI {
    fn default() -> Self {
        Self::new(DEFAULT_RSI_PERIOD)
    }
}

impl Indicator for RSI {
    fn name(&self) -> &str {
        "RSI"
    }

    fn update(&mut self, value: f64) {
        if let Some(prev) = self.prev_close {
            let delta = value - prev;
            self.window.push_back((delta.max(0.0), (-delta).max(0.0)));
            if self.window.len() > self.period {
                self.window.pop_front();
            }
        }
        self.prev_close = Some(value);

        if self.is_ready() {
            // Sums are recomputed per step so a loss-free window is exactly zero.
            let (gains, losses) = self
                .window
                .iter()
                .fold((0.0, 0.0), |(g, l), (gain, loss)| (g + gain, l + loss));
            let period = self.period as f64;
            self.last_value = Some(rsi_from_averages(gains / period, losses / period));
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        // needs period+1 closes
        self.period > 0 && self.window.len() == self.period
    }
}

/// RSI for one window given its average gain and average loss.
///
/// With no losses RS is pinned to 0 instead of dividing. A window that still
/// had gains is pure upward momentum and reads 100.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 0.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Calculate RSI from a series of values
///
/// The output always has the same length as `values`.
pub fn calculate_rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut rsi = RSI::new(period);
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        rsi.update(value);
        results.push(rsi.value());
    }

    results
}
