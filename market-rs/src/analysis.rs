//! Price history with indicators, aligned for charting

use crate::indicators::calculate_rsi;
use crate::provider::{PriceProvider, ProviderError};
use serde::{Deserialize, Serialize};

/// Aligned chart columns; every vector has the same length
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorHistory {
    pub dates: Vec<String>,
    pub closes: Vec<f64>,
    pub volume: Vec<u64>,
    pub rsi: Vec<Option<f64>>,
}

impl IndicatorHistory {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Fetch `range` of `interval` bars for `ticker` and attach RSI(`rsi_period`).
///
/// An empty provider answer gives empty columns.
pub async fn history_with_indicators(
    provider: &dyn PriceProvider,
    ticker: &str,
    range: &str,
    interval: &str,
    rsi_period: usize,
) -> Result<IndicatorHistory, ProviderError> {
    let series = provider.history(ticker, range, interval).await?;
    if series.is_empty() {
        return Ok(IndicatorHistory::default());
    }

    let closes = series.closes();
    let rsi = calculate_rsi(&closes, rsi_period);

    Ok(IndicatorHistory {
        dates: series.dates(),
        closes,
        volume: series.volumes(),
        rsi,
    })
}
