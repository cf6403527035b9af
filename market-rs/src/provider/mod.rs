//! Price data providers
//!
//! A provider turns a ticker plus a range/interval into a daily [`PriceSeries`].
//! An empty series means the source had nothing for that ticker.

pub mod yahoo;

pub use yahoo::*;

use crate::data::PriceSeries;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a price provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Upstream could not be reached or rejected the request
    #[error("{provider} request for {ticker} failed: {message}")]
    Request {
        provider: &'static str,
        ticker: String,
        message: String,
    },

    /// Upstream answered with data we cannot use
    #[error("{provider} returned invalid data for {ticker}: {message}")]
    InvalidData {
        provider: &'static str,
        ticker: String,
        message: String,
    },
}

/// Source of historical daily prices
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Provider identifier used in logs
    fn id(&self) -> &'static str;

    /// Fetch price history for `ticker`.
    ///
    /// `range` and `interval` use the usual chart notation (`"1mo"`, `"6mo"`, `"1d"`).
    async fn history(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<PriceSeries, ProviderError>;
}
