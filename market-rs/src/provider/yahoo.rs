//! Yahoo Finance price provider

use crate::data::{PricePoint, PriceSeries};
use crate::provider::{PriceProvider, ProviderError};
use async_trait::async_trait;
use chrono::DateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

const PROVIDER_ID: &str = "YAHOO";

/// Daily history from the Yahoo chart API
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a provider with a fresh connector
    pub fn new() -> Result<Self, ProviderError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| ProviderError::Request {
            provider: PROVIDER_ID,
            ticker: String::new(),
            message: e.to_string(),
        })?;
        Ok(Self { connector })
    }

    fn to_point(ticker: &str, quote: &yahoo::Quote) -> Result<PricePoint, ProviderError> {
        let date = DateTime::from_timestamp(quote.timestamp as i64, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| ProviderError::InvalidData {
                provider: PROVIDER_ID,
                ticker: ticker.to_string(),
                message: format!("invalid timestamp {}", quote.timestamp),
            })?;

        if !quote.close.is_finite() {
            return Err(ProviderError::InvalidData {
                provider: PROVIDER_ID,
                ticker: ticker.to_string(),
                message: format!("non-finite close on {}", date),
            });
        }

        Ok(PricePoint::new(date, quote.close, quote.volume as u64))
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn history(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<PriceSeries, ProviderError> {
        debug!("Fetching {} history for {} ({})", range, ticker, interval);

        let response = match self.connector.get_quote_range(ticker, interval, range).await {
            Ok(response) => response,
            Err(yahoo::YahooError::NoQuotes) | Err(yahoo::YahooError::NoResult) => {
                warn!("No quotes returned for '{}'", ticker);
                return Ok(PriceSeries::new());
            }
            Err(e) => {
                return Err(ProviderError::Request {
                    provider: PROVIDER_ID,
                    ticker: ticker.to_string(),
                    message: e.to_string(),
                })
            }
        };

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo::YahooError::NoQuotes) | Err(yahoo::YahooError::NoResult) => {
                return Ok(PriceSeries::new())
            }
            Err(e) => {
                return Err(ProviderError::InvalidData {
                    provider: PROVIDER_ID,
                    ticker: ticker.to_string(),
                    message: e.to_string(),
                })
            }
        };

        // Yahoo pads some ranges with empty bars; skip those instead of failing the ticker.
        let points = quotes
            .iter()
            .filter_map(|q| match Self::to_point(ticker, q) {
                Ok(point) => Some(point),
                Err(e) => {
                    warn!("Skipping quote: {}", e);
                    None
                }
            })
            .collect();

        Ok(PriceSeries::from_points(points))
    }
}
