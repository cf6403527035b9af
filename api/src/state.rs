use anyhow::Context;
use market_rs::provider::YahooProvider;
use shared::{
    Collaborators, Config, Dashboard, HtmlArticleParser, HttpFetcher, LexiconSentiment, RssFeedReader,
};
use std::sync::Arc;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    /// Wire the dashboard to the live feed, page and price services
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let timeout = config.request_timeout();
        let services = Collaborators {
            feeds: Arc::new(RssFeedReader::new(timeout)?),
            fetcher: Arc::new(HttpFetcher::new(timeout).context("Failed to create page fetcher")?),
            parser: Arc::new(HtmlArticleParser),
            sentiment: Arc::new(LexiconSentiment),
            prices: Arc::new(YahooProvider::new().context("Failed to create Yahoo provider")?),
        };

        Ok(Self::from_dashboard(Dashboard::new(config, services)))
    }

    pub fn from_dashboard(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}
