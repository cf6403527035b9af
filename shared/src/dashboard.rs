//! The dashboard service: collaborators, caches and the page-level queries.
//!
//! Every cache sits behind its own async mutex held across the recompute, so
//! one request at a time refreshes a given cache. The trends supplier may
//! take the headlines lock while holding the trends lock; nothing takes them
//! the other way round.

use crate::article::{headline_blurb, ArticleParser, PageFetcher};
use crate::cache::{Clock, Supplier, SystemClock, TtlCache};
use crate::config::Config;
use crate::feed::{FeedEntry, FeedReader};
use crate::models::{Headline, TopicArticle};
use crate::report::{analyze_url, ArticleReport, Rejection};
use crate::sentiment::SentimentAnalyzer;
use crate::trends::{topics_from_titles, trending_keywords};
use anyhow::{Context, Result};
use async_trait::async_trait;
use market_rs::analysis::{history_with_indicators, IndicatorHistory};
use market_rs::provider::PriceProvider;
use market_rs::snapshot::{assemble_snapshot, default_instruments, Instrument, MarketSnapshot};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const BREAKING_NEWS_KEY: &str = "breaking_news";
pub const TRENDS_KEY: &str = "trends_top";
pub const MARKETS_KEY: &str = "market_snapshot";

/// Bar interval for the analysis chart
pub const ANALYSIS_INTERVAL: &str = "1d";

/// External services the dashboard talks to
#[derive(Clone)]
pub struct Collaborators {
    pub feeds: Arc<dyn FeedReader>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub parser: Arc<dyn ArticleParser>,
    pub sentiment: Arc<dyn SentimentAnalyzer>,
    pub prices: Arc<dyn PriceProvider>,
}

pub struct Dashboard {
    config: Config,
    services: Collaborators,
    instruments: Vec<Instrument>,
    headlines: Mutex<TtlCache<Vec<Headline>>>,
    trends: Mutex<TtlCache<Vec<String>>>,
    markets: Mutex<TtlCache<MarketSnapshot>>,
}

impl Dashboard {
    pub fn new(config: Config, services: Collaborators) -> Self {
        Self::with_clock(config, services, Arc::new(SystemClock))
    }

    /// Build with an explicit clock shared by all caches
    pub fn with_clock(config: Config, services: Collaborators, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            services,
            instruments: default_instruments(),
            headlines: Mutex::new(TtlCache::with_clock(clock.clone())),
            trends: Mutex::new(TtlCache::with_clock(clock.clone())),
            markets: Mutex::new(TtlCache::with_clock(clock)),
        }
    }

    /// Replace the tracked instruments
    pub fn with_instruments(mut self, instruments: Vec<Instrument>) -> Self {
        self.instruments = instruments;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Enriched top stories, cached for the breaking-news TTL
    pub async fn breaking_news(&self) -> Result<Vec<Headline>> {
        let mut cache = self.headlines.lock().await;
        cache
            .get_or_compute(
                BREAKING_NEWS_KEY,
                self.config.breaking_news_ttl(),
                &BreakingNews { dashboard: self },
            )
            .await
    }

    /// Trending topics, cached for the trends TTL
    pub async fn trends(&self) -> Result<Vec<String>> {
        let mut cache = self.trends.lock().await;
        cache
            .get_or_compute(TRENDS_KEY, self.config.trends_ttl(), &Trends { dashboard: self })
            .await
    }

    /// Snapshot of the tracked instruments, cached for the market TTL
    pub async fn market_snapshot(&self) -> Result<MarketSnapshot> {
        let mut cache = self.markets.lock().await;
        cache
            .get_or_compute(
                MARKETS_KEY,
                self.config.market_ttl(),
                &Markets { dashboard: self },
            )
            .await
    }

    /// Latest articles for a search topic; not cached
    pub async fn topic_news(&self, topic: &str) -> Result<Vec<TopicArticle>> {
        let url = self.config.topic_feed_url(topic);
        let entries = self
            .services
            .feeds
            .entries(&url)
            .await
            .with_context(|| format!("Failed to load news for topic '{}'", topic))?;

        Ok(entries
            .into_iter()
            .take(self.config.topic_news_limit)
            .map(|entry| TopicArticle {
                title: entry.title,
                link: entry.link,
                published: entry.published,
            })
            .collect())
    }

    /// Price history with RSI for one ticker
    pub async fn analysis(&self, ticker: &str) -> Result<IndicatorHistory> {
        let history = history_with_indicators(
            self.services.prices.as_ref(),
            ticker,
            &self.config.history_range,
            ANALYSIS_INTERVAL,
            self.config.rsi_period,
        )
        .await?;
        debug!("Loaded {} bars for {}", history.dates.len(), ticker);
        Ok(history)
    }

    /// Report for a user-submitted article URL
    pub async fn analyze(&self, url: &str) -> Result<ArticleReport, Rejection> {
        analyze_url(
            url,
            self.services.fetcher.as_ref(),
            self.services.parser.as_ref(),
            self.services.sentiment.as_ref(),
        )
        .await
    }

    /// Image and blurb for one feed entry; failures leave them empty.
    async fn enrich(&self, entry: FeedEntry) -> Headline {
        let mut image = entry.thumbnail;
        let mut summary = None;

        let article = match self.services.fetcher.fetch(&entry.link).await {
            Ok(html) => self
                .services
                .parser
                .parse(&entry.link, &html)
                .map_err(|e| warn!("Could not parse headline {}: {:#}", entry.link, e))
                .ok(),
            Err(e) => {
                warn!("Could not fetch headline {}: {}", entry.link, e);
                None
            }
        };

        if let Some(article) = article {
            if image.is_none() {
                image = article.top_image;
            }
            let blurb = headline_blurb(&article.summary);
            if !blurb.is_empty() {
                summary = Some(blurb);
            }
        }

        Headline {
            title: entry.title,
            link: entry.link,
            image,
            summary,
            published: entry.published,
        }
    }
}

struct BreakingNews<'a> {
    dashboard: &'a Dashboard,
}

#[async_trait]
impl<'a> Supplier<Vec<Headline>> for BreakingNews<'a> {
    async fn supply(&self) -> Result<Vec<Headline>> {
        let config = &self.dashboard.config;
        let entries = self
            .dashboard
            .services
            .feeds
            .entries(&config.news_feed_url)
            .await
            .context("Failed to load breaking news")?;

        let mut headlines = Vec::with_capacity(config.breaking_news_limit);
        for entry in entries.into_iter().take(config.breaking_news_limit) {
            headlines.push(self.dashboard.enrich(entry).await);
        }
        info!("Refreshed {} breaking headlines", headlines.len());
        Ok(headlines)
    }
}

struct Trends<'a> {
    dashboard: &'a Dashboard,
}

#[async_trait]
impl<'a> Supplier<Vec<String>> for Trends<'a> {
    async fn supply(&self) -> Result<Vec<String>> {
        let config = &self.dashboard.config;
        let limit = config.trends_limit;

        match self.dashboard.services.feeds.entries(&config.trends_feed_url).await {
            Ok(entries) => {
                let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
                let topics = topics_from_titles(&titles, limit);
                if !topics.is_empty() {
                    info!("Refreshed {} trending topics", topics.len());
                    return Ok(topics);
                }
                warn!("Trends feed was empty, falling back to headline keywords");
            }
            Err(e) => warn!("Trends feed failed, falling back to headline keywords: {:#}", e),
        }

        let headlines = self.dashboard.breaking_news().await?;
        let titles: Vec<&str> = headlines.iter().map(|h| h.title.as_str()).collect();
        Ok(trending_keywords(&titles, limit))
    }
}

struct Markets<'a> {
    dashboard: &'a Dashboard,
}

#[async_trait]
impl<'a> Supplier<MarketSnapshot> for Markets<'a> {
    async fn supply(&self) -> Result<MarketSnapshot> {
        Ok(assemble_snapshot(
            self.dashboard.services.prices.as_ref(),
            &self.dashboard.instruments,
        )
        .await)
    }
}
