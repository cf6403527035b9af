use dotenv::dotenv;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub news_feed_url: String,
    pub news_search_url: String,
    pub trends_feed_url: String,
    pub request_timeout_secs: u64,
    pub breaking_news_limit: usize,
    pub topic_news_limit: usize,
    pub trends_limit: usize,
    pub breaking_news_ttl_secs: u64,
    pub trends_ttl_secs: u64,
    pub market_ttl_secs: u64,
    pub history_range: String,
    pub rsi_period: usize,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();
        let defaults = Config::default();

        Ok(Config {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            news_feed_url: std::env::var("NEWS_FEED_URL").unwrap_or(defaults.news_feed_url),
            news_search_url: std::env::var("NEWS_SEARCH_URL").unwrap_or(defaults.news_search_url),
            trends_feed_url: std::env::var("TRENDS_FEED_URL").unwrap_or(defaults.trends_feed_url),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            breaking_news_limit: env_or("BREAKING_NEWS_LIMIT", defaults.breaking_news_limit),
            topic_news_limit: env_or("TOPIC_NEWS_LIMIT", defaults.topic_news_limit),
            trends_limit: env_or("TRENDS_LIMIT", defaults.trends_limit),
            breaking_news_ttl_secs: env_or("BREAKING_NEWS_TTL_SECS", defaults.breaking_news_ttl_secs),
            trends_ttl_secs: env_or("TRENDS_TTL_SECS", defaults.trends_ttl_secs),
            market_ttl_secs: env_or("MARKET_TTL_SECS", defaults.market_ttl_secs),
            history_range: std::env::var("HISTORY_RANGE").unwrap_or(defaults.history_range),
            rsi_period: env_or("RSI_PERIOD", defaults.rsi_period),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn breaking_news_ttl(&self) -> Duration {
        Duration::from_secs(self.breaking_news_ttl_secs)
    }

    pub fn trends_ttl(&self) -> Duration {
        Duration::from_secs(self.trends_ttl_secs)
    }

    pub fn market_ttl(&self) -> Duration {
        Duration::from_secs(self.market_ttl_secs)
    }

    /// Search feed URL for a topic; the topic is URL-encoded into `{query}`.
    pub fn topic_feed_url(&self, topic: &str) -> String {
        self.news_search_url
            .replace("{query}", &urlencoding::encode(topic))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0:9999".to_string(),
            news_feed_url: "https://news.google.com/rss?hl=en-IN&gl=IN&ceid=IN:en".to_string(),
            news_search_url: "https://news.google.com/rss/search?q={query}&hl=en-IN&gl=IN&ceid=IN:en"
                .to_string(),
            trends_feed_url: "https://trends.google.com/trending/rss?geo=IN".to_string(),
            request_timeout_secs: 15,
            breaking_news_limit: 12,
            topic_news_limit: 20,
            trends_limit: 10,
            breaking_news_ttl_secs: 300,
            trends_ttl_secs: 1800,
            market_ttl_secs: 600,
            history_range: "6mo".to_string(),
            rsi_period: 14,
        }
    }
}
