pub mod article;
pub mod cache;
pub mod config;
pub mod credibility;
pub mod dashboard;
pub mod feed;
pub mod models;
pub mod report;
pub mod sentiment;
pub mod templates;
pub mod trends;

pub use article::{Article, ArticleParser, FetchError, HtmlArticleParser, HttpFetcher, PageFetcher};
pub use cache::{Clock, ManualClock, Supplier, SystemClock, TtlCache};
pub use config::Config;
pub use credibility::{CredibilityAssessment, CredibilityLabel};
pub use dashboard::{Collaborators, Dashboard};
pub use feed::{FeedEntry, FeedReader, RssFeedReader};
pub use models::*;
pub use report::{is_valid_url, ArticleReport, Rejection};
pub use sentiment::{LexiconSentiment, Mood, SentimentAnalyzer};
pub use templates::{AnalysisTemplate, IndexTemplate, MarketsTemplate, NewsTemplate};
