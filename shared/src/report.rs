//! Analysis of a user-submitted article URL.

use crate::article::{lead_summary, ArticleParser, PageFetcher};
use crate::credibility::{self, website_name, CredibilityAssessment};
use crate::sentiment::{Mood, SentimentAnalyzer};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use url::{Host, Url};

/// Sentences shown in the report summary
pub const REPORT_SUMMARY_SENTENCES: usize = 5;

/// Why a submitted URL was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Please enter a valid URL.")]
    InvalidUrl,

    #[error("Failed to download the content of the URL.")]
    DownloadFailed,

    #[error("Sorry, that link did not produce a readable article. Try another URL.")]
    Unreadable,
}

impl Rejection {
    /// Stable code carried in the redirect
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::InvalidUrl => "invalid_url",
            Rejection::DownloadFailed => "download_failed",
            Rejection::Unreadable => "unreadable",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "invalid_url" => Some(Rejection::InvalidUrl),
            "download_failed" => Some(Rejection::DownloadFailed),
            "unreadable" => Some(Rejection::Unreadable),
            _ => None,
        }
    }
}

/// Absolute http(s) URL whose host is an IP address, `localhost`, or a
/// dotted domain ending in an alphabetic TLD.
pub fn is_valid_url(input: &str) -> bool {
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return false;
    }
    let Ok(url) = Url::parse(input) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => {
            if domain == "localhost" {
                return true;
            }
            let labels: Vec<&str> = domain.split('.').collect();
            let tld = labels.last().copied().unwrap_or_default();
            labels.len() >= 2
                && labels.iter().all(|l| !l.is_empty())
                && tld.len() >= 2
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Everything shown for an analyzed article
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleReport {
    pub url: String,
    pub title: String,
    /// Authors joined with ", ", or the site host when none were found
    pub authors: String,
    /// "%B %d, %Y" or "N/A"
    pub publish_date: String,
    pub summary: String,
    pub top_image: Option<String>,
    pub sentiment: Mood,
    pub credibility: CredibilityAssessment,
}

/// Validate, pre-flight, parse and score an article URL.
pub async fn analyze_url(
    raw_url: &str,
    fetcher: &dyn PageFetcher,
    parser: &dyn ArticleParser,
    sentiment: &dyn SentimentAnalyzer,
) -> Result<ArticleReport, Rejection> {
    let url = raw_url.trim();
    if !is_valid_url(url) {
        return Err(Rejection::InvalidUrl);
    }

    let html = fetcher.fetch(url).await.map_err(|e| {
        warn!("Pre-flight fetch failed: {}", e);
        Rejection::DownloadFailed
    })?;

    let article = parser.parse(url, &html).map_err(|e| {
        warn!("Could not parse article at {}: {:#}", url, e);
        Rejection::Unreadable
    })?;

    let summary = lead_summary(&article.text, REPORT_SUMMARY_SENTENCES);
    if summary.is_empty() {
        return Err(Rejection::Unreadable);
    }

    let authors = if article.authors.is_empty() {
        website_name(url)
    } else {
        article.authors.join(", ")
    };
    let publish_date = article
        .publish_date
        .map(|d| d.format("%B %d, %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let sentiment = Mood::from_polarity(sentiment.polarity(&article.text));
    let credibility = credibility::score(url, &article.text);
    info!(
        "Analyzed {}: credibility {} ({}), mood {:?}",
        url, credibility.score, credibility.label, sentiment
    );

    Ok(ArticleReport {
        url: url.to_string(),
        title: article.title,
        authors,
        publish_date,
        summary,
        top_image: article.top_image,
        sentiment,
        credibility,
    })
}
