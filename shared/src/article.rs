//! Article download and extraction.
//!
//! Fetching and parsing are separate seams: the dashboard pre-flights a URL
//! with [`PageFetcher`] and hands the body to an [`ArticleParser`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Sentences kept by the keyword summarizer
pub const NLP_SUMMARY_SENTENCES: usize = 5;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
}

/// HTTP GET with a fixed timeout
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("Mozilla/5.0 (compatible; newsdesk/", env!("CARGO_PKG_VERSION"), ")"))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(transport)
    }
}

/// A parsed news article
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publish_date: Option<NaiveDate>,
    pub text: String,
    pub top_image: Option<String>,
    /// Keyword-ranked summary of `text`
    pub summary: String,
}

/// Turns a downloaded page into an [`Article`]
pub trait ArticleParser: Send + Sync {
    fn parse(&self, url: &str, html: &str) -> anyhow::Result<Article>;
}

/// Meta-tag and paragraph based extraction
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlArticleParser;

fn selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("bad selector {}: {:?}", css, e))
}

fn meta_content(doc: &Html, css: &str) -> anyhow::Result<Option<String>> {
    let sel = selector(css)?;
    Ok(doc
        .select(&sel)
        .filter_map(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .find(|c| !c.is_empty()))
}

fn first_text(doc: &Html, css: &str) -> anyhow::Result<Option<String>> {
    let sel = selector(css)?;
    Ok(doc
        .select(&sel)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|t| !t.is_empty()))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

impl ArticleParser for HtmlArticleParser {
    fn parse(&self, url: &str, html: &str) -> anyhow::Result<Article> {
        let doc = Html::parse_document(html);

        let title = match meta_content(&doc, r#"meta[property="og:title"]"#)? {
            Some(t) => t,
            None => first_text(&doc, "title")?
                .or(first_text(&doc, "h1")?)
                .unwrap_or_default(),
        };

        let mut authors: Vec<String> = Vec::new();
        for css in [
            r#"meta[name="author"]"#,
            r#"meta[property="article:author"]"#,
            r#"[rel="author"]"#,
        ] {
            let sel = selector(css)?;
            for el in doc.select(&sel) {
                let name = el
                    .value()
                    .attr("content")
                    .map(str::to_string)
                    .unwrap_or_else(|| el.text().collect::<String>());
                let name = collapse_whitespace(&name);
                if !name.is_empty() && !name.starts_with("http") && !authors.contains(&name) {
                    authors.push(name);
                }
            }
        }

        let publish_date = [
            r#"meta[property="article:published_time"]"#,
            r#"meta[name="pubdate"]"#,
            r#"meta[name="date"]"#,
        ]
        .iter()
        .map(|css| meta_content(&doc, css))
        .collect::<anyhow::Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .find_map(|raw| parse_publish_date(&raw));

        let top_image = meta_content(&doc, r#"meta[property="og:image"]"#)?;

        // Prefer paragraphs inside <article>, fall back to every paragraph.
        let mut paragraphs: Vec<String> = doc
            .select(&selector("article p")?)
            .map(|p| collapse_whitespace(&p.text().collect::<String>()))
            .filter(|p| !p.is_empty())
            .collect();
        if paragraphs.is_empty() {
            paragraphs = doc
                .select(&selector("p")?)
                .map(|p| collapse_whitespace(&p.text().collect::<String>()))
                .filter(|p| !p.is_empty())
                .collect();
        }
        let text = paragraphs.join("\n\n");
        let summary = keyword_summary(&text, NLP_SUMMARY_SENTENCES);

        Ok(Article {
            url: url.to_string(),
            title,
            authors,
            publish_date,
            text,
            top_image,
            summary,
        })
    }
}

/// Non-empty, trimmed pieces of `text` split on '.'
pub fn sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// First `max` sentences rejoined with ". " and a closing period; empty when
/// the text has no sentences.
pub fn lead_summary(text: &str, max: usize) -> String {
    let picked: Vec<&str> = sentences(text).into_iter().take(max).collect();
    if picked.is_empty() {
        return String::new();
    }
    format!("{}.", picked.join(". "))
}

/// Short blurb for a headline card: the first two sentences of a summary, or
/// the summary unchanged when it has no sentence break.
pub fn headline_blurb(summary: &str) -> String {
    if summary.contains('.') {
        lead_summary(summary, 2)
    } else {
        summary.trim().to_string()
    }
}

const SUMMARY_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "at", "for", "with", "by", "from",
    "is", "are", "was", "were", "be", "been", "it", "its", "this", "that", "as", "has", "have",
    "had", "will", "said", "he", "she", "they", "we", "you", "not",
];

fn summary_words(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.to_lowercase())
        .filter(|w| w.len() > 2 && !SUMMARY_STOP_WORDS.contains(&w.as_str()))
}

/// Extractive summary: sentences ranked by the document frequency of their
/// words, the best `max` returned in reading order.
pub fn keyword_summary(text: &str, max: usize) -> String {
    let all = sentences(text);
    if all.len() <= max {
        return lead_summary(text, max);
    }

    let mut freq: HashMap<String, usize> = HashMap::new();
    for sentence in &all {
        for word in summary_words(sentence) {
            *freq.entry(word).or_insert(0) += 1;
        }
    }

    let mut scored: Vec<(usize, f64)> = all
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let words: Vec<String> = summary_words(sentence).collect();
            let score = if words.is_empty() {
                0.0
            } else {
                words.iter().map(|w| freq[w] as f64).sum::<f64>() / words.len() as f64
            };
            // earlier sentences win ties
            (i, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut keep: Vec<usize> = scored.into_iter().take(max).map(|(i, _)| i).collect();
    keep.sort_unstable();

    let picked: Vec<&str> = keep.into_iter().map(|i| all[i]).collect();
    format!("{}.", picked.join(". "))
}
