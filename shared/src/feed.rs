//! RSS feed reading.
//!
//! Only the handful of item fields the dashboard shows are extracted, so a
//! few anchored regexes over each `<item>` block are enough.

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

/// One feed item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Raw `pubDate`, empty when missing
    pub published: String,
    /// Media thumbnail URL when the feed carries one
    pub thumbnail: Option<String>,
}

/// Reads a feed URL into ordered entries
#[async_trait]
pub trait FeedReader: Send + Sync {
    async fn entries(&self, feed_url: &str) -> Result<Vec<FeedEntry>>;
}

/// Feed reader over HTTP
#[derive(Debug, Clone)]
pub struct RssFeedReader {
    client: reqwest::Client,
}

impl RssFeedReader {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedReader for RssFeedReader {
    async fn entries(&self, feed_url: &str) -> Result<Vec<FeedEntry>> {
        let body = self
            .client
            .get(feed_url)
            .send()
            .await
            .with_context(|| format!("fetching feed {}", feed_url))?
            .error_for_status()?
            .text()
            .await?;

        let entries = parse_rss(&body);
        tracing::debug!("Parsed {} entries from {}", entries.len(), feed_url);
        Ok(entries)
    }
}

struct RssPatterns {
    item: Regex,
    title: Regex,
    link: Regex,
    pub_date: Regex,
    thumbnail: Regex,
}

fn patterns() -> &'static RssPatterns {
    static PATTERNS: OnceLock<RssPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| RssPatterns {
        item: Regex::new(r"(?s)<item\b[^>]*>(.*?)</item>").expect("item pattern"),
        title: Regex::new(r"(?s)<title\b[^>]*>(.*?)</title>").expect("title pattern"),
        link: Regex::new(r"(?s)<link\b[^>]*>(.*?)</link>").expect("link pattern"),
        pub_date: Regex::new(r"(?s)<pubDate\b[^>]*>(.*?)</pubDate>").expect("pubDate pattern"),
        thumbnail: Regex::new(r#"<media:(?:thumbnail|content)\b[^>]*?\burl\s*=\s*["']([^"']+)["']"#)
            .expect("thumbnail pattern"),
    })
}

fn char_ref() -> &'static Regex {
    static CHAR_REF: OnceLock<Regex> = OnceLock::new();
    CHAR_REF.get_or_init(|| {
        Regex::new(r"&#(?:[xX]([0-9A-Fa-f]{1,6})|([0-9]{1,7}));").expect("char ref pattern")
    })
}

/// Replace `&#N;` and `&#xH;` with their characters; invalid code points stay as written.
fn decode_char_refs(text: &str) -> String {
    char_ref()
        .replace_all(text, |caps: &regex::Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, Some(dec)) => dec.as_str().parse().ok(),
                (None, None) => None,
            };
            code.and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn is_web_link(link: &str) -> bool {
    Url::parse(link)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn capture(re: &Regex, block: &str) -> Option<String> {
    re.captures(block)
        .and_then(|c| c.get(1))
        .map(|m| decode_text(m.as_str()))
}

/// Strip CDATA wrappers and decode the predefined XML entities and
/// numeric character references. `&amp;` goes last so `&amp;lt;` stays `&lt;`.
pub fn decode_text(raw: &str) -> String {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|s| s.strip_suffix("]]>"))
        .unwrap_or(trimmed);

    let named = inner
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    decode_char_refs(&named)
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Extract items from an RSS document in feed order.
///
/// Items without an http(s) link are skipped.
pub fn parse_rss(xml: &str) -> Vec<FeedEntry> {
    let p = patterns();
    p.item
        .captures_iter(xml)
        .filter_map(|caps| {
            let block = caps.get(1)?.as_str();
            let link = capture(&p.link, block).filter(|l| is_web_link(l))?;
            Some(FeedEntry {
                title: capture(&p.title, block).unwrap_or_default(),
                link,
                published: capture(&p.pub_date, block).unwrap_or_default(),
                thumbnail: capture(&p.thumbnail, block),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Top stories - Google News</title>
    <link>https://news.google.com/</link>
    <item>
      <title>Rates held steady &amp; markets rally - Reuters</title>
      <link>https://news.google.com/articles/abc</link>
      <pubDate>Mon, 03 Jun 2024 10:00:00 GMT</pubDate>
      <media:thumbnail url="https://img.example.com/a.jpg" width="100"/>
    </item>
    <item>
      <title><![CDATA[Monsoon arrives early]]></title>
      <link>https://news.google.com/articles/def</link>
    </item>
    <item>
      <title>No link here</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_rss_items_in_order() {
        let entries = parse_rss(SAMPLE);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].title, "Rates held steady & markets rally - Reuters");
        assert_eq!(entries[0].link, "https://news.google.com/articles/abc");
        assert_eq!(entries[0].published, "Mon, 03 Jun 2024 10:00:00 GMT");
        assert_eq!(entries[0].thumbnail.as_deref(), Some("https://img.example.com/a.jpg"));

        assert_eq!(entries[1].title, "Monsoon arrives early");
        assert_eq!(entries[1].published, "");
        assert_eq!(entries[1].thumbnail, None);
    }

    #[test]
    fn test_channel_fields_are_not_items() {
        let entries = parse_rss(SAMPLE);
        assert!(entries.iter().all(|e| e.link != "https://news.google.com/"));
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text("  a &lt;b&gt; &amp;amp; c "), "a <b> &amp; c");
        assert_eq!(decode_text("<![CDATA[x & y]]>"), "x & y");
    }

    #[test]
    fn test_decode_numeric_references() {
        assert_eq!(decode_text("Rock&#8217;n &#x2019;roll"), "Rock\u{2019}n \u{2019}roll");
        assert_eq!(decode_text("It&#39;s &#X41;"), "It's A");
        // escaped references decode one level only
        assert_eq!(decode_text("&amp;#39; &amp;#x41;"), "&#39; &#x41;");
        // surrogates and out-of-range code points are left alone
        assert_eq!(decode_text("&#xD800; &#1114112;"), "&#xD800; &#1114112;");
    }

    #[test]
    fn test_non_web_links_are_skipped() {
        let xml = r#"<rss><channel>
            <item><title>Click me</title><link>javascript:alert(1)</link></item>
            <item><title>Data</title><link>data:text/html,hi</link></item>
            <item><title>Relative</title><link>/articles/1</link></item>
            <item><title>Plain</title><link>http://example.com/story</link></item>
        </channel></rss>"#;
        let entries = parse_rss(xml);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Plain");
        assert_eq!(entries[0].link, "http://example.com/story");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_rss("not xml at all").is_empty());
    }
}
