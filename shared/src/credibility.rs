//! Heuristic credibility score for news articles.
//!
//! 0 reads as very reliable, 100 as very fake. The score adds up a domain
//! base, clickbait phrases, punctuation bloat and the share of all-caps words.
//! It is a signal for readers, not a trained classifier.

use serde::Serialize;
use std::fmt;

/// Outlets that start from the low base score
pub const TRUSTED_DOMAINS: &[&str] = &[
    "bbc.com",
    "reuters.com",
    "apnews.com",
    "thehindu.com",
    "hindustantimes.com",
    "indianexpress.com",
    "ndtv.com",
    "aljazeera.com",
    "nytimes.com",
    "theguardian.com",
    "wsj.com",
    "bloomberg.com",
    "economictimes.indiatimes.com",
];

/// Phrases matched as lower-case substrings
pub const CLICKBAIT_PHRASES: &[&str] = &[
    "shocking",
    "you won't believe",
    "miracle",
    "secret revealed",
    "exposed",
    "what happens next",
    "jaw-dropping",
    "unbelievable",
    "this is why",
    "number #",
    "insane",
    "must see",
];

const TRUSTED_BASE: f64 = 5.0;
const UNTRUSTED_BASE: f64 = 30.0;
const CLICKBAIT_POINTS: f64 = 10.0;
const PUNCTUATION_POINTS: f64 = 2.0;
const PUNCTUATION_CAP: f64 = 20.0;
const CAPS_WEIGHT: f64 = 30.0;
const CAPS_MIN_WORD_LEN: usize = 4;

/// Verdict bucket for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CredibilityLabel {
    LikelyReal,
    Uncertain,
    LikelyFake,
}

impl CredibilityLabel {
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            Self::LikelyReal
        } else if score < 55.0 {
            Self::Uncertain
        } else {
            Self::LikelyFake
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LikelyReal => "Likely Real",
            Self::Uncertain => "Uncertain",
            Self::LikelyFake => "Likely Fake",
        }
    }

    /// Label with its badge, as shown on the page
    pub fn badge(&self) -> &'static str {
        match self {
            Self::LikelyReal => "Likely Real ✅",
            Self::Uncertain => "Uncertain ⚠️",
            Self::LikelyFake => "Likely Fake ❌",
        }
    }
}

impl fmt::Display for CredibilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CredibilityAssessment {
    /// 0..=100, one decimal
    pub score: f64,
    pub label: CredibilityLabel,
}

/// Host of `url` without a leading `www.`; empty when the URL has no host.
pub fn website_name(url: &str) -> String {
    let host = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();

    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

pub fn is_trusted_domain(domain: &str) -> bool {
    TRUSTED_DOMAINS.contains(&domain)
}

fn clickbait_count(lower: &str) -> usize {
    CLICKBAIT_PHRASES
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .count()
}

fn punctuation_points(text: &str) -> f64 {
    let marks = text.chars().filter(|c| *c == '!' || *c == '?').count();
    (marks as f64 * PUNCTUATION_POINTS).min(PUNCTUATION_CAP)
}

/// At least one cased character and no lower-case ones
fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

fn caps_points(text: &str) -> f64 {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().count() >= CAPS_MIN_WORD_LEN)
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let caps = words.iter().filter(|w| is_all_caps(w)).count();
    caps as f64 / words.len() as f64 * CAPS_WEIGHT
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score an article by its URL and body text
pub fn score(url: &str, text: &str) -> CredibilityAssessment {
    let base = if is_trusted_domain(&website_name(url)) {
        TRUSTED_BASE
    } else {
        UNTRUSTED_BASE
    };

    let bait = clickbait_count(&text.to_lowercase()) as f64 * CLICKBAIT_POINTS;
    let raw = base + bait + punctuation_points(text) + caps_points(text);
    let score = round_one_decimal(raw.clamp(0.0, 100.0));

    CredibilityAssessment {
        score,
        label: CredibilityLabel::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untrusted_clean_text_is_base_only() {
        let result = score("https://example.com/story", "A calm report about local weather today.");
        assert_eq!(result.score, 30.0);
        assert_eq!(result.label, CredibilityLabel::Uncertain);
    }

    #[test]
    fn test_trusted_clean_text() {
        let result = score("https://www.bbc.com/news/123", "Ministers met on Tuesday to discuss the budget.");
        assert_eq!(result.score, 5.0);
        assert_eq!(result.label, CredibilityLabel::LikelyReal);

        let result = score("https://economictimes.indiatimes.com/markets", "Shares closed flat.");
        assert_eq!(result.score, 5.0);
    }

    #[test]
    fn test_website_name() {
        assert_eq!(website_name("https://www.reuters.com/world/x"), "reuters.com");
        assert_eq!(website_name("http://news.example.org:8080/a"), "news.example.org");
        assert_eq!(website_name("not a url"), "");
    }

    #[test]
    fn test_unparseable_url_is_untrusted() {
        assert_eq!(score("bbc.com/news", "plain text").score, 30.0);
    }

    #[test]
    fn test_shouting_clickbait_headline() {
        let result = score("https://example.com/a", "SHOCKING!!! YOU WON'T BELIEVE THIS");
        // 30 base + 2 phrases + 3 marks + every long word in caps
        assert_eq!(result.score, 86.0);
        assert_eq!(result.label, CredibilityLabel::LikelyFake);
    }

    #[test]
    fn test_punctuation_is_capped() {
        let text = "really?".repeat(30);
        // one long lower-case token, 30 marks
        assert_eq!(score("https://example.com", &text).score, 50.0);
    }

    #[test]
    fn test_score_clamped_to_100() {
        let text = CLICKBAIT_PHRASES.join(" ").to_uppercase() + "!!!!!!!!!!";
        let result = score("https://example.com", &text);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.label, CredibilityLabel::LikelyFake);
    }

    #[test]
    fn test_caps_ratio_ignores_short_words() {
        // "NEWS" and "TODAY" are caps, "more" is not; "OK" and "US" are too short
        let result = score("https://example.com", "OK US NEWS TODAY more");
        assert_eq!(result.score, 50.0);
    }

    #[test]
    fn test_score_rounds_to_one_decimal() {
        // 1 caps word out of 3 -> 10 points
        let result = score("https://example.com", "ALERT from town");
        assert_eq!(result.score, 40.0);
        // 1 of 7 -> 4.2857...
        let result = score("https://example.com", "ALERT from the small town near river banks");
        assert_eq!(result.score, 34.3);
    }

    #[test]
    fn test_empty_text() {
        let result = score("https://example.com", "");
        assert_eq!(result.score, 30.0);
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(CredibilityLabel::from_score(29.9), CredibilityLabel::LikelyReal);
        assert_eq!(CredibilityLabel::from_score(30.0), CredibilityLabel::Uncertain);
        assert_eq!(CredibilityLabel::from_score(54.9), CredibilityLabel::Uncertain);
        assert_eq!(CredibilityLabel::from_score(55.0), CredibilityLabel::LikelyFake);
        assert_eq!(CredibilityLabel::LikelyFake.to_string(), "Likely Fake");
    }
}
