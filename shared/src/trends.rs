//! Trending topics, with a keyword fallback built from headlines.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "with", "from", "for", "that", "this", "these", "those",
    "into", "over", "under", "after", "before", "about", "amid", "as", "to", "in", "on", "at",
    "of", "by", "is", "are", "was", "were", "be", "being", "been", "will", "can", "could",
    "would", "should", "has", "have", "had", "it", "its", "they", "them", "their", "you", "we",
    "our",
];

const MIN_KEYWORD_LEN: usize = 4;

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[A-Za-z][A-Za-z\-']{2,}").expect("word pattern"))
}

/// Most frequent keywords across `titles`, at most `n`.
///
/// Words are lower-cased; stop words and words shorter than four letters are
/// dropped. Equal counts keep the order in which words were first seen.
pub fn trending_keywords<S: AsRef<str>>(titles: &[S], n: usize) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for title in titles {
        for m in word_pattern().find_iter(title.as_ref()) {
            let word = m.as_str().to_lowercase();
            if word.len() < MIN_KEYWORD_LEN || STOP_WORDS.contains(&word.as_str()) {
                continue;
            }
            let count = counts.entry(word.clone()).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }
    }

    // stable sort keeps first-seen order among ties
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(n);
    order
}

/// Topic names from a trends feed, trimmed, blanks dropped, at most `n`
pub fn topics_from_titles<S: AsRef<str>>(titles: &[S], n: usize) -> Vec<String> {
    titles
        .iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trending_keywords_ranks_by_count() {
        let titles = [
            "Monsoon floods hit Mumbai",
            "Mumbai rains: trains cancelled",
            "Election results in Mumbai and Delhi",
            "Delhi heatwave continues",
        ];
        let keywords = trending_keywords(&titles, 3);
        assert_eq!(keywords, vec!["mumbai", "delhi", "monsoon"]);
    }

    #[test]
    fn test_trending_keywords_filters_short_and_stop_words() {
        let titles = ["The war and the peace of our time", "ISRO's rocket", "Well-being tips"];
        let keywords = trending_keywords(&titles, 10);
        assert_eq!(keywords, vec!["peace", "time", "isro's", "rocket", "well-being", "tips"]);
        assert!(!keywords.contains(&"war".to_string()));
        assert!(!keywords.contains(&"their".to_string()));
    }

    #[test]
    fn test_trending_keywords_empty() {
        let titles: Vec<String> = Vec::new();
        assert!(trending_keywords(&titles, 10).is_empty());
        assert!(trending_keywords(&["Budget budget BUDGET"], 0).is_empty());
    }

    #[test]
    fn test_topics_from_titles() {
        let titles = [" IPL final ", "", "Gold price", "Sensex"];
        assert_eq!(topics_from_titles(&titles, 2), vec!["IPL final", "Gold price"]);
    }
}
