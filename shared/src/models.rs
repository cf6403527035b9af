use serde::{Deserialize, Serialize};

/// Breaking-news card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub published: String,
}

/// Row on a topic page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicArticle {
    pub title: String,
    pub link: String,
    pub published: String,
}

/// Capitalize the first letter of every word, lower-case the rest.
///
/// A word starts after any non-alphabetic character, so "covid-19 news"
/// becomes "Covid-19 News".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
