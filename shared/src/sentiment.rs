//! Article mood from a word-list polarity score.

use serde::Serialize;
use std::fmt;

/// Scores text polarity in [-1, 1]
pub trait SentimentAnalyzer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    Happy,
    Sad,
    Neutral,
}

impl Mood {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Mood::Happy
        } else if polarity < 0.0 {
            Mood::Sad
        } else {
            Mood::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy 😊",
            Mood::Sad => "sad 😟",
            Mood::Neutral => "neutral 😐",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const POSITIVE: &[&str] = &[
    "good", "great", "excellent", "positive", "gain", "gains", "growth", "win", "wins", "won",
    "success", "successful", "improve", "improved", "improves", "strong", "stronger", "best",
    "happy", "hope", "hopeful", "benefit", "benefits", "rise", "rises", "rally", "record",
    "celebrate", "celebrated", "praise", "praised", "boost", "boosted", "recovery", "peace",
    "safe", "support", "agreement", "love", "beautiful", "bright", "progress", "relief",
];

const NEGATIVE: &[&str] = &[
    "bad", "poor", "worse", "worst", "negative", "loss", "losses", "fall", "falls", "fell",
    "decline", "declines", "crash", "crisis", "fail", "failed", "failure", "weak", "weaker",
    "sad", "fear", "fears", "angry", "anger", "war", "attack", "attacks", "killed", "dead",
    "death", "injured", "violence", "protest", "threat", "risk", "collapse", "disaster",
    "scandal", "fraud", "corruption", "hate", "terrible", "slump",
];

const NEGATORS: &[&str] = &["not", "no", "never", "without", "hardly"];

/// Averages +1/-1 hits over the opinion words found; a negator directly in
/// front of an opinion word flips it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl SentimentAnalyzer for LexiconSentiment {
    fn polarity(&self, text: &str) -> f64 {
        let mut total = 0.0;
        let mut hits = 0usize;
        let mut negate = false;

        for token in text.split(|c: char| !c.is_alphanumeric() && c != '\'') {
            if token.is_empty() {
                continue;
            }
            let word = token.to_lowercase();
            let word = word.trim_matches('\'');

            let value = if POSITIVE.contains(&word) {
                1.0
            } else if NEGATIVE.contains(&word) {
                -1.0
            } else {
                negate = NEGATORS.contains(&word) || word.ends_with("n't");
                continue;
            };

            total += if negate { -value } else { value };
            hits += 1;
            negate = false;
        }

        if hits == 0 {
            0.0
        } else {
            (total / hits as f64).clamp(-1.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_from_polarity() {
        assert_eq!(Mood::from_polarity(0.4), Mood::Happy);
        assert_eq!(Mood::from_polarity(-0.01), Mood::Sad);
        assert_eq!(Mood::from_polarity(0.0), Mood::Neutral);
    }

    #[test]
    fn test_polarity_direction() {
        let analyzer = LexiconSentiment;
        assert!(analyzer.polarity("Markets rally as growth beats hopes, a great day") > 0.0);
        assert!(analyzer.polarity("Crash deepens the crisis; losses mount after the attack") < 0.0);
        assert_eq!(analyzer.polarity("The committee met on Tuesday."), 0.0);
        assert_eq!(analyzer.polarity(""), 0.0);
    }

    #[test]
    fn test_polarity_bounds_and_negation() {
        let analyzer = LexiconSentiment;
        assert_eq!(analyzer.polarity("good great excellent"), 1.0);
        assert_eq!(analyzer.polarity("not good"), -1.0);
        assert_eq!(analyzer.polarity("This isn't bad"), 1.0);
        assert_eq!(analyzer.polarity("good bad"), 0.0);
    }
}
