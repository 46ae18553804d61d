//! Text normalization and lexical statistics

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct Tokenizer {
    stop_words: HashSet<&'static str>,
    separator: Regex,
}

/// Normalized view of a text plus the lexical statistics derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Lower-cased input, used for substring keyword matching.
    pub lowered: String,
    pub tokens: Vec<String>,
    /// `tokens` without stop words.
    pub content_tokens: Vec<String>,
    /// Share of unique content tokens over all tokens, 0-100.
    pub lexical_density: u8,
    /// Pieces produced by splitting on non-letter runs, counting the empty
    /// piece left by a leading or trailing separator. Zero for blank text.
    pub segment_count: usize,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn unique_content_tokens(&self) -> usize {
        self.content_tokens
            .iter()
            .map(|t| t.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        let separator = Regex::new(r"[^a-z]+").expect("Invalid separator regex");

        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            separator,
        }
    }

    /// Lower-case, split on non-letter runs and compute lexical density.
    pub fn normalize(&self, text: &str) -> NormalizedText {
        let lowered = text.to_lowercase();

        let tokens: Vec<String> = self
            .separator
            .split(&lowered)
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect();

        let content_tokens: Vec<String> = tokens
            .iter()
            .filter(|t| !self.stop_words.contains(t.as_str()))
            .cloned()
            .collect();

        let segment_count = if lowered.trim().is_empty() {
            0
        } else {
            self.separator.split(&lowered).count()
        };

        let mut normalized = NormalizedText {
            lowered,
            tokens,
            content_tokens,
            lexical_density: 0,
            segment_count,
        };
        normalized.lexical_density = lexical_density(
            normalized.unique_content_tokens(),
            normalized.tokens.len(),
        );
        normalized
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

/// `round(100 * unique / total)` clamped to 0-100, and 0 when there are no tokens.
pub fn lexical_density(unique_content: usize, total_tokens: usize) -> u8 {
    if total_tokens == 0 {
        return 0;
    }
    let ratio = 100.0 * unique_content as f64 / total_tokens as f64;
    ratio.round().clamp(0.0, 100.0) as u8
}

/// Split text into trimmed, non-empty sentences.
pub fn sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Convenience wrapper for one-off calls.
pub fn normalize(text: &str) -> NormalizedText {
    Tokenizer::new().normalize(text)
}

// Articles, prepositions, pronouns, conjunctions and common auxiliaries.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "if", "then", "than",
    "of", "in", "on", "at", "to", "for", "from", "by", "with", "about", "into",
    "onto", "over", "under", "after", "before", "between", "through", "during",
    "without", "within", "upon", "as", "up", "out", "off", "down", "via", "per",
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did",
    "has", "have", "had", "having", "will", "would", "shall", "should", "can",
    "could", "may", "might", "must", "i", "me", "my", "we", "our", "us", "you",
    "your", "he", "him", "his", "she", "her", "it", "its", "they", "them",
    "their", "this", "that", "these", "those", "there", "here", "which", "who",
    "whom", "what", "when", "where", "while", "also", "very", "just", "not",
    "no", "s", "t",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_split_on_non_letters() {
        let tokenizer = Tokenizer::new();
        let result = tokenizer.normalize("Built CI/CD pipelines in 2023, cutting deploys by 40%!");

        assert_eq!(
            result.tokens,
            vec!["built", "ci", "cd", "pipelines", "in", "cutting", "deploys", "by"]
        );
        assert!(!result.content_tokens.contains(&"in".to_string()));
        assert!(!result.content_tokens.contains(&"by".to_string()));
        assert!(result.content_tokens.contains(&"pipelines".to_string()));
    }

    #[test]
    fn test_empty_text_has_zero_density() {
        let result = normalize("");
        assert!(result.is_empty());
        assert_eq!(result.lexical_density, 0);
        assert_eq!(result.segment_count, 0);

        let digits = normalize("2024 - 42");
        assert!(digits.tokens.is_empty());
        assert_eq!(digits.lexical_density, 0);
    }

    #[test]
    fn test_lexical_density_bounds() {
        let samples = [
            "the the the the",
            "Rust Rust Rust",
            "Designed scalable distributed storage engines",
            "a",
            "x y z",
        ];
        for sample in samples {
            let density = normalize(sample).lexical_density;
            assert!(density <= 100, "{} gave {}", sample, density);
        }
        assert_eq!(normalize("the the the the").lexical_density, 0);
        assert_eq!(normalize("Designed scalable storage").lexical_density, 100);
        assert_eq!(lexical_density(1, 3), 33);
    }

    #[test]
    fn test_segment_count_keeps_trailing_piece() {
        let result = normalize("Led a team to improve system performance.");
        assert_eq!(result.tokens.len(), 7);
        assert_eq!(result.segment_count, 8);
        assert_eq!(normalize("no separator at end").segment_count, 4);
        assert_eq!(normalize("   ").segment_count, 0);
    }

    #[test]
    fn test_sentence_split() {
        let parts = sentences("Shipped the API. Cut latency in half! Then what?");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "Shipped the API.");
        assert!(sentences("  ").is_empty());
    }
}
