//! Keyword presence matching
//!
//! Containment is plain substring search, not token-boundary aware: "java"
//! matches inside "javascript". Case-insensitive keywords are searched in the
//! lower-cased text; case-sensitive ones in the raw text.

use crate::error::{Result, ScoringError};
use aho_corasick::AhoCorasick;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedKeyword {
    pub term: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl WeightedKeyword {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            case_sensitive: true,
        }
    }
}

impl From<&str> for WeightedKeyword {
    fn from(term: &str) -> Self {
        Self::new(term)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    /// Matched keywords in the order and casing they were supplied.
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// Number of distinct keywords found, not occurrences.
    pub hit_count: usize,
}

/// Pre-built matcher for a fixed keyword list.
pub struct KeywordMatcher {
    keywords: Vec<WeightedKeyword>,
    folded: Option<AhoCorasick>,
    folded_ids: Vec<usize>,
    exact: Option<AhoCorasick>,
    exact_ids: Vec<usize>,
}

impl KeywordMatcher {
    pub fn new(keywords: &[WeightedKeyword]) -> Result<Self> {
        let mut folded_patterns = Vec::new();
        let mut folded_ids = Vec::new();
        let mut exact_patterns = Vec::new();
        let mut exact_ids = Vec::new();

        for (index, keyword) in keywords.iter().enumerate() {
            // An empty term would match everywhere; it is always reported missing.
            if keyword.term.trim().is_empty() {
                continue;
            }
            if keyword.case_sensitive {
                exact_patterns.push(keyword.term.clone());
                exact_ids.push(index);
            } else {
                folded_patterns.push(keyword.term.to_lowercase());
                folded_ids.push(index);
            }
        }

        Ok(Self {
            keywords: keywords.to_vec(),
            folded: build_automaton(&folded_patterns)?,
            folded_ids,
            exact: build_automaton(&exact_patterns)?,
            exact_ids,
        })
    }

    pub fn find(&self, text: &str) -> KeywordMatch {
        let mut hits = vec![false; self.keywords.len()];

        if let Some(automaton) = &self.folded {
            let lowered = text.to_lowercase();
            for mat in automaton.find_overlapping_iter(&lowered) {
                hits[self.folded_ids[mat.pattern().as_usize()]] = true;
            }
        }

        if let Some(automaton) = &self.exact {
            for mat in automaton.find_overlapping_iter(text) {
                hits[self.exact_ids[mat.pattern().as_usize()]] = true;
            }
        }

        collect(&self.keywords, &hits)
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

fn build_automaton(patterns: &[String]) -> Result<Option<AhoCorasick>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    AhoCorasick::new(patterns)
        .map(Some)
        .map_err(|e| ScoringError::Processing(format!("Failed to build keyword matcher: {}", e)))
}

fn collect(keywords: &[WeightedKeyword], hits: &[bool]) -> KeywordMatch {
    let mut result = KeywordMatch::default();
    for (keyword, hit) in keywords.iter().zip(hits) {
        if *hit {
            result.matched.push(keyword.term.clone());
        } else {
            result.missing.push(keyword.term.clone());
        }
    }
    result.hit_count = result.matched.len();
    result
}

/// Match `keywords` against `text`.
///
/// Never fails: if the automaton cannot be built the keywords are checked
/// one by one with `str::contains`.
pub fn match_keywords(text: &str, keywords: &[WeightedKeyword]) -> KeywordMatch {
    match KeywordMatcher::new(keywords) {
        Ok(matcher) => matcher.find(text),
        Err(e) => {
            warn!("{}; falling back to linear keyword scan", e);
            let lowered = text.to_lowercase();
            let hits: Vec<bool> = keywords
                .iter()
                .map(|k| {
                    !k.term.trim().is_empty()
                        && if k.case_sensitive {
                            text.contains(&k.term)
                        } else {
                            lowered.contains(&k.term.to_lowercase())
                        }
                })
                .collect();
            collect(keywords, &hits)
        }
    }
}
