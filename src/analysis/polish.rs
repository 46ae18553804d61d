//! Polish panel: fixed-substitution rewriting of resume lines plus scoring
//!
//! Rewrites are a fixed, ordered substitution table. Weak openers are
//! replaced with a strong verb picked by the text-seeded selector, so the same
//! input always yields the same rewrite.

use crate::analysis::engine::ScoringInput;
use crate::analysis::{keyword_set, ScoringContext};
use crate::processing::feedback::{evaluate_rules, FallbackMessages, FeedbackRule, Polarity};
use crate::processing::keyword_matcher::WeightedKeyword;
use crate::processing::seed::seeded_index;
use crate::report::composer::{compose, overall_from_categories};
use crate::report::model::{AggregateReport, CategoryId, CategoryScore, KeywordBreakdown, ScoreStatus};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const IMPACT_BASE: i32 = 55;
pub const STRONG_OPENER_BONUS: i32 = 10;
pub const CLARITY_BASE: i32 = 40;
pub const CONCISE_MIN_WORDS: usize = 8;
pub const CONCISE_MAX_WORDS: usize = 30;
pub const CONCISE_BASE: i32 = 90;
pub const CONCISE_PENALTY_PER_WORD: i32 = 2;

enum Replacement {
    Fixed(&'static str),
    StrongVerb,
}

struct SubstitutionRule {
    pattern: Regex,
    replacement: Replacement,
}

/// One rewrite applied to the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedSubstitution {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishOutcome {
    pub original: String,
    pub polished: String,
    pub substitutions: Vec<AppliedSubstitution>,
    pub score_before: u8,
    pub score_after: u8,
    /// Report for the polished text.
    pub report: AggregateReport,
}

pub struct Polisher {
    rules: Vec<SubstitutionRule>,
    whitespace: Regex,
}

impl Default for Polisher {
    fn default() -> Self {
        Self::new()
    }
}

impl Polisher {
    pub fn new() -> Self {
        let table: [(&str, Replacement); 13] = [
            (r"(?i)\b(?:was responsible for|responsible for)\b", Replacement::StrongVerb),
            (r"(?i)\bworked on\b", Replacement::StrongVerb),
            (r"(?i)\bhelped (?:with|to)\b", Replacement::StrongVerb),
            (r"(?i)\bwas in charge of\b", Replacement::StrongVerb),
            (r"(?i)\bduties included\b", Replacement::StrongVerb),
            (r"(?i)\bin order to\b", Replacement::Fixed("to")),
            (r"(?i)\bdue to the fact that\b", Replacement::Fixed("because")),
            (r"(?i)\butilized\b", Replacement::Fixed("used")),
            (r"(?i)\butilizing\b", Replacement::Fixed("using")),
            (r"(?i)\butilize\b", Replacement::Fixed("use")),
            (r"(?i)\ba lot of\b", Replacement::Fixed("many")),
            (r"(?i)\balot\b", Replacement::Fixed("a lot")),
            (r"\bi\b", Replacement::Fixed("I")),
        ];

        let rules = table
            .into_iter()
            .map(|(pattern, replacement)| SubstitutionRule {
                pattern: Regex::new(pattern).expect("Invalid substitution regex"),
                replacement,
            })
            .collect();

        Self {
            rules,
            whitespace: Regex::new(r"\s+").expect("Invalid whitespace regex"),
        }
    }

    /// Apply the substitution table, collapse whitespace and capitalise the
    /// first letter.
    pub fn rewrite(&self, text: &str, verbs: &[WeightedKeyword]) -> (String, Vec<AppliedSubstitution>) {
        let mut applied = Vec::new();
        let mut current = text.to_string();
        let verb = pick_verb(text, verbs);

        for rule in &self.rules {
            let to = match &rule.replacement {
                Replacement::Fixed(fixed) => (*fixed).to_string(),
                Replacement::StrongVerb => match &verb {
                    Some(verb) => verb.clone(),
                    None => continue,
                },
            };
            current = rule
                .pattern
                .replace_all(&current, |caps: &Captures| {
                    let from = caps[0].to_string();
                    applied.push(AppliedSubstitution {
                        from,
                        to: to.clone(),
                    });
                    to.clone()
                })
                .into_owned();
        }

        let collapsed = self.whitespace.replace_all(current.trim(), " ");
        (capitalize_first(&collapsed), applied)
    }

    pub fn polish(&self, context: &ScoringContext, text: &str) -> PolishOutcome {
        self.polish_with(context, text, &BTreeMap::new(), &BTreeMap::new())
    }

    pub fn polish_input(&self, context: &ScoringContext, input: &ScoringInput) -> PolishOutcome {
        self.polish_with(context, &input.text, &input.keyword_sets, &input.category_weights)
    }

    fn polish_with(
        &self,
        context: &ScoringContext,
        text: &str,
        keyword_sets: &BTreeMap<CategoryId, Vec<WeightedKeyword>>,
        weights: &BTreeMap<CategoryId, f64>,
    ) -> PolishOutcome {
        let verbs = keyword_set(keyword_sets, CategoryId::Impact, &context.strong_verbs);
        let (polished, substitutions) = self.rewrite(text, verbs);

        let before = score_text(context, text, keyword_sets, weights, 0);
        let report = score_text(context, &polished, keyword_sets, weights, substitutions.len());

        PolishOutcome {
            original: text.to_string(),
            score_before: before.overall_score,
            score_after: report.overall_score,
            polished,
            substitutions,
            report,
        }
    }
}

fn pick_verb(text: &str, verbs: &[WeightedKeyword]) -> Option<String> {
    let candidates: Vec<&WeightedKeyword> = verbs.iter().filter(|v| !v.term.trim().is_empty()).collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[seeded_index(text, candidates.len())].term.trim().to_string())
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Metrics the polish feedback table reads.
#[derive(Debug, Clone)]
pub struct PolishMetrics {
    pub impact: ScoreStatus,
    pub clarity: ScoreStatus,
    pub conciseness: ScoreStatus,
    pub word_count: usize,
    pub opens_with_strong_verb: bool,
    pub substitutions: usize,
}

pub const POLISH_FALLBACK: FallbackMessages = FallbackMessages {
    strength: "The line reads cleanly.",
    improvement: "Add a concrete outcome or metric to make the line stand out.",
};

pub const POLISH_RULES: &[FeedbackRule<PolishMetrics>] = &[
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| m.opens_with_strong_verb,
        message: |_| "Opens with a strong action verb.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| m.impact == ScoreStatus::Good,
        message: |_| "Uses results-oriented language.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| m.word_count > 0 && !m.opens_with_strong_verb,
        message: |_| "Start with an action verb such as Led, Built or Delivered.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| m.clarity == ScoreStatus::Good,
        message: |_| "Wording is specific and varied.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| m.clarity == ScoreStatus::Error,
        message: |_| "Replace repeated or generic words with specific ones.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| m.conciseness == ScoreStatus::Good,
        message: |_| "Length is right for a resume bullet.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| m.word_count > CONCISE_MAX_WORDS,
        message: |m| format!("Trim this line: {} words is long for a single bullet.", m.word_count),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| m.word_count > 0 && m.word_count < CONCISE_MIN_WORDS,
        message: |_| "Add context: what you did, how, and the result.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| m.substitutions > 0,
        message: |m| format!("Review the {} suggested wording change(s).", m.substitutions),
    },
];

fn conciseness_base(words: usize) -> i32 {
    if words == 0 {
        return 0;
    }
    let outside = if words < CONCISE_MIN_WORDS {
        CONCISE_MIN_WORDS - words
    } else {
        words.saturating_sub(CONCISE_MAX_WORDS)
    };
    let outside = i32::try_from(outside).unwrap_or(i32::MAX);
    CONCISE_BASE.saturating_sub(CONCISE_PENALTY_PER_WORD.saturating_mul(outside))
}

/// Score a line on impact, clarity and conciseness.
pub fn score_text(
    context: &ScoringContext,
    text: &str,
    keyword_sets: &BTreeMap<CategoryId, Vec<WeightedKeyword>>,
    weights: &BTreeMap<CategoryId, f64>,
    substitutions: usize,
) -> AggregateReport {
    let normalized = context.tokenizer.normalize(text);
    let is_empty = normalized.is_empty();
    let verbs = keyword_set(keyword_sets, CategoryId::Impact, &context.strong_verbs);

    let opens_with_strong_verb = normalized
        .tokens
        .first()
        .map(|first| verbs.iter().any(|v| v.term.eq_ignore_ascii_case(first)))
        .unwrap_or(false);

    let impact_base = match (is_empty, opens_with_strong_verb) {
        (true, _) => 0,
        (false, true) => IMPACT_BASE + STRONG_OPENER_BONUS,
        (false, false) => IMPACT_BASE,
    };
    let impact = context
        .scorer
        .score_detailed(impact_base, text, verbs, context.bounds(CategoryId::Impact));

    let clarity_base = if is_empty {
        0
    } else {
        CLARITY_BASE + i32::from(normalized.lexical_density) / 2
    };
    let clarity_keywords = keyword_set(keyword_sets, CategoryId::Clarity, &[]);
    let clarity = context
        .scorer
        .score_detailed(clarity_base, text, clarity_keywords, context.bounds(CategoryId::Clarity));

    let conciseness_keywords = keyword_set(keyword_sets, CategoryId::Conciseness, &[]);
    let conciseness = context.scorer.score_detailed(
        conciseness_base(normalized.tokens.len()),
        text,
        conciseness_keywords,
        context.bounds(CategoryId::Conciseness),
    );

    let categories: Vec<CategoryScore> = [
        (CategoryId::Impact, impact),
        (CategoryId::Clarity, clarity),
        (CategoryId::Conciseness, conciseness),
    ]
    .into_iter()
    .map(|(id, scored)| {
        // built-in verb lists are suggestions, not requirements
        let missing = if keyword_sets.contains_key(&id) {
            scored.keywords.missing
        } else {
            Vec::new()
        };
        CategoryScore::new(
            id,
            scored.score,
            &context.thresholds,
            KeywordBreakdown {
                matched: scored.keywords.matched,
                missing,
            },
        )
    })
    .collect();

    let overall = overall_from_categories(&categories, &context.category_weights.merged(weights));

    let metrics = PolishMetrics {
        impact: categories[0].status,
        clarity: categories[1].status,
        conciseness: categories[2].status,
        word_count: normalized.tokens.len(),
        opens_with_strong_verb,
        substitutions,
    };
    let feedback = evaluate_rules(POLISH_RULES, &metrics, &POLISH_FALLBACK);

    compose(categories, overall, feedback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_opener_replaced_deterministically() {
        let context = ScoringContext::default();
        let polisher = Polisher::new();
        let text = "responsible for the billing service migration to the cloud";

        let first = polisher.polish(&context, text);
        let second = polisher.polish(&context, text);
        assert_eq!(first, second);

        let verb = pick_verb(text, &context.strong_verbs).unwrap();
        assert!(first.polished.to_lowercase().starts_with(&verb));
        assert!(!first.polished.to_lowercase().contains("responsible for"));
        assert_eq!(first.substitutions.len(), 1);
        assert_eq!(first.substitutions[0].from, "responsible for");
    }

    #[test]
    fn test_fixed_substitutions() {
        let polisher = Polisher::new();
        let verbs = crate::processing::vocabulary::keywords(&["led"]);
        let (polished, applied) = polisher.rewrite(
            "i  utilized   alot of tools in order to ship faster",
            &verbs,
        );

        assert_eq!(polished, "I used a lot of tools to ship faster");
        assert_eq!(applied.len(), 4);
    }

    #[test]
    fn test_a_lot_of_before_alot() {
        let polisher = Polisher::new();
        let (polished, _) = polisher.rewrite("wrote a lot of tests", &[]);
        assert_eq!(polished, "Wrote many tests");
    }

    #[test]
    fn test_no_verbs_leaves_openers() {
        let polisher = Polisher::new();
        let (polished, applied) = polisher.rewrite("worked on the api", &[]);
        assert_eq!(polished, "Worked on the api");
        assert!(applied.is_empty());
    }

    #[test]
    fn test_polish_improves_score() {
        let context = ScoringContext::default();
        let outcome = Polisher::new().polish(
            &context,
            "Was responsible for the payments platform that served a lot of merchants across regions",
        );

        assert!(outcome.score_after >= outcome.score_before);
        assert_eq!(outcome.report.overall_score, outcome.score_after);
        assert!(outcome.report.improvements.iter().any(|i| i.contains("wording change")));
    }

    #[test]
    fn test_empty_line() {
        let context = ScoringContext::default();
        let outcome = Polisher::new().polish(&context, "  ");

        assert_eq!(outcome.polished, "");
        assert_eq!(outcome.score_after, 0);
        assert_eq!(outcome.report.strengths, vec![POLISH_FALLBACK.strength]);
        assert!(!outcome.report.improvements.is_empty());
    }

    #[test]
    fn test_conciseness_band() {
        assert_eq!(conciseness_base(0), 0);
        assert_eq!(conciseness_base(8), 90);
        assert_eq!(conciseness_base(30), 90);
        assert_eq!(conciseness_base(5), 84);
        assert_eq!(conciseness_base(40), 70);
    }
}
