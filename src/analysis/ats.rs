//! ATS (Applicant Tracking System) resume checker
//!
//! Scores a resume on format, keywords, content and readability, optionally
//! against a job description whose skills become the keyword set.

use crate::analysis::engine::ScoringInput;
use crate::analysis::{keyword_set, ScoringContext};
use crate::processing::feedback::{evaluate_rules, FallbackMessages, Feedback, FeedbackRule, Polarity};
use crate::processing::keyword_matcher::{match_keywords, KeywordMatch, WeightedKeyword};
use crate::processing::seed::seeded_in_range;
use crate::processing::tokenizer::{sentences, NormalizedText};
use crate::processing::vocabulary;
use crate::report::composer::{compose, overall_from_categories};
use crate::report::model::{AggregateReport, CategoryId, CategoryScore, KeywordBreakdown, ScoreStatus};
use log::debug;
use regex::Regex;

/// Range of the text-seeded baseline used when no better signal exists.
pub const BASELINE_MIN: i32 = 60;
pub const BASELINE_MAX: i32 = 84;
/// Keyword base score when every job keyword is present.
pub const FULL_COVERAGE_BASE: f64 = 85.0;
pub const CONTENT_BASE: i32 = 50;
pub const QUANTIFIED_POINTS: i32 = 6;
pub const QUANTIFIED_CAP: i32 = 30;
pub const READABILITY_CEILING: f64 = 95.0;
pub const IDEAL_SENTENCE_WORDS: f64 = 17.0;
pub const SENTENCE_LENGTH_PENALTY: f64 = 3.0;
pub const VARIED_WORDING_DENSITY: u8 = 55;
const MISSING_KEYWORDS_SHOWN: usize = 5;

/// Metrics the ATS feedback table reads.
#[derive(Debug, Clone)]
pub struct AtsMetrics {
    pub statuses: Vec<(CategoryId, ScoreStatus)>,
    pub has_job_keywords: bool,
    pub missing_keywords: Vec<String>,
    pub quantified_achievements: usize,
    pub lexical_density: u8,
    pub is_empty: bool,
}

impl AtsMetrics {
    fn status(&self, id: CategoryId) -> Option<ScoreStatus> {
        self.statuses.iter().find(|(c, _)| *c == id).map(|(_, s)| *s)
    }

    fn is(&self, id: CategoryId, status: ScoreStatus) -> bool {
        self.status(id) == Some(status)
    }
}

pub const ATS_FALLBACK: FallbackMessages = FallbackMessages {
    strength: "Your resume is ready for a closer ATS review.",
    improvement: "Tailor your resume to each job description to raise the match score.",
};

pub const ATS_RULES: &[FeedbackRule<AtsMetrics>] = &[
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| m.is(CategoryId::Format, ScoreStatus::Good),
        message: |_| "Your resume uses a clear, ATS-friendly section structure.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| m.is(CategoryId::Format, ScoreStatus::Error),
        message: |_| "Add standard section headings such as Experience, Education and Skills.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| m.has_job_keywords && m.is(CategoryId::Keywords, ScoreStatus::Good),
        message: |_| "Your resume covers most of the skills the job asks for.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| m.is(CategoryId::Keywords, ScoreStatus::Error),
        message: |_| "Your resume is missing many of the skills the job asks for.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| !m.missing_keywords.is_empty(),
        message: |m| {
            let shown: Vec<&str> = m
                .missing_keywords
                .iter()
                .take(MISSING_KEYWORDS_SHOWN)
                .map(|s| s.as_str())
                .collect();
            format!("Consider adding these keywords from the job description: {}.", shown.join(", "))
        },
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| m.is(CategoryId::Content, ScoreStatus::Good),
        message: |_| "Your experience is backed by action verbs and measurable results.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| m.is(CategoryId::Content, ScoreStatus::Error),
        message: |_| "Describe achievements with strong action verbs and concrete outcomes.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| !m.is_empty && m.quantified_achievements == 0,
        message: |_| "Quantify at least a few achievements with percentages, amounts or team sizes.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| m.is(CategoryId::Readability, ScoreStatus::Good),
        message: |_| "Sentences are a comfortable length for recruiters to scan.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| m.is(CategoryId::Readability, ScoreStatus::Error),
        message: |_| "Break long sentences into shorter bullet points.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| m.lexical_density >= VARIED_WORDING_DENSITY,
        message: |_| "Your wording is varied and specific.".to_string(),
    },
];

/// Skills from the skill database that appear in the job description.
pub fn job_keywords(context: &ScoringContext, job_description: &str) -> Vec<WeightedKeyword> {
    let database: Vec<WeightedKeyword> = context
        .skill_database
        .iter()
        .map(|s| WeightedKeyword::new(s.as_str()))
        .collect();

    match_keywords(job_description, &database)
        .matched
        .into_iter()
        .map(WeightedKeyword::new)
        .collect()
}

/// Count of numeric achievements: plain numbers, percentages and amounts.
pub fn quantified_achievements(text: &str) -> usize {
    let pattern = Regex::new(r"(?:[$€£]\s?)?\d+(?:[.,]\d+)*(?:\s?%|\s?percent|[kKmMxX]\b)?")
        .expect("Invalid quantity regex");
    pattern.find_iter(text).count()
}

/// Readability base from the average sentence length in words.
pub fn readability_base(normalized: &NormalizedText, text: &str) -> i32 {
    let sentence_count = sentences(text).len();
    if normalized.is_empty() || sentence_count == 0 {
        return 0;
    }
    let average = normalized.tokens.len() as f64 / sentence_count as f64;
    let base = READABILITY_CEILING - SENTENCE_LENGTH_PENALTY * (average - IDEAL_SENTENCE_WORDS).abs();
    base.round().clamp(0.0, READABILITY_CEILING) as i32
}

pub fn score(context: &ScoringContext, input: &ScoringInput) -> AggregateReport {
    let text = input.text.as_str();
    let normalized = context.tokenizer.normalize(text);
    let is_empty = normalized.is_empty();
    let baseline = if is_empty {
        0
    } else {
        seeded_in_range(text, BASELINE_MIN, BASELINE_MAX)
    };

    let derived_job_keywords = input
        .reference_text
        .as_deref()
        .map(|job| job_keywords(context, job))
        .unwrap_or_default();
    let job_keywords = keyword_set(&input.keyword_sets, CategoryId::Keywords, &derived_job_keywords);
    debug!("ATS check against {} job keywords", job_keywords.len());

    let headings = vocabulary::keywords(vocabulary::SECTION_HEADINGS);
    let quantified = quantified_achievements(text);

    let mut categories = Vec::with_capacity(CategoryId::ATS.len());

    // Format
    let format_keywords = keyword_set(&input.keyword_sets, CategoryId::Format, &headings);
    let format = context.scorer.score_detailed(baseline, text, format_keywords, context.bounds(CategoryId::Format));
    categories.push(category(context, CategoryId::Format, format.score, format.keywords));

    // Keywords
    let keyword_match = match_keywords(text, job_keywords);
    let keyword_base = if is_empty {
        0
    } else if job_keywords.is_empty() {
        baseline
    } else {
        let coverage = keyword_match.hit_count as f64 / job_keywords.len() as f64;
        (FULL_COVERAGE_BASE * coverage).round() as i32
    };
    let keywords = context.scorer.apply(keyword_base, keyword_match, context.bounds(CategoryId::Keywords));
    let missing_keywords = keywords.keywords.missing.clone();
    categories.push(category(context, CategoryId::Keywords, keywords.score, keywords.keywords));

    // Content
    let content_base = if is_empty {
        0
    } else {
        CONTENT_BASE + (QUANTIFIED_POINTS * quantified as i32).min(QUANTIFIED_CAP)
    };
    let verbs = keyword_set(&input.keyword_sets, CategoryId::Content, &context.strong_verbs);
    let mut content = context.scorer.score_detailed(content_base, text, verbs, context.bounds(CategoryId::Content));
    if !input.keyword_sets.contains_key(&CategoryId::Content) {
        // unused built-in verbs are not gaps
        content.keywords.missing.clear();
    }
    categories.push(category(context, CategoryId::Content, content.score, content.keywords));

    // Readability
    let readability_keywords = keyword_set(&input.keyword_sets, CategoryId::Readability, &[]);
    let readability = context.scorer.score_detailed(
        readability_base(&normalized, text),
        text,
        readability_keywords,
        context.bounds(CategoryId::Readability),
    );
    categories.push(category(context, CategoryId::Readability, readability.score, readability.keywords));

    let weights = context.category_weights.merged(&input.category_weights);
    let overall = overall_from_categories(&categories, &weights);

    let metrics = AtsMetrics {
        statuses: categories.iter().map(|c| (c.id, c.status)).collect(),
        has_job_keywords: !job_keywords.is_empty(),
        missing_keywords,
        quantified_achievements: quantified,
        lexical_density: normalized.lexical_density,
        is_empty,
    };

    compose(categories, overall, feedback(&metrics))
}

pub fn feedback(metrics: &AtsMetrics) -> Feedback {
    evaluate_rules(ATS_RULES, metrics, &ATS_FALLBACK)
}

fn category(context: &ScoringContext, id: CategoryId, score: u8, keywords: KeywordMatch) -> CategoryScore {
    CategoryScore::new(
        id,
        score,
        &context.thresholds,
        KeywordBreakdown {
            matched: keywords.matched,
            missing: keywords.missing,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::ScoringMode;

    const RESUME: &str = "Summary\n\
        Backend engineer focused on data platforms.\n\
        Experience\n\
        Led a team of 6 engineers that built Kafka pipelines on AWS.\n\
        Reduced infrastructure costs by 30% and improved throughput 4x.\n\
        Skills\n\
        Rust, Python, PostgreSQL, Docker.\n\
        Education\n\
        BSc Computer Science.";

    const JOB: &str = "We are hiring a backend developer. Required: Kafka, AWS, Kubernetes and PostgreSQL.";

    fn input(text: &str) -> ScoringInput {
        ScoringInput::new(text, ScoringMode::Ats)
    }

    #[test]
    fn test_job_keywords_come_from_skill_database() {
        let context = ScoringContext::default();
        let terms: Vec<String> = job_keywords(&context, JOB).into_iter().map(|k| k.term).collect();

        for expected in ["kafka", "aws", "kubernetes", "postgresql", "backend", "developer"] {
            assert!(terms.contains(&expected.to_string()), "missing {}", expected);
        }
    }

    #[test]
    fn test_full_report_shape() {
        let context = ScoringContext::default();
        let report = score(&context, &input(RESUME).with_reference(JOB));

        let ids: Vec<CategoryId> = report.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, CategoryId::ATS.to_vec());

        let keywords = report.category(CategoryId::Keywords).unwrap();
        assert!(keywords.keywords.missing.contains(&"kubernetes".to_string()));
        assert!(keywords.keywords.matched.contains(&"kafka".to_string()));

        let expected = overall_from_categories(&report.categories, &context.category_weights);
        assert_eq!(report.overall_score, expected);
        assert!(!report.strengths.is_empty());
        assert!(report.improvements.iter().any(|i| i.contains("kubernetes")));
    }

    #[test]
    fn test_caller_keyword_set_replaces_job_keywords() {
        let context = ScoringContext::default();
        let keywords = vec![WeightedKeyword::new("Kubernetes"), WeightedKeyword::new("AWS")];
        let report = score(
            &context,
            &input(RESUME).with_reference(JOB).with_keywords(CategoryId::Keywords, keywords),
        );

        let category = report.category(CategoryId::Keywords).unwrap();
        assert_eq!(category.keywords.matched, vec!["AWS"]);
        assert_eq!(category.keywords.missing, vec!["Kubernetes"]);
        // round(85 * 1 / 2) + 5
        assert_eq!(category.raw_score, 48);
        assert_eq!(category.status, ScoreStatus::Error);
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let context = ScoringContext::default();
        let report = score(&context, &input("   ").with_reference(JOB));

        assert_eq!(report.overall_score, 0);
        assert!(report.categories.iter().all(|c| c.raw_score == 0));
        assert_eq!(report.strengths, vec![ATS_FALLBACK.strength]);
        assert!(!report.improvements.is_empty());
    }

    #[test]
    fn test_baseline_is_seeded_by_text() {
        let context = ScoringContext::default();
        let text = "Plain paragraph about work without headings";
        let first = score(&context, &input(text));
        let second = score(&context, &input(text));
        assert_eq!(first, second);

        let format = first.category(CategoryId::Format).unwrap().raw_score;
        let expected = seeded_in_range(text, BASELINE_MIN, BASELINE_MAX);
        assert_eq!(i32::from(format), expected);
    }

    #[test]
    fn test_weights_shift_overall() {
        let context = ScoringContext::default();
        let plain = score(&context, &input(RESUME).with_reference(JOB));
        let weighted = score(
            &context,
            &input(RESUME).with_reference(JOB).with_weight(CategoryId::Keywords, 5.0),
        );

        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert(CategoryId::Keywords, 5.0);
        let expected = overall_from_categories(&weighted.categories, &context.category_weights.merged(&overrides));
        assert_eq!(weighted.overall_score, expected);
        assert_eq!(plain.categories, weighted.categories);
    }

    #[test]
    fn test_quantified_and_readability_helpers() {
        assert_eq!(quantified_achievements("Cut costs by 30% and saved $1.2M for 3 teams"), 3);
        assert_eq!(quantified_achievements("No numbers here"), 0);

        let text = "One two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen seventeen.";
        let normalized = crate::processing::tokenizer::normalize(text);
        assert_eq!(readability_base(&normalized, text), 95);
        assert_eq!(readability_base(&crate::processing::tokenizer::normalize(""), ""), 0);
    }
}
