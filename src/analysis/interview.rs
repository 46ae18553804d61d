//! AI interview report
//!
//! Each answer is measured on clarity, relevance and confidence from its
//! transcript and duration. System-design answers are also scored on
//! architecture, scalability and reliability through the same bounded
//! keyword-bonus scorer the ATS checker uses.

use crate::analysis::{keyword_set, ScoringContext};
use crate::processing::aggregator::{aggregate, QuestionCategory, WeightedScore};
use crate::processing::feedback::{generate_feedback, MetricBundle, SystemDesignScores};
use crate::processing::keyword_matcher::{match_keywords, WeightedKeyword};
use crate::processing::vocabulary;
use crate::report::composer::compose;
use crate::report::model::{AggregateReport, CategoryId, CategoryScore, KeywordBreakdown, ScoreBounds};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const CLARITY_BASE: i32 = 60;
pub const CLARITY_DENSITY_FACTOR: f64 = 0.35;
pub const FILLER_PENALTY: i32 = 3;
pub const CLARITY_BOUNDS: ScoreBounds = ScoreBounds { floor: 60, ceiling: 95 };

pub const CONFIDENCE_BASE: i32 = 65;
pub const STRONG_VERB_POINTS: i32 = 5;
pub const HEDGE_PENALTY: i32 = 6;
pub const CONFIDENCE_BOUNDS: ScoreBounds = ScoreBounds { floor: 50, ceiling: 95 };

pub const RELEVANCE_BASE: i32 = 60;
pub const RELEVANCE_DEPTH_CAP: i32 = 20;
pub const RELEVANCE_BOUNDS: ScoreBounds = ScoreBounds { floor: 50, ceiling: 98 };

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewAnswer {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub category: QuestionCategory,
    pub transcript: String,
    #[serde(default)]
    pub duration_seconds: f64,
}

impl InterviewAnswer {
    pub fn new(category: QuestionCategory, transcript: impl Into<String>, duration_seconds: f64) -> Self {
        Self {
            question: String::new(),
            category,
            transcript: transcript.into(),
            duration_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerMetrics {
    pub category: QuestionCategory,
    pub word_count: usize,
    pub words_per_minute: u32,
    pub filler_count: usize,
    pub hedge_count: usize,
    pub clarity: u8,
    pub relevance: u8,
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_design: Option<SystemDesignScores>,
    pub score: u8,
    /// Keyword evidence per report category.
    pub keywords: BTreeMap<CategoryId, KeywordBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewAssessment {
    pub answers: Vec<AnswerMetrics>,
    pub metrics: MetricBundle,
    pub report: AggregateReport,
}

/// `round(words / minutes)`, or 0 when the duration is unusable.
pub fn words_per_minute(words: usize, duration_seconds: f64) -> u32 {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return 0;
    }
    let wpm = words as f64 / (duration_seconds / 60.0);
    wpm.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

struct Vocabularies {
    technical: Vec<WeightedKeyword>,
    project: Vec<WeightedKeyword>,
    behavioral: Vec<WeightedKeyword>,
    general: Vec<WeightedKeyword>,
    system_design: Vec<WeightedKeyword>,
    hedges: Vec<WeightedKeyword>,
}

impl Vocabularies {
    fn new(context: &ScoringContext) -> Self {
        let system_design = CategoryId::SYSTEM_DESIGN
            .iter()
            .flat_map(|id| context.system_design_terms(*id).iter().cloned())
            .collect();

        Self {
            technical: vocabulary::keywords(vocabulary::TECHNICAL_TERMS),
            project: vocabulary::keywords(vocabulary::PROJECT_TERMS),
            behavioral: vocabulary::keywords(vocabulary::BEHAVIORAL_TERMS),
            general: vocabulary::keywords(vocabulary::GENERAL_TERMS),
            system_design,
            hedges: vocabulary::keywords(vocabulary::HEDGE_PHRASES),
        }
    }

    fn relevance(&self, category: QuestionCategory) -> &[WeightedKeyword] {
        match category {
            QuestionCategory::Technical => &self.technical,
            QuestionCategory::ProjectExperience => &self.project,
            QuestionCategory::Behavioral => &self.behavioral,
            QuestionCategory::SystemDesign if !self.system_design.is_empty() => &self.system_design,
            QuestionCategory::SystemDesign | QuestionCategory::General => &self.general,
        }
    }
}

fn breakdown(matched: Vec<String>, missing: Vec<String>) -> KeywordBreakdown {
    KeywordBreakdown { matched, missing }
}

fn measure(
    context: &ScoringContext,
    vocab: &Vocabularies,
    keyword_sets: &BTreeMap<CategoryId, Vec<WeightedKeyword>>,
    answer: &InterviewAnswer,
) -> AnswerMetrics {
    let text = answer.transcript.as_str();
    let normalized = context.tokenizer.normalize(text);
    let is_empty = normalized.is_empty();
    let mut keywords = BTreeMap::new();

    let filler_count = normalized
        .tokens
        .iter()
        .filter(|t| vocabulary::FILLER_WORDS.contains(&t.as_str()))
        .count();
    let hedge_count = match_keywords(text, &vocab.hedges).hit_count;

    let density_points = (CLARITY_DENSITY_FACTOR * f64::from(normalized.lexical_density)).round() as i32;
    let filler_penalty = FILLER_PENALTY.saturating_mul(i32::try_from(filler_count).unwrap_or(i32::MAX));
    let clarity = CLARITY_BOUNDS.clamp(CLARITY_BASE + density_points - filler_penalty) as u8;

    let verbs = match_keywords(text, &context.strong_verbs);
    let confidence = if is_empty {
        CONFIDENCE_BOUNDS.floor as u8
    } else {
        let verb_points = STRONG_VERB_POINTS.saturating_mul(i32::try_from(verbs.hit_count).unwrap_or(i32::MAX));
        let hedge_penalty = HEDGE_PENALTY.saturating_mul(i32::try_from(hedge_count).unwrap_or(i32::MAX));
        CONFIDENCE_BOUNDS.clamp(CONFIDENCE_BASE.saturating_add(verb_points).saturating_sub(hedge_penalty)) as u8
    };
    keywords.insert(CategoryId::Confidence, breakdown(verbs.matched, Vec::new()));

    let relevance_base = if is_empty {
        0
    } else {
        let depth = i32::try_from(normalized.content_tokens.len() / 5).unwrap_or(i32::MAX);
        RELEVANCE_BASE + depth.min(RELEVANCE_DEPTH_CAP)
    };
    let relevance_keywords = keyword_set(keyword_sets, CategoryId::Relevance, vocab.relevance(answer.category));
    let relevance = context
        .scorer
        .score_detailed(relevance_base, text, relevance_keywords, RELEVANCE_BOUNDS);
    let relevance_missing = if keyword_sets.contains_key(&CategoryId::Relevance) {
        relevance.keywords.missing
    } else {
        Vec::new()
    };
    keywords.insert(CategoryId::Relevance, breakdown(relevance.keywords.matched, relevance_missing));
    let relevance = relevance.score;

    let core_sum = u32::from(clarity) + u32::from(relevance) + u32::from(confidence);
    let mut score = (f64::from(core_sum) / 3.0).round() as u8;

    let system_design = if answer.category == QuestionCategory::SystemDesign {
        let base = ((f64::from(clarity) + f64::from(relevance)) / 2.0).round() as i32;
        let mut area_score = |id: CategoryId| {
            let terms = keyword_set(keyword_sets, id, context.system_design_terms(id));
            let scored = context.scorer.score_detailed(base, text, terms, context.bounds(id));
            keywords.insert(id, breakdown(scored.keywords.matched, scored.keywords.missing));
            scored.score
        };
        let scores = SystemDesignScores {
            architecture: area_score(CategoryId::Architecture),
            scalability: area_score(CategoryId::Scalability),
            reliability: area_score(CategoryId::Reliability),
        };

        let design_sum = u32::from(scores.architecture) + u32::from(scores.scalability) + u32::from(scores.reliability);
        let design_mean = f64::from(design_sum) / 3.0;
        score = ((f64::from(score) + design_mean) / 2.0).round() as u8;
        Some(scores)
    } else {
        None
    };

    AnswerMetrics {
        category: answer.category,
        word_count: normalized.segment_count,
        words_per_minute: words_per_minute(normalized.segment_count, answer.duration_seconds),
        filler_count,
        hedge_count,
        clarity,
        relevance,
        confidence,
        system_design,
        score,
        keywords,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Union of the keyword evidence for `id` across answers. A keyword matched
/// by any answer is not reported missing.
fn merged_keywords(answers: &[AnswerMetrics], id: CategoryId) -> KeywordBreakdown {
    let evidence: Vec<&KeywordBreakdown> = answers.iter().filter_map(|a| a.keywords.get(&id)).collect();

    let mut seen = HashSet::new();
    let matched: Vec<String> = evidence
        .iter()
        .flat_map(|k| &k.matched)
        .filter(|k| seen.insert(k.to_lowercase()))
        .cloned()
        .collect();

    let missing: Vec<String> = evidence
        .iter()
        .flat_map(|k| &k.missing)
        .filter(|k| seen.insert(k.to_lowercase()))
        .cloned()
        .collect();

    breakdown(matched, missing)
}

fn session_metrics(answers: &[InterviewAnswer], measured: &[AnswerMetrics], categories: &[CategoryScore]) -> MetricBundle {
    if measured.is_empty() {
        return MetricBundle::default();
    }

    let category_score = |id: CategoryId| categories.iter().find(|c| c.id == id).map(|c| c.raw_score);

    let timed: Vec<(usize, f64)> = measured
        .iter()
        .zip(answers)
        .filter(|(_, a)| a.duration_seconds.is_finite() && a.duration_seconds > 0.0)
        .map(|(m, a)| (m.word_count, a.duration_seconds))
        .collect();
    let total_words: usize = timed.iter().map(|(w, _)| *w).sum();
    let total_seconds: f64 = timed.iter().map(|(_, s)| *s).sum();
    let words_per_minute = (!timed.is_empty()).then(|| words_per_minute(total_words, total_seconds));

    let average_answer_seconds = mean(timed.iter().map(|(_, s)| *s)).map(|s| s.round() as u32);

    let technical_clarity = mean(
        measured
            .iter()
            .filter(|m| m.category == QuestionCategory::Technical)
            .map(|m| f64::from(m.clarity)),
    )
    .map(|v| v.round() as u8);

    let system_design = category_score(CategoryId::Architecture).map(|architecture| SystemDesignScores {
        architecture,
        scalability: category_score(CategoryId::Scalability).unwrap_or_default(),
        reliability: category_score(CategoryId::Reliability).unwrap_or_default(),
    });

    MetricBundle {
        words_per_minute,
        clarity: category_score(CategoryId::Clarity),
        relevance: category_score(CategoryId::Relevance),
        confidence: category_score(CategoryId::Confidence),
        average_answer_seconds,
        technical_clarity,
        system_design,
    }
}

/// Score a set of interview answers.
///
/// The overall score is the question-weighted mean of per-answer scores. The
/// clarity, relevance and confidence categories use the same weights; the
/// system-design categories are plain means over system-design answers and
/// only appear when at least one such answer exists.
pub fn assess(
    context: &ScoringContext,
    answers: &[InterviewAnswer],
    keyword_sets: &BTreeMap<CategoryId, Vec<WeightedKeyword>>,
) -> InterviewAssessment {
    debug!("Assessing {} interview answers", answers.len());

    let vocab = Vocabularies::new(context);
    let measured: Vec<AnswerMetrics> = answers
        .iter()
        .map(|answer| measure(context, &vocab, keyword_sets, answer))
        .collect();

    let weighted = |value: fn(&AnswerMetrics) -> u8| -> u8 {
        let items: Vec<WeightedScore> = measured
            .iter()
            .map(|m| WeightedScore::new(value(m), context.question_weights.weight(m.category)))
            .collect();
        aggregate(&items)
    };

    let mut categories = vec![
        CategoryScore::new(
            CategoryId::Clarity,
            weighted(|m| m.clarity),
            &context.thresholds,
            KeywordBreakdown::default(),
        ),
        CategoryScore::new(
            CategoryId::Relevance,
            weighted(|m| m.relevance),
            &context.thresholds,
            merged_keywords(&measured, CategoryId::Relevance),
        ),
        CategoryScore::new(
            CategoryId::Confidence,
            weighted(|m| m.confidence),
            &context.thresholds,
            merged_keywords(&measured, CategoryId::Confidence),
        ),
    ];

    let design: Vec<SystemDesignScores> = measured.iter().filter_map(|m| m.system_design).collect();
    if !design.is_empty() {
        for (index, id) in CategoryId::SYSTEM_DESIGN.into_iter().enumerate() {
            let score = mean(design.iter().map(|s| f64::from(s.areas()[index].1))).unwrap_or_default();
            categories.push(CategoryScore::new(
                id,
                score.round() as u8,
                &context.thresholds,
                merged_keywords(&measured, id),
            ));
        }
    }

    let answer_scores: Vec<WeightedScore> = measured
        .iter()
        .map(|m| WeightedScore::new(m.score, context.question_weights.weight(m.category)))
        .collect();
    let overall = aggregate(&answer_scores);

    let metrics = session_metrics(answers, &measured, &categories);
    let report = compose(categories, overall, generate_feedback(&metrics));

    InterviewAssessment {
        answers: measured,
        metrics,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::aggregator::QuestionWeights;
    use crate::processing::feedback::INTERVIEW_FALLBACK;

    fn run(answers: &[InterviewAnswer]) -> InterviewAssessment {
        assess(&ScoringContext::default(), answers, &BTreeMap::new())
    }

    #[test]
    fn test_single_answer_metrics() {
        let answer = InterviewAnswer::new(
            QuestionCategory::General,
            "Led a team to improve system performance.",
            60.0,
        );
        let assessment = run(&[answer]);
        let metrics = &assessment.answers[0];

        assert_eq!(metrics.word_count, 8);
        assert_eq!(metrics.words_per_minute, 8);
        // density 71 -> 60 + 25
        assert_eq!(metrics.clarity, 85);
        // one strong verb
        assert_eq!(metrics.confidence, 70);
        // base 61, "team" and "improve" matched
        assert_eq!(metrics.relevance, 71);
        assert_eq!(metrics.score, 75);
        assert_eq!(assessment.report.overall_score, 75);
        assert!(metrics.system_design.is_none());
    }

    #[test]
    fn test_zero_answers() {
        let assessment = run(&[]);

        assert_eq!(assessment.report.overall_score, 0);
        assert_eq!(assessment.metrics, MetricBundle::default());
        assert_eq!(assessment.report.strengths, vec![INTERVIEW_FALLBACK.strength]);
        assert_eq!(assessment.report.improvements, vec![INTERVIEW_FALLBACK.improvement]);
    }

    #[test]
    fn test_empty_transcript_sits_on_floors() {
        let assessment = run(&[InterviewAnswer::new(QuestionCategory::Behavioral, "", 0.0)]);
        let metrics = &assessment.answers[0];

        assert_eq!(metrics.word_count, 0);
        assert_eq!(metrics.words_per_minute, 0);
        assert_eq!(metrics.clarity, 60);
        assert_eq!(metrics.confidence, 50);
        assert_eq!(metrics.relevance, 50);
        assert_eq!(assessment.metrics.words_per_minute, None);
    }

    #[test]
    fn test_fillers_and_hedges_lower_scores() {
        let direct = run(&[InterviewAnswer::new(
            QuestionCategory::Behavioral,
            "I resolved the conflict by meeting both engineers and agreeing on a decision.",
            40.0,
        )]);
        let hesitant = run(&[InterviewAnswer::new(
            QuestionCategory::Behavioral,
            "Um, I think I maybe resolved the conflict, like, basically by meeting both engineers, probably.",
            40.0,
        )]);

        assert!(hesitant.answers[0].filler_count >= 3);
        assert!(hesitant.answers[0].hedge_count >= 3);
        assert!(hesitant.answers[0].confidence < direct.answers[0].confidence);
        assert!(hesitant.answers[0].clarity < direct.answers[0].clarity);
    }

    #[test]
    fn test_system_design_answer_adds_areas() {
        let answer = InterviewAnswer::new(
            QuestionCategory::SystemDesign,
            "I would split the api into a queue-backed service, add a cache and shard the database, \
             and rely on retry with failover and monitoring for reliability.",
            120.0,
        );
        let assessment = run(&[answer]);
        let design = assessment.answers[0].system_design.unwrap();

        for (_, score) in design.areas() {
            assert!(score >= 60);
        }
        for id in CategoryId::SYSTEM_DESIGN {
            assert!(assessment.report.category(id).is_some());
        }
        let reliability = assessment.report.category(CategoryId::Reliability).unwrap();
        assert!(reliability.keywords.matched.contains(&"failover".to_string()));
        assert!(assessment.metrics.system_design.is_some());
    }

    #[test]
    fn test_no_system_design_categories_without_such_answers() {
        let assessment = run(&[InterviewAnswer::new(QuestionCategory::Technical, "I profiled memory usage.", 20.0)]);
        assert!(assessment.report.category(CategoryId::Architecture).is_none());
        assert_eq!(assessment.report.categories.len(), 3);
        assert!(assessment.metrics.technical_clarity.is_some());
    }

    #[test]
    fn test_overall_uses_question_weights() {
        let answers = [
            InterviewAnswer::new(QuestionCategory::Technical, "I debugged the memory leak in the thread pool and improved latency.", 30.0),
            InterviewAnswer::new(QuestionCategory::General, "ok", 5.0),
        ];
        let assessment = run(&answers);
        let weights = QuestionWeights::default();

        let expected = aggregate(&[
            WeightedScore::new(assessment.answers[0].score, weights.technical),
            WeightedScore::new(assessment.answers[1].score, weights.other),
        ]);
        assert_eq!(assessment.report.overall_score, expected);
    }

    #[test]
    fn test_relevance_keyword_override() {
        let mut sets = BTreeMap::new();
        sets.insert(CategoryId::Relevance, vec![WeightedKeyword::new("Kafka")]);
        let assessment = assess(
            &ScoringContext::default(),
            &[InterviewAnswer::new(QuestionCategory::Technical, "We used Kafka for ingestion.", 10.0)],
            &sets,
        );

        let relevance = assessment.report.category(CategoryId::Relevance).unwrap();
        assert_eq!(relevance.keywords.matched, vec!["Kafka"]);
        assert!(relevance.keywords.missing.is_empty());
    }

    #[test]
    fn test_answer_json_shape() {
        let json = r#"[{"question": "Tell me about a project", "category": "projectExperience",
                        "transcript": "I launched it.", "durationSeconds": 42.5},
                       {"transcript": "Hello"}]"#;
        let answers: Vec<InterviewAnswer> = serde_json::from_str(json).unwrap();

        assert_eq!(answers[0].category, QuestionCategory::ProjectExperience);
        assert_eq!(answers[0].duration_seconds, 42.5);
        assert_eq!(answers[1].category, QuestionCategory::General);
        assert_eq!(answers[1].duration_seconds, 0.0);
    }

    #[test]
    fn test_untimed_answers_leave_duration_metrics_empty() {
        let answers = [
            InterviewAnswer::new(QuestionCategory::Technical, "I profiled the service and fixed the leak.", 0.0),
            InterviewAnswer::new(QuestionCategory::Behavioral, "I mediated the disagreement.", f64::NAN),
        ];
        let assessment = run(&answers);

        assert_eq!(assessment.metrics.words_per_minute, None);
        assert_eq!(assessment.metrics.average_answer_seconds, None);
        assert!(!assessment
            .report
            .improvements
            .iter()
            .any(|i| i.contains("seconds")));
    }

    #[test]
    fn test_average_duration_ignores_untimed_answers() {
        let answers = [
            InterviewAnswer::new(QuestionCategory::Technical, "I profiled the service and fixed the leak.", 90.0),
            InterviewAnswer::new(QuestionCategory::General, "Thanks for having me.", 0.0),
        ];
        let assessment = run(&answers);

        assert_eq!(assessment.metrics.average_answer_seconds, Some(90));
        assert!(assessment
            .report
            .strengths
            .iter()
            .any(|s| s.contains("averaged 90 seconds")));
    }

    #[test]
    fn test_words_per_minute_edges() {
        assert_eq!(words_per_minute(150, 60.0), 150);
        assert_eq!(words_per_minute(10, 0.0), 0);
        assert_eq!(words_per_minute(10, -5.0), 0);
        assert_eq!(words_per_minute(10, f64::NAN), 0);
    }
}
