//! Scoring surfaces built on the processing primitives
//!
//! Each surface (ATS checker, polish panel, interview report) derives its own
//! base scores and metrics, then hands them to the shared category scorer,
//! aggregator, feedback tables and report composer.

pub mod ats;
pub mod engine;
pub mod interview;
pub mod polish;

use crate::config::Config;
use crate::error::Result;
use crate::processing::aggregator::{CategoryWeights, QuestionWeights};
use crate::processing::category_scorer::CategoryScorer;
use crate::processing::keyword_matcher::WeightedKeyword;
use crate::processing::tokenizer::Tokenizer;
use crate::processing::vocabulary;
use crate::report::model::{CategoryId, ScoreBounds, StatusThresholds};
use std::collections::BTreeMap;

/// Explicit configuration handed to every scoring call. Built once from a
/// [`Config`]; nothing downstream reads configuration on its own.
pub struct ScoringContext {
    pub tokenizer: Tokenizer,
    pub scorer: CategoryScorer,
    pub thresholds: StatusThresholds,
    pub category_weights: CategoryWeights,
    pub question_weights: QuestionWeights,
    pub system_design_floor: i32,
    pub skill_database: Vec<String>,
    pub strong_verbs: Vec<WeightedKeyword>,
    pub architecture_terms: Vec<WeightedKeyword>,
    pub scalability_terms: Vec<WeightedKeyword>,
    pub reliability_terms: Vec<WeightedKeyword>,
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self::build(&Config::default(), CategoryWeights::default())
    }
}

impl ScoringContext {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, config.weights.category_weights()?))
    }

    fn build(config: &Config, category_weights: CategoryWeights) -> Self {
        let keywords = &config.keywords;

        Self {
            tokenizer: Tokenizer::new(),
            scorer: CategoryScorer::new(config.scoring.bonus_policy()),
            thresholds: config.scoring.thresholds(),
            category_weights,
            question_weights: config.weights.questions,
            system_design_floor: config.scoring.system_design_floor,
            skill_database: vocabulary::skill_database(&keywords.extra_skills),
            strong_verbs: vocabulary_or(&keywords.strong_verbs, vocabulary::STRONG_VERBS),
            architecture_terms: vocabulary_or(&keywords.architecture, vocabulary::ARCHITECTURE_TERMS),
            scalability_terms: vocabulary_or(&keywords.scalability, vocabulary::SCALABILITY_TERMS),
            reliability_terms: vocabulary_or(&keywords.reliability, vocabulary::RELIABILITY_TERMS),
        }
    }

    /// Bounds for a category: system-design areas start at the configured floor.
    pub fn bounds(&self, id: CategoryId) -> ScoreBounds {
        if id.is_system_design() {
            ScoreBounds::new(self.system_design_floor, 100)
        } else {
            ScoreBounds::FULL
        }
    }

    pub fn system_design_terms(&self, id: CategoryId) -> &[WeightedKeyword] {
        match id {
            CategoryId::Architecture => &self.architecture_terms,
            CategoryId::Scalability => &self.scalability_terms,
            CategoryId::Reliability => &self.reliability_terms,
            CategoryId::Format
            | CategoryId::Keywords
            | CategoryId::Content
            | CategoryId::Readability
            | CategoryId::Impact
            | CategoryId::Clarity
            | CategoryId::Conciseness
            | CategoryId::Relevance
            | CategoryId::Confidence => &[],
        }
    }
}

fn vocabulary_or(configured: &Option<Vec<String>>, default: &[&str]) -> Vec<WeightedKeyword> {
    match configured {
        Some(terms) => terms.iter().map(|t| WeightedKeyword::new(t.as_str())).collect(),
        None => vocabulary::keywords(default),
    }
}

/// Caller-supplied keyword set for `id`, or `default` when none was given.
pub(crate) fn keyword_set<'a>(
    overrides: &'a BTreeMap<CategoryId, Vec<WeightedKeyword>>,
    id: CategoryId,
    default: &'a [WeightedKeyword],
) -> &'a [WeightedKeyword] {
    overrides.get(&id).map(|k| k.as_slice()).unwrap_or(default)
}
