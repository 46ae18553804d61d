//! Scoring engine entry point

use crate::analysis::interview::{self, InterviewAnswer, InterviewAssessment};
use crate::analysis::polish::{PolishOutcome, Polisher};
use crate::analysis::{ats, ScoringContext};
use crate::config::Config;
use crate::error::Result;
use crate::processing::keyword_matcher::WeightedKeyword;
use crate::remote::{RemoteRequest, ReportService};
use crate::report::composer::{compose_with_fallback, ReportOutcome};
use crate::report::model::{AggregateReport, CategoryId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which surface a request is scored for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScoringMode {
    /// Resume against an optional job description (`reference_text`).
    Ats,
    /// A single resume sentence, bullet or summary.
    Polish,
    /// A set of interview answers; `text` is not scored in this mode.
    Interview { answers: Vec<InterviewAnswer> },
}

impl ScoringMode {
    pub fn name(&self) -> &'static str {
        match self {
            ScoringMode::Ats => "ats",
            ScoringMode::Polish => "polish",
            ScoringMode::Interview { .. } => "interview",
        }
    }
}

/// Immutable input to one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringInput {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_text: Option<String>,
    /// Replaces the built-in keyword set of the named categories.
    #[serde(default)]
    pub keyword_sets: BTreeMap<CategoryId, Vec<WeightedKeyword>>,
    /// Layered over the configured category weights.
    #[serde(default)]
    pub category_weights: BTreeMap<CategoryId, f64>,
    pub mode: ScoringMode,
}

impl ScoringInput {
    pub fn new(text: impl Into<String>, mode: ScoringMode) -> Self {
        Self {
            text: text.into(),
            reference_text: None,
            keyword_sets: BTreeMap::new(),
            category_weights: BTreeMap::new(),
            mode,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference_text = Some(reference.into());
        self
    }

    pub fn with_keywords(mut self, id: CategoryId, keywords: Vec<WeightedKeyword>) -> Self {
        self.keyword_sets.insert(id, keywords);
        self
    }

    pub fn with_weight(mut self, id: CategoryId, weight: f64) -> Self {
        self.category_weights.insert(id, weight);
        self
    }
}

/// Stateless scoring engine. Safe to share across threads; every call builds
/// its intermediate state from scratch.
pub struct ScoringEngine {
    context: ScoringContext,
    polisher: Polisher,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            context: ScoringContext::default(),
            polisher: Polisher::new(),
        }
    }
}

impl ScoringEngine {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            context: ScoringContext::from_config(config)?,
            polisher: Polisher::new(),
        })
    }

    pub fn context(&self) -> &ScoringContext {
        &self.context
    }

    /// Score locally. Never fails; degenerate input yields zero scores and
    /// fallback feedback.
    pub fn score(&self, input: &ScoringInput) -> AggregateReport {
        debug!("Scoring {} request ({} chars)", input.mode.name(), input.text.len());

        match &input.mode {
            ScoringMode::Ats => ats::score(&self.context, input),
            ScoringMode::Polish => self.polisher.polish_input(&self.context, input).report,
            ScoringMode::Interview { answers } => {
                interview::assess(&self.context, answers, &input.keyword_sets).report
            }
        }
    }

    pub fn polish(&self, text: &str) -> PolishOutcome {
        self.polisher.polish(&self.context, text)
    }

    pub fn assess_interview(&self, answers: &[InterviewAnswer]) -> InterviewAssessment {
        interview::assess(&self.context, answers, &BTreeMap::new())
    }

    /// Try `service` first and fall back to [`ScoringEngine::score`].
    pub async fn score_with_fallback<S: ReportService>(
        &self,
        input: &ScoringInput,
        service: Option<&S>,
    ) -> ReportOutcome {
        let request = RemoteRequest::new(input);
        compose_with_fallback(service, &request, || self.score(input)).await
    }
}
