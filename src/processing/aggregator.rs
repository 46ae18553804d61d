//! Weighted mean aggregation of category and answer scores

use crate::report::model::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedScore {
    pub score: u8,
    pub weight: f64,
}

impl WeightedScore {
    pub fn new(score: u8, weight: f64) -> Self {
        Self { score, weight }
    }
}

/// `round(Σ score·weight / Σ weight)`, or 0 when the total weight is zero.
///
/// Negative and non-finite weights count as zero, so an empty list or an
/// all-zero weight set yields 0 rather than NaN.
pub fn aggregate(items: &[WeightedScore]) -> u8 {
    let (weighted_sum, weight_total) = items.iter().fold((0.0_f64, 0.0_f64), |(sum, total), item| {
        let weight = sanitize_weight(item.weight);
        (sum + f64::from(item.score) * weight, total + weight)
    });

    if weight_total > 0.0 {
        (weighted_sum / weight_total).round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Interview question kinds, each carrying its own aggregation weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionCategory {
    Technical,
    ProjectExperience,
    Behavioral,
    SystemDesign,
    #[default]
    General,
}

impl QuestionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionCategory::Technical => "Technical",
            QuestionCategory::ProjectExperience => "Project Experience",
            QuestionCategory::Behavioral => "Behavioral",
            QuestionCategory::SystemDesign => "System Design",
            QuestionCategory::General => "General",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Up-weights harder question types without per-question overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionWeights {
    pub technical: f64,
    pub project_experience: f64,
    pub behavioral: f64,
    pub other: f64,
}

impl Default for QuestionWeights {
    fn default() -> Self {
        Self {
            technical: 1.15,
            project_experience: 1.10,
            behavioral: 1.05,
            other: 1.00,
        }
    }
}

impl QuestionWeights {
    pub fn weight(&self, category: QuestionCategory) -> f64 {
        match category {
            QuestionCategory::Technical => self.technical,
            QuestionCategory::ProjectExperience => self.project_experience,
            QuestionCategory::Behavioral => self.behavioral,
            QuestionCategory::SystemDesign | QuestionCategory::General => self.other,
        }
    }
}

/// Per-category weights for report aggregation. Unspecified categories weigh
/// 1.0 and overrides are raised to at least 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    overrides: BTreeMap<CategoryId, f64>,
}

impl CategoryWeights {
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    pub fn new(overrides: BTreeMap<CategoryId, f64>) -> Self {
        Self { overrides }
    }

    pub fn weight(&self, id: CategoryId) -> f64 {
        match self.overrides.get(&id) {
            Some(w) if w.is_finite() => w.max(Self::DEFAULT_WEIGHT),
            _ => Self::DEFAULT_WEIGHT,
        }
    }

    /// Layer `other` on top of `self`; entries in `other` win.
    pub fn merged(&self, other: &BTreeMap<CategoryId, f64>) -> Self {
        let mut overrides = self.overrides.clone();
        overrides.extend(other.iter().map(|(k, v)| (*k, *v)));
        Self { overrides }
    }
}
