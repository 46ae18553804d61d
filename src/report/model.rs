//! Report data model shared by every scoring surface

use crate::error::ScoringError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of scored categories across the ATS, polish and interview surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Format,
    Keywords,
    Content,
    Readability,
    Impact,
    Clarity,
    Conciseness,
    Relevance,
    Confidence,
    Architecture,
    Scalability,
    Reliability,
}

impl CategoryId {
    pub const ATS: [CategoryId; 4] = [
        CategoryId::Format,
        CategoryId::Keywords,
        CategoryId::Content,
        CategoryId::Readability,
    ];

    pub const POLISH: [CategoryId; 3] = [
        CategoryId::Impact,
        CategoryId::Clarity,
        CategoryId::Conciseness,
    ];

    pub const SYSTEM_DESIGN: [CategoryId; 3] = [
        CategoryId::Architecture,
        CategoryId::Scalability,
        CategoryId::Reliability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Format => "format",
            CategoryId::Keywords => "keywords",
            CategoryId::Content => "content",
            CategoryId::Readability => "readability",
            CategoryId::Impact => "impact",
            CategoryId::Clarity => "clarity",
            CategoryId::Conciseness => "conciseness",
            CategoryId::Relevance => "relevance",
            CategoryId::Confidence => "confidence",
            CategoryId::Architecture => "architecture",
            CategoryId::Scalability => "scalability",
            CategoryId::Reliability => "reliability",
        }
    }

    /// Human readable label used in feedback and console output.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryId::Format => "Format",
            CategoryId::Keywords => "Keywords",
            CategoryId::Content => "Content",
            CategoryId::Readability => "Readability",
            CategoryId::Impact => "Impact",
            CategoryId::Clarity => "Clarity",
            CategoryId::Conciseness => "Conciseness",
            CategoryId::Relevance => "Relevance",
            CategoryId::Confidence => "Confidence",
            CategoryId::Architecture => "Architecture",
            CategoryId::Scalability => "Scalability",
            CategoryId::Reliability => "Reliability",
        }
    }

    pub fn is_system_design(&self) -> bool {
        matches!(
            self,
            CategoryId::Architecture | CategoryId::Scalability | CategoryId::Reliability
        )
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "format" => Ok(CategoryId::Format),
            "keywords" => Ok(CategoryId::Keywords),
            "content" => Ok(CategoryId::Content),
            "readability" => Ok(CategoryId::Readability),
            "impact" => Ok(CategoryId::Impact),
            "clarity" => Ok(CategoryId::Clarity),
            "conciseness" => Ok(CategoryId::Conciseness),
            "relevance" => Ok(CategoryId::Relevance),
            "confidence" => Ok(CategoryId::Confidence),
            "architecture" => Ok(CategoryId::Architecture),
            "scalability" => Ok(CategoryId::Scalability),
            "reliability" => Ok(CategoryId::Reliability),
            other => Err(ScoringError::InvalidInput(format!(
                "Unknown category: {}",
                other
            ))),
        }
    }
}

/// Inclusive score range a category result is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pub floor: i32,
    pub ceiling: i32,
}

impl ScoreBounds {
    pub const FULL: ScoreBounds = ScoreBounds {
        floor: 0,
        ceiling: 100,
    };

    /// Builds bounds, swapping the ends if they were supplied reversed and
    /// keeping both inside 0-100.
    pub fn new(floor: i32, ceiling: i32) -> Self {
        let (low, high) = if floor <= ceiling {
            (floor, ceiling)
        } else {
            (ceiling, floor)
        };
        Self {
            floor: low.clamp(0, 100),
            ceiling: high.clamp(0, 100),
        }
    }

    /// Clamp `value` into these bounds. The fields are public, so reversed or
    /// out-of-range bounds are normalised here the same way `new` does.
    pub fn clamp(&self, value: i32) -> i32 {
        let normalized = Self::new(self.floor, self.ceiling);
        value.clamp(normalized.floor, normalized.ceiling)
    }
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    Good,
    Warning,
    Error,
}

impl ScoreStatus {
    pub fn from_score(score: u8, thresholds: &StatusThresholds) -> Self {
        if score >= thresholds.good {
            ScoreStatus::Good
        } else if score >= thresholds.warning {
            ScoreStatus::Warning
        } else {
            ScoreStatus::Error
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreStatus::Good => "good",
            ScoreStatus::Warning => "warning",
            ScoreStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub good: u8,
    pub warning: u8,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            good: 80,
            warning: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordBreakdown {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub id: CategoryId,
    #[serde(rename = "score")]
    pub raw_score: u8,
    pub status: ScoreStatus,
    #[serde(default)]
    pub keywords: KeywordBreakdown,
}

impl CategoryScore {
    pub fn new(
        id: CategoryId,
        raw_score: u8,
        thresholds: &StatusThresholds,
        keywords: KeywordBreakdown,
    ) -> Self {
        Self {
            id,
            raw_score,
            status: ScoreStatus::from_score(raw_score, thresholds),
            keywords,
        }
    }
}

/// Final structured result of one scoring request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub overall_score: u8,
    pub categories: Vec<CategoryScore>,
    #[serde(default)]
    pub keywords: KeywordBreakdown,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl AggregateReport {
    pub fn category(&self, id: CategoryId) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.id == id)
    }
}
