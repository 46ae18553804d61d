//! Configuration management for the resume scorer

use crate::error::{Result, ScoringError};
use crate::processing::aggregator::{CategoryWeights, QuestionWeights};
use crate::processing::category_scorer::{BonusPolicy, KEYWORD_BONUS_CAP, KEYWORD_BONUS_PER_HIT};
use crate::report::model::{CategoryId, StatusThresholds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Lowest score a system-design sub-score can receive.
pub const SYSTEM_DESIGN_FLOOR: i32 = 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub weights: WeightsConfig,
    pub keywords: KeywordConfig,
    pub remote: RemoteConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub keyword_bonus_per_hit: i32,
    pub keyword_bonus_cap: i32,
    pub system_design_floor: i32,
    pub good_threshold: u8,
    pub warning_threshold: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    /// Category weight overrides keyed by category name, e.g. `keywords = 1.5`.
    pub categories: BTreeMap<String, f64>,
    pub questions: QuestionWeights,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Appended to the built-in skill database when reading job descriptions.
    pub extra_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strong_verbs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalability: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reliability: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_bonus_per_hit: KEYWORD_BONUS_PER_HIT,
            keyword_bonus_cap: KEYWORD_BONUS_CAP,
            system_design_floor: SYSTEM_DESIGN_FLOOR,
            good_threshold: StatusThresholds::default().good,
            warning_threshold: StatusThresholds::default().warning,
        }
    }
}

impl ScoringConfig {
    pub fn bonus_policy(&self) -> BonusPolicy {
        BonusPolicy {
            per_hit: self.keyword_bonus_per_hit,
            cap: self.keyword_bonus_cap,
        }
    }

    pub fn thresholds(&self) -> StatusThresholds {
        StatusThresholds {
            good: self.good_threshold,
            warning: self.warning_threshold,
        }
    }
}

impl WeightsConfig {
    pub fn category_weights(&self) -> Result<CategoryWeights> {
        let mut overrides = BTreeMap::new();
        for (name, weight) in &self.categories {
            let id: CategoryId = name.parse().map_err(|_| {
                ScoringError::Configuration(format!("Unknown category in [weights.categories]: {}", name))
            })?;
            overrides.insert(id, *weight);
        }
        Ok(CategoryWeights::new(overrides))
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

impl RemoteConfig {
    /// The endpoint to delegate to, if delegation is switched on.
    pub fn active_endpoint(&self) -> Option<&str> {
        if self.enabled {
            self.endpoint.as_deref().filter(|e| !e.trim().is_empty())
        } else {
            None
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing the defaults there on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScoringError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScoringError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// The file a command works on: `explicit` when given, else the default location.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map(Path::to_path_buf).unwrap_or_else(Self::config_path)
    }

    /// Overwrite `path` with the defaults without reading what is there, so a
    /// file that no longer parses can still be reset.
    pub fn reset_at(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scorer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        if scoring.keyword_bonus_per_hit < 0 || scoring.keyword_bonus_cap < 0 {
            return Err(ScoringError::Configuration(
                "Keyword bonus values must not be negative".to_string(),
            ));
        }
        if !(0..=100).contains(&scoring.system_design_floor) {
            return Err(ScoringError::Configuration(format!(
                "system_design_floor must be within 0-100, got {}",
                scoring.system_design_floor
            )));
        }
        if scoring.warning_threshold > scoring.good_threshold || scoring.good_threshold > 100 {
            return Err(ScoringError::Configuration(
                "Status thresholds must satisfy warning <= good <= 100".to_string(),
            ));
        }
        self.weights.category_weights()?;
        Ok(())
    }
}
