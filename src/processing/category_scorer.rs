//! Bounded keyword-bonus scoring shared by the ATS and interview surfaces

use crate::processing::keyword_matcher::{match_keywords, KeywordMatch, WeightedKeyword};
use crate::report::model::ScoreBounds;
use serde::{Deserialize, Serialize};

/// Points awarded per matched keyword.
pub const KEYWORD_BONUS_PER_HIT: i32 = 5;
/// Maximum total keyword bonus for one category.
pub const KEYWORD_BONUS_CAP: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusPolicy {
    pub per_hit: i32,
    pub cap: i32,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self {
            per_hit: KEYWORD_BONUS_PER_HIT,
            cap: KEYWORD_BONUS_CAP,
        }
    }
}

impl BonusPolicy {
    pub fn bonus(&self, hit_count: usize) -> i32 {
        let hits = i32::try_from(hit_count).unwrap_or(i32::MAX);
        hits.saturating_mul(self.per_hit).min(self.cap).max(0)
    }
}

/// A category score together with the keyword match that produced its bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCategory {
    pub score: u8,
    pub bonus: i32,
    pub keywords: KeywordMatch,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryScorer {
    policy: BonusPolicy,
}

impl CategoryScorer {
    pub fn new(policy: BonusPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &BonusPolicy {
        &self.policy
    }

    /// `clamp(base + min(cap, hits * per_hit), floor, ceiling)`.
    ///
    /// How `base` was derived is up to the caller.
    pub fn score(
        &self,
        base: i32,
        text: &str,
        keywords: &[WeightedKeyword],
        bounds: ScoreBounds,
    ) -> i32 {
        i32::from(self.score_detailed(base, text, keywords, bounds).score)
    }

    pub fn score_detailed(
        &self,
        base: i32,
        text: &str,
        keywords: &[WeightedKeyword],
        bounds: ScoreBounds,
    ) -> ScoredCategory {
        if text.trim().is_empty() {
            let nothing_found = KeywordMatch {
                missing: keywords.iter().map(|k| k.term.clone()).collect(),
                ..Default::default()
            };
            return self.apply(base, nothing_found, bounds);
        }
        self.apply(base, match_keywords(text, keywords), bounds)
    }

    /// Apply the bonus and clamp for a keyword match computed elsewhere.
    pub fn apply(&self, base: i32, keywords: KeywordMatch, bounds: ScoreBounds) -> ScoredCategory {
        let bonus = self.policy.bonus(keywords.hit_count);
        let score = bounds.clamp(base.saturating_add(bonus));

        ScoredCategory {
            score: u8::try_from(score).unwrap_or(100),
            bonus,
            keywords,
        }
    }
}
