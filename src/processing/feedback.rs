//! Threshold-driven feedback
//!
//! Feedback is a projection of numeric metrics onto canned messages: an
//! ordered table of rules is evaluated in sequence and every rule whose
//! predicate holds contributes its message. Lists that end up empty receive a
//! single fallback message.

use crate::report::model::CategoryId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Strength,
    Improvement,
}

/// One row of a feedback table.
pub struct FeedbackRule<M> {
    pub polarity: Polarity,
    pub applies: fn(&M) -> bool,
    pub message: fn(&M) -> String,
}

#[derive(Debug, Clone, Copy)]
pub struct FallbackMessages {
    pub strength: &'static str,
    pub improvement: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// Evaluate `rules` in order against `metrics`.
pub fn evaluate_rules<M>(
    rules: &[FeedbackRule<M>],
    metrics: &M,
    fallback: &FallbackMessages,
) -> Feedback {
    let mut feedback = Feedback::default();

    for rule in rules {
        if !(rule.applies)(metrics) {
            continue;
        }
        let message = (rule.message)(metrics);
        let list = match rule.polarity {
            Polarity::Strength => &mut feedback.strengths,
            Polarity::Improvement => &mut feedback.improvements,
        };
        if !list.contains(&message) {
            list.push(message);
        }
    }

    if feedback.strengths.is_empty() {
        feedback.strengths.push(fallback.strength.to_string());
    }
    if feedback.improvements.is_empty() {
        feedback.improvements.push(fallback.improvement.to_string());
    }

    feedback
}

pub const IDEAL_PACE_MIN_WPM: u32 = 120;
pub const IDEAL_PACE_MAX_WPM: u32 = 160;
pub const FAST_PACE_WPM: u32 = 170;
pub const SLOW_PACE_WPM: u32 = 90;
pub const STRONG_METRIC: u8 = 88;
pub const WEAK_METRIC: u8 = 80;
pub const STRONG_TECHNICAL_CLARITY: u8 = 85;
pub const SHORT_ANSWER_SECS: u32 = 30;
pub const IDEAL_ANSWER_MAX_SECS: u32 = 180;
pub const LONG_ANSWER_SECS: u32 = 240;
pub const WEAK_SYSTEM_DESIGN: u8 = 70;
pub const STRONG_SYSTEM_DESIGN: u8 = 80;

/// Sub-scores of system-design answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemDesignScores {
    pub architecture: u8,
    pub scalability: u8,
    pub reliability: u8,
}

impl SystemDesignScores {
    pub fn areas(&self) -> [(CategoryId, u8); 3] {
        [
            (CategoryId::Architecture, self.architecture),
            (CategoryId::Scalability, self.scalability),
            (CategoryId::Reliability, self.reliability),
        ]
    }
}

/// Session-level interview metrics. Every field is absent when no answer
/// contributed to it, which keeps all rules silent for an empty session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBundle {
    pub words_per_minute: Option<u32>,
    pub clarity: Option<u8>,
    pub relevance: Option<u8>,
    pub confidence: Option<u8>,
    pub average_answer_seconds: Option<u32>,
    pub technical_clarity: Option<u8>,
    pub system_design: Option<SystemDesignScores>,
}

pub const INTERVIEW_FALLBACK: FallbackMessages = FallbackMessages {
    strength: "You completed the interview. Keep practicing to build on this foundation.",
    improvement: "Practice structuring answers around a concrete example and a measurable result.",
};

fn weak_area(metrics: &MetricBundle, id: CategoryId) -> bool {
    metrics
        .system_design
        .map(|s| s.areas().iter().any(|(area, score)| *area == id && *score < WEAK_SYSTEM_DESIGN))
        .unwrap_or(false)
}

fn wpm(metrics: &MetricBundle) -> u32 {
    metrics.words_per_minute.unwrap_or_default()
}

fn seconds(metrics: &MetricBundle) -> u32 {
    metrics.average_answer_seconds.unwrap_or_default()
}

pub const INTERVIEW_RULES: &[FeedbackRule<MetricBundle>] = &[
    // Speaking pace
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| matches!(m.words_per_minute, Some(w) if (IDEAL_PACE_MIN_WPM..=IDEAL_PACE_MAX_WPM).contains(&w)),
        message: |m| format!("Your speaking pace of {} words per minute is easy to follow.", wpm(m)),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| matches!(m.words_per_minute, Some(w) if w > FAST_PACE_WPM),
        message: |m| format!("Slow down a little: {} words per minute is hard for interviewers to follow.", wpm(m)),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| matches!(m.words_per_minute, Some(w) if w > 0 && w < SLOW_PACE_WPM),
        message: |m| format!("Pick up the pace: {} words per minute can come across as hesitant.", wpm(m)),
    },
    // Answer quality
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| matches!(m.relevance, Some(v) if v >= STRONG_METRIC),
        message: |_| "Your answers stayed focused on the questions asked.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| matches!(m.relevance, Some(v) if v < WEAK_METRIC),
        message: |_| "Tie each answer back to the question with role-specific details.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| matches!(m.clarity, Some(v) if v >= STRONG_METRIC),
        message: |_| "You explained your ideas clearly and concisely.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| matches!(m.clarity, Some(v) if v < WEAK_METRIC),
        message: |_| "Cut filler words and lead with the main point to improve clarity.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| matches!(m.confidence, Some(v) if v >= STRONG_METRIC),
        message: |_| "You described your contributions with confidence.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| matches!(m.confidence, Some(v) if v < WEAK_METRIC),
        message: |_| "Replace hedging phrases with direct statements about what you did.".to_string(),
    },
    // Answer length
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| matches!(m.average_answer_seconds, Some(s) if (SHORT_ANSWER_SECS..=IDEAL_ANSWER_MAX_SECS).contains(&s)),
        message: |m| format!("Your answers averaged {} seconds, a comfortable length.", seconds(m)),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| matches!(m.average_answer_seconds, Some(s) if s < SHORT_ANSWER_SECS),
        message: |m| format!("Your answers averaged only {} seconds. Add context and outcomes.", seconds(m)),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| matches!(m.average_answer_seconds, Some(s) if s > LONG_ANSWER_SECS),
        message: |m| format!("Your answers averaged {} seconds. Tighten them to the essentials.", seconds(m)),
    },
    // Category-specific
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| matches!(m.technical_clarity, Some(v) if v >= STRONG_TECHNICAL_CLARITY),
        message: |_| "Technical answers were explained clearly.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Strength,
        applies: |m| {
            m.system_design
                .map(|s| s.areas().iter().all(|(_, score)| *score >= STRONG_SYSTEM_DESIGN))
                .unwrap_or(false)
        },
        message: |_| "System design answers covered structure, growth and failure handling well.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| weak_area(m, CategoryId::Architecture),
        message: |_| "Strengthen the architecture part of system design answers: name the components and how they interact.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| weak_area(m, CategoryId::Scalability),
        message: |_| "Strengthen the scalability part of system design answers: discuss caching, sharding or load balancing.".to_string(),
    },
    FeedbackRule {
        polarity: Polarity::Improvement,
        applies: |m| weak_area(m, CategoryId::Reliability),
        message: |_| "Strengthen the reliability part of system design answers: cover failover, retries and monitoring.".to_string(),
    },
];

/// Interview feedback for a metric bundle. Never returns an empty list.
pub fn generate_feedback(metrics: &MetricBundle) -> Feedback {
    evaluate_rules(INTERVIEW_RULES, metrics, &INTERVIEW_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bundle_yields_only_fallbacks() {
        let feedback = generate_feedback(&MetricBundle::default());
        assert_eq!(feedback.strengths, vec![INTERVIEW_FALLBACK.strength]);
        assert_eq!(feedback.improvements, vec![INTERVIEW_FALLBACK.improvement]);
    }

    #[test]
    fn test_pace_bands() {
        let ideal = generate_feedback(&MetricBundle {
            words_per_minute: Some(140),
            ..Default::default()
        });
        assert!(ideal.strengths[0].contains("140 words per minute"));
        assert_eq!(ideal.improvements, vec![INTERVIEW_FALLBACK.improvement]);

        let fast = generate_feedback(&MetricBundle {
            words_per_minute: Some(185),
            ..Default::default()
        });
        assert!(fast.improvements[0].starts_with("Slow down"));

        let slow = generate_feedback(&MetricBundle {
            words_per_minute: Some(8),
            ..Default::default()
        });
        assert!(slow.improvements[0].starts_with("Pick up the pace"));

        let between = generate_feedback(&MetricBundle {
            words_per_minute: Some(165),
            ..Default::default()
        });
        assert_eq!(between.strengths, vec![INTERVIEW_FALLBACK.strength]);
        assert_eq!(between.improvements, vec![INTERVIEW_FALLBACK.improvement]);
    }

    #[test]
    fn test_quality_thresholds() {
        let feedback = generate_feedback(&MetricBundle {
            clarity: Some(90),
            relevance: Some(70),
            confidence: Some(85),
            ..Default::default()
        });
        assert_eq!(feedback.strengths, vec!["You explained your ideas clearly and concisely."]);
        assert_eq!(
            feedback.improvements,
            vec!["Tie each answer back to the question with role-specific details."]
        );
    }

    #[test]
    fn test_weak_system_design_area_is_named() {
        let feedback = generate_feedback(&MetricBundle {
            system_design: Some(SystemDesignScores {
                architecture: 85,
                scalability: 62,
                reliability: 90,
            }),
            ..Default::default()
        });
        assert_eq!(feedback.improvements.len(), 1);
        assert!(feedback.improvements[0].contains("scalability"));
    }

    fn with_seconds(seconds: u32) -> Feedback {
        generate_feedback(&MetricBundle {
            average_answer_seconds: Some(seconds),
            ..Default::default()
        })
    }

    #[test]
    fn test_comfortable_answer_length_is_a_strength() {
        for seconds in [30, 90, 180] {
            let feedback = with_seconds(seconds);
            assert_eq!(
                feedback.strengths,
                vec![format!("Your answers averaged {} seconds, a comfortable length.", seconds)]
            );
            assert_eq!(feedback.improvements, vec![INTERVIEW_FALLBACK.improvement]);
        }
    }

    #[test]
    fn test_short_answers_are_an_improvement() {
        let feedback = with_seconds(29);
        assert_eq!(
            feedback.improvements,
            vec!["Your answers averaged only 29 seconds. Add context and outcomes."]
        );
        assert_eq!(feedback.strengths, vec![INTERVIEW_FALLBACK.strength]);
    }

    #[test]
    fn test_long_answers_are_an_improvement() {
        let feedback = with_seconds(241);
        assert_eq!(
            feedback.improvements,
            vec!["Your answers averaged 241 seconds. Tighten them to the essentials."]
        );
        assert_eq!(feedback.strengths, vec![INTERVIEW_FALLBACK.strength]);
    }

    #[test]
    fn test_answer_length_between_bands_is_silent() {
        for seconds in [181, 240] {
            let feedback = with_seconds(seconds);
            assert_eq!(feedback.strengths, vec![INTERVIEW_FALLBACK.strength]);
            assert_eq!(feedback.improvements, vec![INTERVIEW_FALLBACK.improvement]);
        }
    }

    #[test]
    fn test_technical_clarity_strength() {
        let clear = generate_feedback(&MetricBundle {
            technical_clarity: Some(85),
            ..Default::default()
        });
        assert_eq!(clear.strengths, vec!["Technical answers were explained clearly."]);

        let short_of_it = generate_feedback(&MetricBundle {
            technical_clarity: Some(84),
            ..Default::default()
        });
        assert_eq!(short_of_it.strengths, vec![INTERVIEW_FALLBACK.strength]);
    }

    #[test]
    fn test_strong_system_design_in_every_area() {
        let strong = generate_feedback(&MetricBundle {
            system_design: Some(SystemDesignScores {
                architecture: 80,
                scalability: 92,
                reliability: 80,
            }),
            ..Default::default()
        });
        assert_eq!(
            strong.strengths,
            vec!["System design answers covered structure, growth and failure handling well."]
        );
        assert_eq!(strong.improvements, vec![INTERVIEW_FALLBACK.improvement]);

        let one_short = generate_feedback(&MetricBundle {
            system_design: Some(SystemDesignScores {
                architecture: 80,
                scalability: 92,
                reliability: 79,
            }),
            ..Default::default()
        });
        assert_eq!(one_short.strengths, vec![INTERVIEW_FALLBACK.strength]);
        assert_eq!(one_short.improvements, vec![INTERVIEW_FALLBACK.improvement]);
    }

    #[test]
    fn test_duplicate_messages_are_dropped() {
        let rules: &[FeedbackRule<u8>] = &[
            FeedbackRule {
                polarity: Polarity::Strength,
                applies: |v| *v > 10,
                message: |_| "same".to_string(),
            },
            FeedbackRule {
                polarity: Polarity::Strength,
                applies: |v| *v > 20,
                message: |_| "same".to_string(),
            },
        ];
        let feedback = evaluate_rules(rules, &50, &INTERVIEW_FALLBACK);
        assert_eq!(feedback.strengths, vec!["same"]);
        assert_eq!(feedback.improvements.len(), 1);
    }
}
