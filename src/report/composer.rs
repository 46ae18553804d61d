//! Report assembly and the remote-first, local-fallback protocol

use crate::processing::aggregator::{aggregate, CategoryWeights, WeightedScore};
use crate::processing::feedback::Feedback;
use crate::remote::{RemoteRequest, ReportService};
use crate::report::model::{AggregateReport, CategoryScore, KeywordBreakdown};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Assemble the final report. Top-level keywords are the union of the
/// per-category lists, de-duplicated case-insensitively in first-seen order;
/// a keyword matched by any category is not reported missing.
pub fn compose(categories: Vec<CategoryScore>, overall_score: u8, feedback: Feedback) -> AggregateReport {
    let mut matched = Vec::new();
    let mut seen_matched = HashSet::new();
    for keyword in categories.iter().flat_map(|c| &c.keywords.matched) {
        if seen_matched.insert(keyword.to_lowercase()) {
            matched.push(keyword.clone());
        }
    }

    let mut missing = Vec::new();
    let mut seen_missing = HashSet::new();
    for keyword in categories.iter().flat_map(|c| &c.keywords.missing) {
        let key = keyword.to_lowercase();
        if !seen_matched.contains(&key) && seen_missing.insert(key) {
            missing.push(keyword.clone());
        }
    }

    AggregateReport {
        overall_score: overall_score.min(100),
        categories,
        keywords: KeywordBreakdown { matched, missing },
        strengths: feedback.strengths,
        improvements: feedback.improvements,
    }
}

/// Weighted mean of category scores using `weights`.
pub fn overall_from_categories(categories: &[CategoryScore], weights: &CategoryWeights) -> u8 {
    let items: Vec<WeightedScore> = categories
        .iter()
        .map(|c| WeightedScore::new(c.raw_score, weights.weight(c.id)))
        .collect();
    aggregate(&items)
}

/// States of a single scoring request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportPhase {
    Idle,
    RequestingRemote,
    RemoteSucceeded,
    RemoteFailed,
    ComputingLocal,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportSource {
    Remote,
    Local,
}

/// A report plus how it was obtained. Always carries a valid report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutcome {
    pub report: AggregateReport,
    pub source: ReportSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub phases: Vec<ReportPhase>,
}

/// Ask `service` for a report and fall back to `local` on any failure.
///
/// With no service the request goes straight to local computation. There is
/// exactly one remote attempt and no retry.
pub async fn compose_with_fallback<S, F>(
    service: Option<&S>,
    request: &RemoteRequest,
    local: F,
) -> ReportOutcome
where
    S: ReportService,
    F: FnOnce() -> AggregateReport,
{
    let mut phases = vec![ReportPhase::Idle];
    let mut warning = None;

    if let Some(service) = service {
        phases.push(ReportPhase::RequestingRemote);
        match service.request_report(request).await {
            Ok(report) => {
                info!("Remote report received with overall score {}", report.overall_score);
                phases.push(ReportPhase::RemoteSucceeded);
                phases.push(ReportPhase::Done);
                return ReportOutcome {
                    report,
                    source: ReportSource::Remote,
                    warning: None,
                    phases,
                };
            }
            Err(e) => {
                warn!("Remote scoring unavailable, using local engine: {}", e);
                phases.push(ReportPhase::RemoteFailed);
                warning = Some(format!("Remote scoring unavailable: {}", e));
            }
        }
    } else {
        debug!("No remote report service configured");
    }

    phases.push(ReportPhase::ComputingLocal);
    let report = local();
    phases.push(ReportPhase::Done);

    ReportOutcome {
        report,
        source: ReportSource::Local,
        warning,
        phases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::{CategoryId, StatusThresholds};

    fn category(id: CategoryId, score: u8, matched: &[&str], missing: &[&str]) -> CategoryScore {
        CategoryScore::new(
            id,
            score,
            &StatusThresholds::default(),
            KeywordBreakdown {
                matched: matched.iter().map(|s| s.to_string()).collect(),
                missing: missing.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    #[test]
    fn test_compose_merges_keywords() {
        let categories = vec![
            category(CategoryId::Keywords, 70, &["AWS", "Docker"], &["Kubernetes", "Go"]),
            category(CategoryId::Content, 80, &["led", "aws"], &["docker", "built"]),
        ];
        let feedback = Feedback {
            strengths: vec!["s".to_string()],
            improvements: vec!["i".to_string()],
        };
        let report = compose(categories, 75, feedback);

        assert_eq!(report.keywords.matched, vec!["AWS", "Docker", "led"]);
        assert_eq!(report.keywords.missing, vec!["Kubernetes", "Go", "built"]);
        assert_eq!(report.overall_score, 75);
        assert_eq!(report.categories.len(), 2);
    }

    #[test]
    fn test_overall_uses_category_weights() {
        let categories = vec![
            category(CategoryId::Format, 90, &[], &[]),
            category(CategoryId::Keywords, 60, &[], &[]),
        ];
        assert_eq!(overall_from_categories(&categories, &CategoryWeights::default()), 75);

        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert(CategoryId::Keywords, 2.0);
        // (90 + 120) / 3
        assert_eq!(overall_from_categories(&categories, &CategoryWeights::new(overrides)), 70);
        assert_eq!(overall_from_categories(&[], &CategoryWeights::default()), 0);
    }
}
