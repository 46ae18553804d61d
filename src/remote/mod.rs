//! Optional remote report service
//!
//! A single JSON-over-HTTP contract: POST the scoring input plus caller
//! metadata, expect an `AggregateReport`-shaped body back. Any failure is
//! reported as an error and the caller falls back to local scoring.

use crate::analysis::engine::ScoringInput;
use crate::config::{RemoteConfig, SYSTEM_DESIGN_FLOOR};
use crate::error::{Result, ScoringError};
use crate::report::model::AggregateReport;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

pub trait ReportService {
    fn request_report(
        &self,
        request: &RemoteRequest,
    ) -> impl Future<Output = Result<AggregateReport>> + Send;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    pub client: String,
    pub client_version: String,
    pub mode: String,
}

/// Request body: the scoring input fields plus a `metadata` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRequest {
    #[serde(flatten)]
    pub input: ScoringInput,
    pub metadata: RequestMetadata,
}

impl RemoteRequest {
    pub fn new(input: &ScoringInput) -> Self {
        Self {
            metadata: RequestMetadata {
                client: env!("CARGO_PKG_NAME").to_string(),
                client_version: env!("CARGO_PKG_VERSION").to_string(),
                mode: input.mode.name().to_string(),
            },
            input: input.clone(),
        }
    }
}

pub struct HttpReportService {
    client: Client,
    endpoint: String,
}

impl HttpReportService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Build a service when remote delegation is enabled and has an endpoint.
    pub fn from_config(config: &RemoteConfig) -> Result<Option<Self>> {
        match config.active_endpoint() {
            Some(endpoint) => Ok(Some(Self::new(endpoint, Duration::from_secs(config.timeout_secs))?)),
            None => Ok(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ReportService for HttpReportService {
    async fn request_report(&self, request: &RemoteRequest) -> Result<AggregateReport> {
        debug!("Requesting report from {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ScoringError::RemoteStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_remote_report(&body)
    }
}

/// Parse and validate a remote report body.
///
/// `overallScore` and every `categories[].score` must be numbers within
/// 0-100 (fractional values are rounded), system design areas may not sit
/// below their floor, and the feedback lists must be non-empty. Anything else
/// is a malformed report.
pub fn parse_remote_report(body: &str) -> Result<AggregateReport> {
    let mut value: Value = serde_json::from_str(body)
        .map_err(|e| ScoringError::MalformedReport(format!("Invalid JSON: {}", e)))?;

    let object = value
        .as_object_mut()
        .ok_or_else(|| ScoringError::MalformedReport("Report is not a JSON object".to_string()))?;

    let overall = object
        .get_mut("overallScore")
        .ok_or_else(|| ScoringError::MalformedReport("Missing overallScore".to_string()))?;
    normalize_score(overall, "overallScore")?;

    let categories = object
        .get_mut("categories")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| ScoringError::MalformedReport("Missing categories array".to_string()))?;
    for (index, category) in categories.iter_mut().enumerate() {
        let score = category
            .get_mut("score")
            .ok_or_else(|| ScoringError::MalformedReport(format!("Missing categories[{}].score", index)))?;
        normalize_score(score, &format!("categories[{}].score", index))?;
    }

    let report: AggregateReport = serde_json::from_value(value)
        .map_err(|e| ScoringError::MalformedReport(e.to_string()))?;

    if report.strengths.is_empty() || report.improvements.is_empty() {
        return Err(ScoringError::MalformedReport(
            "Feedback lists must not be empty".to_string(),
        ));
    }

    if let Some(category) = report
        .categories
        .iter()
        .find(|c| c.id.is_system_design() && i32::from(c.raw_score) < SYSTEM_DESIGN_FLOOR)
    {
        return Err(ScoringError::MalformedReport(format!(
            "{} score {} is below the system design floor of {}",
            category.id, category.raw_score, SYSTEM_DESIGN_FLOOR
        )));
    }

    Ok(report)
}

fn normalize_score(value: &mut Value, field: &str) -> Result<()> {
    let number = value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ScoringError::MalformedReport(format!("{} is not a number", field)))?;

    if !(0.0..=100.0).contains(&number) {
        return Err(ScoringError::MalformedReport(format!(
            "{} out of range: {}",
            field, number
        )));
    }

    *value = Value::from(number.round() as u8);
    Ok(())
}
