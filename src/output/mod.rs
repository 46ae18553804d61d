//! Report rendering for the console, JSON and markdown outputs

pub mod formatter;

pub use formatter::{save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator};

use crate::analysis::polish::PolishOutcome;
use crate::report::composer::{ReportOutcome, ReportSource};
use crate::report::model::AggregateReport;
use serde::{Deserialize, Serialize};

/// Everything a formatter renders for one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDocument {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub source: ReportSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polish: Option<PolishOutcome>,
    pub report: AggregateReport,
}

impl ScoreDocument {
    pub fn new(title: impl Into<String>, outcome: ReportOutcome) -> Self {
        Self {
            title: title.into(),
            subject: None,
            source: outcome.source,
            warning: outcome.warning,
            polish: None,
            report: outcome.report,
        }
    }

    /// Name of the scored file, shown under the title.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_polish(mut self, polish: PolishOutcome) -> Self {
        self.polish = Some(polish);
        self
    }
}
