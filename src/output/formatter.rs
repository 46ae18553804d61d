//! Output formatters for console, JSON and markdown reports

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::ScoreDocument;
use crate::report::composer::ReportSource;
use crate::report::model::{CategoryScore, ScoreStatus, StatusThresholds};
use colored::{Color, Colorize};
use std::path::Path;

const BAR_WIDTH: usize = 20;
const KEYWORDS_SHOWN: usize = 12;

pub trait OutputFormatter {
    fn format_report(&self, document: &ScoreDocument) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// Dispatches a document to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn status_color(status: ScoreStatus) -> Color {
    match status {
        ScoreStatus::Good => Color::Green,
        ScoreStatus::Warning => Color::Yellow,
        ScoreStatus::Error => Color::Red,
    }
}

fn source_label(source: ReportSource) -> &'static str {
    match source {
        ReportSource::Remote => "remote service",
        ReportSource::Local => "local engine",
    }
}

fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(100)) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn shown_keywords(keywords: &[String]) -> String {
    let mut shown = keywords.iter().take(KEYWORDS_SHOWN).cloned().collect::<Vec<_>>().join(", ");
    if keywords.len() > KEYWORDS_SHOWN {
        shown.push_str(&format!(" (+{} more)", keywords.len() - KEYWORDS_SHOWN));
    }
    shown
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_status_badge(&self, status: ScoreStatus) -> String {
        let badge = status.as_str().to_uppercase();
        if self.use_colors {
            format!("[{}]", badge.color(status_color(status)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_category(&self, category: &CategoryScore) -> String {
        format!(
            "  {:<14} {:>3}  {} {}\n",
            category.id.label(),
            category.raw_score,
            self.colorize(&score_bar(category.raw_score), status_color(category.status)),
            self.format_status_badge(category.status)
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, document: &ScoreDocument) -> Result<String> {
        let report = &document.report;
        let mut output = String::new();

        output.push_str(&self.format_header(&document.title.to_uppercase(), 1));
        if let Some(subject) = &document.subject {
            output.push_str(&format!("Input: {}\n", subject));
        }
        output.push_str(&format!("Scored by: {}\n", source_label(document.source)));
        if let Some(warning) = &document.warning {
            output.push_str(&format!("{}\n", self.colorize(&format!("⚠️  {}", warning), Color::Yellow)));
        }

        let overall_status = ScoreStatus::from_score(report.overall_score, &StatusThresholds::default());
        output.push_str(&format!(
            "\nOverall Score: {}/100 {}\n",
            report.overall_score,
            self.format_status_badge(overall_status)
        ));

        if !report.categories.is_empty() {
            output.push_str(&self.format_header("Categories", 2));
            for category in &report.categories {
                output.push_str(&self.format_category(category));
            }
        }

        if let Some(polish) = &document.polish {
            output.push_str(&self.format_header("Polished Text", 2));
            output.push_str(&format!("  Before ({}): {}\n", polish.score_before, polish.original.trim()));
            output.push_str(&format!(
                "  After  ({}): {}\n",
                polish.score_after,
                self.colorize(&polish.polished, Color::Cyan)
            ));
            for change in &polish.substitutions {
                output.push_str(&format!("    • \"{}\" → \"{}\"\n", change.from, change.to));
            }
        }

        if !report.keywords.matched.is_empty() || !report.keywords.missing.is_empty() {
            output.push_str(&self.format_header("Keywords", 2));
            if !report.keywords.matched.is_empty() {
                output.push_str(&format!(
                    "  Matched: {}\n",
                    self.colorize(&shown_keywords(&report.keywords.matched), Color::Green)
                ));
            }
            if !report.keywords.missing.is_empty() {
                output.push_str(&format!(
                    "  Missing: {}\n",
                    self.colorize(&shown_keywords(&report.keywords.missing), Color::Red)
                ));
            }
        }

        output.push_str(&self.format_header("✅ Strengths", 3));
        for strength in &report.strengths {
            output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
        }

        output.push_str(&self.format_header("🎯 Improvements", 3));
        for improvement in &report.improvements {
            output.push_str(&format!("  • {}\n", self.colorize(improvement, Color::Yellow)));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, document: &ScoreDocument) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(document)?)
        } else {
            Ok(serde_json::to_string(document)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn status_badge(status: ScoreStatus) -> &'static str {
        match status {
            ScoreStatus::Good => "🟢 Good",
            ScoreStatus::Warning => "🟡 Warning",
            ScoreStatus::Error => "🔴 Needs work",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, document: &ScoreDocument) -> Result<String> {
        let report = &document.report;
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", document.title));
        if let Some(subject) = &document.subject {
            output.push_str(&format!("**Input:** `{}`  \n", subject));
        }
        output.push_str(&format!("**Scored by:** {}\n\n", source_label(document.source)));
        if let Some(warning) = &document.warning {
            output.push_str(&format!("> ⚠️ {}\n\n", warning));
        }

        output.push_str(&format!("**Overall Score:** {}/100\n\n", report.overall_score));

        if !report.categories.is_empty() {
            output.push_str("## Categories\n\n");
            output.push_str("| Category | Score | Status |\n");
            output.push_str("|----------|-------|--------|\n");
            for category in &report.categories {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    category.id.label(),
                    category.raw_score,
                    Self::status_badge(category.status)
                ));
            }
            output.push('\n');
        }

        if let Some(polish) = &document.polish {
            output.push_str("## Polished Text\n\n");
            output.push_str(&format!("**Before ({}):** {}\n\n", polish.score_before, polish.original.trim()));
            output.push_str(&format!("**After ({}):** {}\n\n", polish.score_after, polish.polished));
            for change in &polish.substitutions {
                output.push_str(&format!("- ~~{}~~ → {}\n", change.from, change.to));
            }
            if !polish.substitutions.is_empty() {
                output.push('\n');
            }
        }

        if !report.keywords.matched.is_empty() || !report.keywords.missing.is_empty() {
            output.push_str("## Keywords\n\n");
            if !report.keywords.matched.is_empty() {
                output.push_str(&format!("**Matched:** {}\n\n", report.keywords.matched.join(", ")));
            }
            if !report.keywords.missing.is_empty() {
                output.push_str(&format!("**Missing:** {}\n\n", report.keywords.missing.join(", ")));
            }
        }

        output.push_str("## Strengths\n\n");
        for strength in &report.strengths {
            output.push_str(&format!("- {}\n", strength));
        }

        output.push_str("\n## Improvements\n\n");
        for improvement in &report.improvements {
            output.push_str(&format!("- {}\n", improvement));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.pretty_json)
    }

    pub fn generate_report(&self, document: &ScoreDocument, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(document),
            OutputFormat::Json => self.json_formatter.format_report(document),
            OutputFormat::Markdown => self.markdown_formatter.format_report(document),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, input_name: &str) -> String {
    let base_name = Path::new(input_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    match format {
        OutputFormat::Console => format!("{}_score.txt", base_name),
        OutputFormat::Json => format!("{}_score.json", base_name),
        OutputFormat::Markdown => format!("{}_score.md", base_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::{ScoringEngine, ScoringInput, ScoringMode};
    use crate::report::composer::ReportOutcome;
    use tempfile::TempDir;

    fn document() -> ScoreDocument {
        let engine = ScoringEngine::default();
        let input = ScoringInput::new(
            "Experience\nLed a team that built Kafka pipelines on AWS.",
            ScoringMode::Ats,
        )
        .with_reference("Kafka, AWS and Kubernetes");
        let outcome = ReportOutcome {
            report: engine.score(&input),
            source: ReportSource::Local,
            warning: Some("Remote scoring unavailable: timed out".to_string()),
            phases: vec![],
        };
        ScoreDocument::new("ATS Resume Check", outcome).with_subject("resume.txt")
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false).format_report(&document()).unwrap();

        assert!(output.contains("ATS RESUME CHECK"));
        assert!(output.contains("Scored by: local engine"));
        assert!(output.contains("timed out"));
        assert!(output.contains("Keywords"));
        assert!(output.contains("kubernetes"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_round_trips_report() {
        let doc = document();
        let json = JsonFormatter::new(false).format_report(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["report"]["overallScore"], doc.report.overall_score);
        assert_eq!(value["source"], "local");
        assert!(value.get("polish").is_none());
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter.format_report(&document()).unwrap();
        assert!(output.starts_with("# ATS Resume Check"));
        assert!(output.contains("| Format |"));
        assert!(output.contains("## Improvements"));
    }

    #[test]
    fn test_generator_dispatch_and_save() {
        let generator = ReportGenerator::with_options(false, true);
        let doc = document();
        let dir = TempDir::new().unwrap();

        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            let content = generator.generate_report(&doc, format).unwrap();
            let path = dir.path().join("nested").join(suggest_filename(format, "resume.txt"));
            save_report_to_file(&content, &path).unwrap();
            assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
        }
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(score_bar(50).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(score_bar(100).chars().filter(|c| *c == '█').count(), 20);
    }
}
