//! CLI interface for the resume scorer

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(version, about = "Deterministic resume, ATS and interview scoring")]
#[command(long_about = "Score resumes against job descriptions, polish resume lines and assess interview answers with \
                        reproducible heuristics. An optional remote scoring service is tried first when configured.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json, markdown
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long, global = true)]
    pub save: Option<PathBuf>,

    /// Remote scoring endpoint; overrides the configured one
    #[arg(long, global = true)]
    pub remote: Option<String>,

    /// Never contact the remote scoring service
    #[arg(long, global = true, conflicts_with = "remote")]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a resume the way an applicant tracking system would
    Ats {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD); its skills become the keyword set
        #[arg(short, long)]
        job: Option<PathBuf>,
    },

    /// Rewrite and score a single resume line, bullet or summary
    Polish(PolishArgs),

    /// Score a set of interview answers
    Interview {
        /// JSON file with an array of answers
        #[arg(short, long)]
        answers: PathBuf,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct PolishArgs {
    /// Text to polish
    #[arg(short, long)]
    pub text: Option<String>,

    /// File whose contents should be polished
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ats_with_globals() {
        let cli = Cli::try_parse_from([
            "resume-scorer",
            "ats",
            "--resume",
            "resume.pdf",
            "--job",
            "job.md",
            "--output",
            "json",
            "--remote",
            "http://localhost:8080/score",
        ])
        .unwrap();

        assert_eq!(cli.output.as_deref(), Some("json"));
        assert_eq!(cli.remote.as_deref(), Some("http://localhost:8080/score"));
        match cli.command {
            Commands::Ats { resume, job } => {
                assert_eq!(resume, PathBuf::from("resume.pdf"));
                assert_eq!(job, Some(PathBuf::from("job.md")));
            }
            _ => panic!("expected ats command"),
        }
    }

    #[test]
    fn test_polish_requires_exactly_one_source() {
        assert!(Cli::try_parse_from(["resume-scorer", "polish"]).is_err());
        assert!(Cli::try_parse_from(["resume-scorer", "polish", "--text", "a", "--file", "b.txt"]).is_err());
        assert!(Cli::try_parse_from(["resume-scorer", "polish", "--text", "worked on the api"]).is_ok());
    }

    #[test]
    fn test_offline_conflicts_with_remote() {
        assert!(Cli::try_parse_from(["resume-scorer", "--offline", "--remote", "http://x", "config"]).is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("json"), Ok(OutputFormat::Json));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
