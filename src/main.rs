//! resume-scorer: deterministic resume, ATS and interview scoring

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use resume_scorer::analysis::engine::{ScoringInput, ScoringMode};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction, PolishArgs};
use resume_scorer::config::{Config, OutputFormat};
use resume_scorer::input::InputManager;
use resume_scorer::output::{save_report_to_file, ReportGenerator, ScoreDocument};
use resume_scorer::remote::HttpReportService;
use resume_scorer::ScoringEngine;
use std::path::Path;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // handled before strict loading so `config reset` can repair a broken file
    if let Commands::Config { action } = &cli.command {
        if let Err(e) = run_config(action.as_ref(), cli.config.as_deref()) {
            error!("Command failed: {:#}", e);
            process::exit(1);
        }
        return;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(cli, config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Could not read configuration from {}", path.display())),
        None => Ok(Config::load()?),
    }
}

/// Remote service from `--remote`, or from the config unless `--offline`.
fn remote_service(cli: &Cli, config: &Config) -> Result<Option<HttpReportService>> {
    if cli.offline {
        return Ok(None);
    }
    let service = match &cli.remote {
        Some(endpoint) => Some(HttpReportService::new(
            endpoint.as_str(),
            Duration::from_secs(config.remote.timeout_secs),
        )?),
        None => HttpReportService::from_config(&config.remote)?,
    };
    if let Some(service) = &service {
        info!("Remote scoring enabled: {}", service.endpoint());
    }
    Ok(service)
}

async fn run(cli: Cli, mut config: Config) -> Result<()> {
    let format = match &cli.output {
        Some(output) => cli::parse_output_format(output).map_err(anyhow::Error::msg)?,
        None => config.output.format,
    };
    if format != OutputFormat::Console {
        config.output.color_output = false;
    }

    let engine = ScoringEngine::new(&config).context("Invalid scoring configuration")?;
    let service = remote_service(&cli, &config)?;
    let mut inputs = InputManager::new();

    let document = match &cli.command {
        Commands::Ats { resume, job } => {
            cli::validate_file_extension(resume, &["pdf", "txt", "md"])
                .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;

            let resume_text = inputs
                .extract_text(resume)
                .await
                .with_context(|| format!("Could not read resume {}", resume.display()))?;
            let mut input = ScoringInput::new(resume_text, ScoringMode::Ats);

            if let Some(job) = job {
                cli::validate_file_extension(job, &["txt", "md"])
                    .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
                let job_text = inputs
                    .extract_text(job)
                    .await
                    .with_context(|| format!("Could not read job description {}", job.display()))?;
                input = input.with_reference(job_text);
            }

            let outcome = engine.score_with_fallback(&input, service.as_ref()).await;
            ScoreDocument::new("ATS Resume Check", outcome).with_subject(resume.display().to_string())
        }
        Commands::Polish(PolishArgs { text, file }) => {
            let (text, subject) = match (text, file) {
                (Some(text), _) => (text.clone(), None),
                (None, Some(file)) => {
                    let text = inputs
                        .extract_text(file)
                        .await
                        .with_context(|| format!("Could not read {}", file.display()))?;
                    (text, Some(file.display().to_string()))
                }
                (None, None) => anyhow::bail!("Provide --text or --file"),
            };

            let polished = engine.polish(&text);
            let input = ScoringInput::new(text, ScoringMode::Polish);
            let outcome = engine.score_with_fallback(&input, service.as_ref()).await;

            let document = ScoreDocument::new("Resume Polish", outcome).with_polish(polished);
            match subject {
                Some(subject) => document.with_subject(subject),
                None => document,
            }
        }
        Commands::Interview { answers } => {
            let answers_list = inputs
                .load_answers(answers)
                .await
                .with_context(|| format!("Could not load answers from {}", answers.display()))?;
            if answers_list.is_empty() {
                warn!("No interview answers found in {}", answers.display());
            }

            let input = ScoringInput::new(String::new(), ScoringMode::Interview { answers: answers_list });
            let outcome = engine.score_with_fallback(&input, service.as_ref()).await;
            ScoreDocument::new("Interview Report", outcome).with_subject(answers.display().to_string())
        }
        Commands::Config { action } => return run_config(action.as_ref(), cli.config.as_deref()),
    };

    emit(&document, format, &config, cli.save.as_deref())
}

fn emit(document: &ScoreDocument, format: OutputFormat, config: &Config, save: Option<&Path>) -> Result<()> {
    let generator = ReportGenerator::from_config(&config.output);
    let rendered = generator.generate_report(document, format)?;

    match save {
        Some(path) => {
            save_report_to_file(&rendered, path)
                .with_context(|| format!("Could not save report to {}", path.display()))?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    debug!("Report rendered as {:?}", format);
    Ok(())
}

fn run_config(action: Option<&ConfigAction>, explicit: Option<&Path>) -> Result<()> {
    let path = Config::resolve_path(explicit);

    match action {
        Some(ConfigAction::Show) | None => {
            let config = load_config(explicit)?;
            let rendered = toml::to_string_pretty(&config).context("Could not render configuration")?;
            println!("# {}\n{}", path.display(), rendered);
        }
        Some(ConfigAction::Reset) => {
            Config::reset_at(&path)
                .with_context(|| format!("Could not write defaults to {}", path.display()))?;
            println!("Configuration reset to defaults at {}", path.display());
        }
        Some(ConfigAction::Path) => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
