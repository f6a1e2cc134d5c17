//! Resume ranker: batch resume screening against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction};
use resume_ranker::config::Config;
use resume_ranker::error::{Result, ResumeRankerError};
use resume_ranker::input::Document;
use resume_ranker::output::formatter_for;
use resume_ranker::pipeline::RankingEngine;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            output,
            save,
            model,
        } => {
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| ResumeRankerError::InvalidInput(format!("Job description: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(ResumeRankerError::InvalidInput)?;

            if let Some(model) = model {
                config.models.embedding_model = model;
            }

            info!("Job description: {}", job.display());
            info!("Scoring {} resume file(s)", resumes.len());

            let job_description = tokio::fs::read_to_string(&job).await?;
            let documents = read_documents(&resumes).await;

            let engine = RankingEngine::new(&config)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Scoring resumes...");
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));

            let outcome = engine.rank(&job_description, documents).await?;
            spinner.finish_and_clear();

            for warning in &outcome.warnings {
                warn!("Skipped {}: {}", warning.file_name, warning.reason);
            }

            let formatter = formatter_for(output_format, config.output.color_output);
            let rendered = formatter.format(&outcome)?;

            match save {
                Some(path) => {
                    tokio::fs::write(&path, rendered).await?;
                    println!("Results written to {}", path.display());
                }
                None => print!("{}", rendered),
            }

            Ok(())
        }

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeRankerError::Configuration(format!(
                            "Failed to serialize config: {}",
                            e
                        ))
                    })?;
                    println!("{}", content);
                }
                ConfigAction::Reset => {
                    Config::default().save()?;
                    println!("Configuration reset to defaults");
                }
            }
            Ok(())
        }
    }
}

/// Read each resume file into an in-memory document. Unreadable files are
/// logged and left out; the rest of the batch proceeds.
async fn read_documents(paths: &[PathBuf]) -> Vec<Document> {
    let progress = ProgressBar::new(paths.len() as u64);
    let mut documents = Vec::with_capacity(paths.len());

    for path in paths {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string();

        match tokio::fs::read(path).await {
            Ok(bytes) => documents.push(Document::new(file_name, bytes)),
            Err(e) => warn!("Failed to read {}: {}", path.display(), e),
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    documents
}
