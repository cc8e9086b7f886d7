//! Validate command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use shipnotes_core::config::load_config_or_default;
use shipnotes_git::GitRepo;

use crate::cli::output::{header, key_value, path_style, tag_style};
use crate::cli::{Cli, OutputFormat};

/// Validate configuration and repository state
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Only validate configuration file
    #[arg(long)]
    pub config_only: bool,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Validation found errors; the report has already been printed
#[derive(Debug, thiserror::Error)]
#[error("validation failed with {errors} error(s)")]
pub struct ValidationFailed {
    pub errors: usize,
}

#[derive(Debug, Default, Serialize)]
struct Report {
    valid: bool,
    config_path: Option<PathBuf>,
    latest_tag: Option<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            config_only = self.config_only,
            strict = self.strict,
            "executing validate command"
        );
        let cwd = std::env::current_dir()?;
        let report = self.check(&cwd);

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_text(&report);
                }
            }
        }

        report.into_result()
    }

    fn check(&self, dir: &Path) -> Report {
        let mut report = Report::default();

        let config = match load_config_or_default(dir) {
            Ok((config, path)) => {
                if path.is_none() {
                    report
                        .warnings
                        .push("No configuration file found, using defaults".to_string());
                }
                report.config_path = path;
                Some(config)
            }
            Err(e) => {
                report.errors.push(format!("Configuration: {}", e));
                None
            }
        };

        if let Some(cfg) = &config {
            if cfg.changelog.skip {
                report
                    .warnings
                    .push("changelog.skip is set, no changelog will be generated".to_string());
            }
        }

        if !self.config_only {
            match GitRepo::discover(dir) {
                Ok(repo) => match repo.tags_in_creation_order() {
                    Ok(tags) => match tags.last() {
                        Some(tag) => report.latest_tag = Some(tag.name.clone()),
                        None => report.errors.push("Git repository has no tags".to_string()),
                    },
                    Err(e) => report.errors.push(format!("Tag listing: {}", e)),
                },
                Err(e) => report.errors.push(format!("Git repository: {}", e)),
            }
        }

        // If strict, promote warnings to errors
        if self.strict {
            report.errors.append(&mut report.warnings);
        }
        report.valid = report.errors.is_empty();
        report
    }
}

impl Report {
    fn into_result(self) -> anyhow::Result<()> {
        if self.valid {
            return Ok(());
        }
        Err(ValidationFailed {
            errors: self.errors.len(),
        }
        .into())
    }
}

fn print_text(report: &Report) {
    println!("{}", header("Validation Results"));
    println!();

    if let Some(path) = &report.config_path {
        println!("{}", key_value("config", &path_style().apply_to(path.display()).to_string()));
    }
    if let Some(tag) = &report.latest_tag {
        println!("{}", key_value("latest tag", &tag_style().apply_to(tag).to_string()));
    }
    println!();

    if !report.errors.is_empty() {
        println!("{}", style("Errors:").red().bold());
        for error in &report.errors {
            println!("  {} {}", style("✗").red(), error);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("{}", style("Warnings:").yellow().bold());
        for warning in &report.warnings {
            println!("  {} {}", style("!").yellow(), warning);
        }
        println!();
    }

    if report.valid {
        if report.warnings.is_empty() {
            println!("{}", style("✓ All checks passed").green().bold());
        } else {
            println!(
                "{} with {} warning(s)",
                style("✓ Validation passed").green().bold(),
                report.warnings.len()
            );
        }
    } else {
        println!(
            "{} with {} error(s)",
            style("✗ Validation failed").red().bold(),
            report.errors.len()
        );
    }
}
