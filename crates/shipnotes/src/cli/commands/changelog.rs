//! Changelog command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use shipnotes_changelog::{ChangelogOptions, ChangelogOutcome, ChangelogPipeline};
use shipnotes_core::config::{load_config_or_default, Config, CURRENT_TAG_ENV, PREVIOUS_TAG_ENV};
use shipnotes_core::ProviderTag;
use shipnotes_git::GitRepo;

use crate::cli::output::{self, key_value, path_style, tag_style};
use crate::cli::{Cli, OutputFormat};

/// Generate release notes for a tag
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Tag being released (defaults to the latest tag).
    ///
    /// With --release-notes git is not read, so `{{ tag }}` in that file is
    /// empty unless this is given.
    #[arg(long, env = CURRENT_TAG_ENV, value_name = "TAG")]
    pub current_tag: Option<String>,

    /// Tag to start from instead of the one preceding the current tag
    #[arg(long, env = PREVIOUS_TAG_ENV, value_name = "TAG")]
    pub previous_tag: Option<String>,

    /// Use this file as the release notes instead of generating them
    #[arg(long, value_name = "FILE")]
    pub release_notes: Option<PathBuf>,

    /// Template prepended to the generated notes
    #[arg(long, value_name = "FILE")]
    pub release_header: Option<PathBuf>,

    /// Template appended to the generated notes
    #[arg(long, value_name = "FILE")]
    pub release_footer: Option<PathBuf>,

    /// Snapshot build; no changelog is generated
    #[arg(long)]
    pub snapshot: bool,

    /// Output directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub dist: Option<PathBuf>,

    /// Git host flavor (overrides config)
    #[arg(long)]
    pub provider: Option<ProviderTag>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            current_tag = ?self.current_tag,
            previous_tag = ?self.previous_tag,
            snapshot = self.snapshot,
            "executing changelog command"
        );
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;
        let config = self.apply_overrides(config);

        let repo = GitRepo::discover(&cwd)?;
        let options = self.options().with_env(std::env::vars());
        let outcome = ChangelogPipeline::new(&config, &repo).run(&options)?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            OutputFormat::Text => print_text(&outcome, cli.quiet),
        }

        Ok(())
    }

    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(dist) = &self.dist {
            config.dist = dist.clone();
        }
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        config
    }

    fn options(&self) -> ChangelogOptions {
        let mut options = ChangelogOptions::new().with_snapshot(self.snapshot);
        options.current_tag = non_empty(&self.current_tag);
        options.previous_tag = non_empty(&self.previous_tag);
        options.release_notes = self.release_notes.clone();
        options.release_header = self.release_header.clone();
        options.release_footer = self.release_footer.clone();
        options
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn print_text(outcome: &ChangelogOutcome, quiet: bool) {
    match outcome {
        ChangelogOutcome::Skipped {
            reason,
            release_notes,
        } => {
            if !quiet {
                output::warning(&format!("Skipping changelog: {}", reason));
            }
            if let Some(notes) = release_notes {
                println!("{}", notes);
            }
        }
        ChangelogOutcome::Generated(notes) => {
            println!("{}", notes.content);
            if quiet {
                return;
            }
            if let Some(range) = &notes.range {
                let from = range.previous.as_deref().unwrap_or("(first commit)");
                println!();
                println!(
                    "{}",
                    key_value(
                        "range",
                        &format!(
                            "{}..{}",
                            tag_style().apply_to(from),
                            tag_style().apply_to(&range.current)
                        )
                    )
                );
            }
            if let Some(path) = &notes.path {
                output::success(&format!(
                    "Changelog written to {}",
                    path_style().apply_to(path.display())
                ));
            }
        }
    }
}
