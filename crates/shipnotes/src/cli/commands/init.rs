//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use shipnotes_core::config::{Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};

use crate::cli::output::{self, path_style};
use crate::cli::Cli;

/// Write a default shipnotes configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path; a `.toml` extension writes TOML
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, output = ?self.output, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        write_config(&config_path, self.force)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to set filters and provider", config_path.display());
            println!("  2. Run {} to verify your setup", style("shipnotes validate").cyan());
            println!(
                "  3. Run {} to generate release notes",
                style("shipnotes changelog").cyan()
            );
        }

        Ok(())
    }
}

/// Write the default configuration, as TOML when the path ends in `.toml`
fn write_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let content = if path.extension().is_some_and(|e| e == "toml") {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
        toml::to_string_pretty(&config)?
    } else {
        DEFAULT_CONFIG_TEMPLATE.to_string()
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipnotes_core::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_writes_yaml_template() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_YAML);
        write_config(&path, false).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.changelog.filters.exclude.len(), 3);
    }

    #[test]
    fn test_writes_toml_for_toml_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shipnotes.toml");
        write_config(&path, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[changelog"));
        let config = load_config(&path).unwrap();
        assert_eq!(config.changelog.filters.exclude.len(), 3);
    }

    #[test]
    fn test_refuses_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_YAML);
        std::fs::write(&path, "dist: keep\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dist: keep\n");

        write_config(&path, true).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "dist: keep\n");
    }
}
