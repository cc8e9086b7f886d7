//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "shipnotes.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "shipnotes.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".shipnotes.yaml";

/// Name of the generated changelog inside the dist directory
pub const CHANGELOG_FILE_NAME: &str = "CHANGELOG.md";

/// Environment variable overriding the previous tag
pub const PREVIOUS_TAG_ENV: &str = "SHIPNOTES_PREVIOUS_TAG";

/// Environment variable overriding the current tag
pub const CURRENT_TAG_ENV: &str = "SHIPNOTES_CURRENT_TAG";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".shipnotes.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# shipnotes configuration

dist: dist

# github | gitlab | gitea
provider: github

changelog:
  skip: false
  # "" keeps git order, "asc" lists oldest first, "desc" newest first
  sort: ""
  filters:
    exclude:
      - '^docs:'
      - '^test:'
      - '^Merge pull request'
"#;
