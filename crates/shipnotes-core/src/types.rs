//! Core types for shipnotes

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ordering applied to changelog entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Keep the order the log provider returned (most recent first)
    #[default]
    Unspecified,
    /// Oldest commit first
    Ascending,
    /// Most recent commit first
    Descending,
}

impl SortDirection {
    /// Returns the configuration spelling of the direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Unspecified),
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(ConfigError::InvalidSortDirection(other.to_string())),
        }
    }
}

/// Hosting convention the release notes are rendered for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTag {
    /// GitHub renders single newlines as line breaks
    #[default]
    GitHub,
    /// GitLab needs explicit markdown hard breaks
    GitLab,
    /// Gitea needs explicit markdown hard breaks
    Gitea,
}

impl ProviderTag {
    /// Returns the string representation of the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Gitea => "gitea",
        }
    }

    /// Whether consecutive lines need trailing spaces to render as separate lines
    pub fn requires_hard_breaks(&self) -> bool {
        matches!(self, Self::GitLab | Self::Gitea)
    }
}

impl std::fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(Self::GitHub),
            "gitlab" => Ok(Self::GitLab),
            "gitea" => Ok(Self::Gitea),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction_from_str() {
        assert_eq!("".parse::<SortDirection>().unwrap(), SortDirection::Unspecified);
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Descending);
    }

    #[test]
    fn test_sort_direction_rejects_unknown() {
        let err = "dope".parse::<SortDirection>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSortDirection(ref v) if v == "dope"));
        // directives are case-sensitive
        assert!("ASC".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_provider_hard_breaks() {
        assert!(!ProviderTag::GitHub.requires_hard_breaks());
        assert!(ProviderTag::GitLab.requires_hard_breaks());
        assert!(ProviderTag::Gitea.requires_hard_breaks());
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("GitLab".parse::<ProviderTag>().unwrap(), ProviderTag::GitLab);
        assert!("bitbucket".parse::<ProviderTag>().is_err());
    }
}
