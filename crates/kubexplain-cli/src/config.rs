//! User settings
//!
//! Read from `~/.config/kubexplain/config.yaml` unless `--config` points
//! elsewhere. A missing default file means default settings; a missing
//! explicit file is an error.

use kubexplain_core::MatchPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Tie-break used when no explanation key matches a path exactly
    pub match_policy: MatchPolicy,

    /// Treat validation warnings as failures
    pub strict: bool,
}

impl Settings {
    /// Load settings from `path`, or from the default location
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Load settings from default location
    pub fn load() -> Result<Self> {
        let Some(path) = Self::default_path() else {
            tracing::debug!("no config directory, using default settings");
            return Ok(Self::default());
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CliError::io_at(path.display(), e))?;
        let settings: Self = serde_yaml::from_str(&content).map_err(|e| {
            CliError::usage_with_help(
                format!("Invalid settings file {}: {}", path.display(), e),
                "Supported keys: matchPolicy (longest-match | declaration-order), strict",
            )
        })?;

        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Get default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kubexplain").join("config.yaml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from() {
        let file = write_settings("matchPolicy: declaration-order\nstrict: true\n");
        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.match_policy, MatchPolicy::DeclarationOrder);
        assert!(settings.strict);
    }

    #[test]
    fn test_missing_keys_default() {
        let file = write_settings("strict: true\n");
        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.match_policy, MatchPolicy::LongestMatch);
        assert!(settings.strict);
    }

    #[test]
    fn test_invalid_policy_is_usage_error() {
        let file = write_settings("matchPolicy: fuzzy\n");
        let err = Settings::load_from(file.path()).unwrap_err();

        assert!(matches!(err, CliError::Usage { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        let err = Settings::resolve(Some(missing.as_path())).unwrap_err();

        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let yaml = serde_yaml::to_string(&Settings::default()).unwrap();
        assert!(yaml.contains("matchPolicy: longest-match"));
        assert!(yaml.contains("strict: false"));
    }
}
