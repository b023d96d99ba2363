use std::path::Path;

use eyre::{Context, Result};
use serde::Deserialize;

const SETTINGS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_SETTINGS_STR: &str = include_str!("default.yaml");

/// Prefix for environment variables that override settings, such as
/// `ISOGROUP_PRECISION`.
const ENV_PREFIX: &str = "ISOGROUP";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Settings {
    /// Number of decimal digits used for approximate comparisons.
    pub precision: u8,
    /// Whether to indent JSON output.
    pub pretty: bool,
    /// Iteration bound when closing generators into a group.
    pub max_closure_iterations: usize,
}

impl Settings {
    /// Loads settings from the defaults, then the user settings file (if
    /// any), then environment variables.
    pub fn load(user_file: Option<&Path>) -> Result<Self> {
        let mut config = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_SETTINGS_STR,
            SETTINGS_FILE_FORMAT,
        ));
        if let Some(path) = user_file {
            log::info!("loading settings from {}", path.display());
            config = config.add_source(config::File::from(path).format(SETTINGS_FILE_FORMAT));
        }
        config = config.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        config
            .build()
            .and_then(|c| c.try_deserialize())
            .context("error loading settings")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_settings() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_SETTINGS_STR,
                SETTINGS_FILE_FORMAT,
            ))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();
        assert_eq!(
            settings,
            Settings {
                precision: 6,
                pretty: true,
                max_closure_iterations: 50,
            },
        );
    }

    #[test]
    fn test_user_settings_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "precision: 4\npretty: false\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.precision, 4);
        assert!(!settings.pretty);
        assert_eq!(settings.max_closure_iterations, 50);
    }

    #[test]
    fn test_missing_settings_file() {
        let path = Path::new("this/file/does/not/exist.yaml");
        assert!(Settings::load(Some(path)).is_err());
    }
}
