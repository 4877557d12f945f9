//! Optional user configuration, read from `pkgbar.kdl`.
//!
//! Every value here can also be given on the command line. The command
//! line wins when both are present.

pub mod kdl;

use crate::error::{PkgbarError, Result};
use crate::utils::paths;
use std::fs;
use std::path::Path;

/// Settings loaded from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Managers to query, in order
    pub managers: Vec<String>,
    /// Managers never to query
    pub exclude: Vec<String>,
    /// Consider managers unsupported on this platform too
    pub all_managers: Option<bool>,
    /// Keep managers whose CLI is missing
    pub include_inactive: Option<bool>,
    /// Extra options as written in the file
    pub options: Vec<(String, bool)>,
}

/// Load settings from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file yields defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match paths::config_file() {
            Ok(path) => (path, false),
            Err(e) => {
                tracing::debug!("No config location: {}", e);
                return Ok(Settings::default());
            }
        },
    };

    if !path.exists() {
        if explicit {
            return Err(PkgbarError::ConfigError(format!(
                "Config file not found at: {}",
                path.display()
            )));
        }
        tracing::debug!("No config file at {}", path.display());
        return Ok(Settings::default());
    }

    tracing::debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(&path).map_err(|e| PkgbarError::IoError {
        path: path.clone(),
        source: e,
    })?;

    kdl::parse_kdl_content(&content).map_err(|e| match e {
        PkgbarError::ConfigError(message) => PkgbarError::ParseError {
            file: path.display().to_string(),
            message,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pkgbar.kdl");
        fs::write(&path, "managers \"npm\"\n").unwrap();

        let settings = load_settings(Some(&path)).unwrap();

        assert_eq!(settings.managers, vec!["npm"]);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.kdl");

        let err = load_settings(Some(&path)).unwrap_err();

        assert!(matches!(err, PkgbarError::ConfigError(_)));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.kdl");
        fs::write(&path, "options {\n").unwrap();

        let err = load_settings(Some(&path)).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("broken.kdl"));
        assert!(message.contains("KDL parsing error"));
        assert!(!message.contains("Configuration error"), "{}", message);
    }

    #[test]
    fn test_invalid_setting_names_the_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pkgbar.kdl");
        fs::write(&path, "colour \"red\"\n").unwrap();

        let err = load_settings(Some(&path)).unwrap_err();

        assert!(matches!(err, PkgbarError::ParseError { .. }));
        assert_eq!(
            err.to_string(),
            format!("Parsing error in '{}': Unknown setting 'colour'", path.display())
        );
    }
}
