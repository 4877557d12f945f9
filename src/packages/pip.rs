//! pip, for Python packages

use crate::error::{PkgbarError, Result};
use crate::packages::cli::CliRunner;
use crate::packages::traits::{ManagerOptions, OutdatedPackage, PackageManager, UpgradeOutcome};
use crate::utils::platform::{self, ANY_OS};
use serde::Deserialize;

pub struct PipManager {
    runner: CliRunner,
}

impl PipManager {
    pub fn new() -> Self {
        Self {
            runner: CliRunner::new(&["pip3", "pip"]),
        }
    }
}

impl Default for PipManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for PipManager {
    fn id(&self) -> &str {
        "pip"
    }

    fn name(&self) -> &str {
        "Pip"
    }

    fn supported(&self) -> bool {
        platform::is_supported(ANY_OS)
    }

    fn available(&self) -> bool {
        self.runner.available()
    }

    fn outdated(&self) -> Result<Vec<OutdatedPackage>> {
        let output = self
            .runner
            .run(&["list", "--outdated", "--format=json", "--disable-pip-version-check"])?;
        parse_outdated(&output, self.runner.binary_name())
    }

    fn upgrade(&self, package: &OutdatedPackage) -> Result<UpgradeOutcome> {
        self.runner.run_command_line(&package.upgrade_cli)
    }

    fn errors(&self) -> Vec<String> {
        self.runner.errors()
    }

    fn options(&self) -> Option<&ManagerOptions> {
        Some(self.runner.options())
    }
}

#[derive(Debug, Deserialize)]
struct PipEntry {
    name: String,
    version: String,
    latest_version: String,
}

pub fn parse_outdated(output: &str, binary: &str) -> Result<Vec<OutdatedPackage>> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<PipEntry> =
        serde_json::from_str(output).map_err(|e| PkgbarError::ParseError {
            file: "pip list".to_string(),
            message: e.to_string(),
        })?;

    Ok(entries
        .into_iter()
        .map(|entry| OutdatedPackage {
            upgrade_cli: format!("{} install --upgrade {}", binary, entry.name),
            name: entry.name,
            installed_version: entry.version,
            latest_version: entry.latest_version,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_outdated() {
        let output = r#"[
            {"name": "requests", "version": "2.28.0", "latest_version": "2.31.0", "latest_filetype": "wheel"},
            {"name": "pip", "version": "23.0", "latest_version": "23.3.2", "latest_filetype": "wheel"}
        ]"#;

        let packages = parse_outdated(output, "pip3").unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "requests");
        assert_eq!(packages[0].installed_version, "2.28.0");
        assert_eq!(packages[0].latest_version, "2.31.0");
        assert_eq!(packages[0].upgrade_cli, "pip3 install --upgrade requests");
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_outdated("[]", "pip").unwrap().is_empty());
        assert!(parse_outdated("", "pip").unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_fails() {
        let err = parse_outdated("ERROR: something", "pip").unwrap_err();
        assert!(matches!(err, PkgbarError::ParseError { .. }));
    }
}
