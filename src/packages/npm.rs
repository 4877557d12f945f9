//! npm, for globally installed Node.js packages

use crate::error::{PkgbarError, Result};
use crate::packages::cli::CliRunner;
use crate::packages::traits::{ManagerOptions, OutdatedPackage, PackageManager, UpgradeOutcome};
use crate::utils::platform::{self, ANY_OS};
use serde::Deserialize;
use std::collections::BTreeMap;

pub struct NpmManager {
    runner: CliRunner,
}

impl NpmManager {
    pub fn new() -> Self {
        Self {
            runner: CliRunner::new(&["npm"]),
        }
    }
}

impl Default for NpmManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for NpmManager {
    fn id(&self) -> &str {
        "npm"
    }

    fn name(&self) -> &str {
        "Node's npm"
    }

    fn supported(&self) -> bool {
        platform::is_supported(ANY_OS)
    }

    fn available(&self) -> bool {
        self.runner.available()
    }

    fn outdated(&self) -> Result<Vec<OutdatedPackage>> {
        // npm exits with 1 whenever something is outdated
        let output = self
            .runner
            .run_allowing(&["outdated", "--global", "--json"], &[0, 1])?;
        parse_outdated(&output)
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
struct NpmEntry {
    current: Option<String>,
    latest: String,
}

/// Parse `npm outdated --json` output, an object keyed by package name
pub fn parse_outdated(output: &str) -> Result<Vec<OutdatedPackage>> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: BTreeMap<String, NpmEntry> =
        serde_json::from_str(output).map_err(|e| PkgbarError::ParseError {
            file: "npm outdated".to_string(),
            message: e.to_string(),
        })?;

    Ok(entries
        .into_iter()
        .map(|(name, entry)| OutdatedPackage {
            upgrade_cli: format!("npm install --global {}@{}", name, entry.latest),
            installed_version: entry.current.unwrap_or_else(|| "unknown".to_string()),
            latest_version: entry.latest,
            name,
        })
        .collect())
}
