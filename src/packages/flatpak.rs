//! Flatpak package manager
//!
//! Installed versions and available updates come from two separate calls
//! joined on the application id.

use crate::error::Result;
use crate::packages::cli::CliRunner;
use crate::packages::traits::{ManagerOptions, OutdatedPackage, PackageManager, UpgradeOutcome};
use crate::utils::platform::{self, LINUX};
use std::collections::HashMap;

pub struct FlatpakManager {
    runner: CliRunner,
}

impl FlatpakManager {
    pub fn new() -> Self {
        Self {
            runner: CliRunner::new(&["flatpak"]),
        }
    }
}

impl Default for FlatpakManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for FlatpakManager {
    fn id(&self) -> &str {
        "flatpak"
    }

    fn name(&self) -> &str {
        "Flatpak"
    }

    fn supported(&self) -> bool {
        platform::is_supported(LINUX)
    }

    fn available(&self) -> bool {
        self.runner.available()
    }

    fn outdated(&self) -> Result<Vec<OutdatedPackage>> {
        let updates = self.runner.run(&[
            "remote-ls",
            "--updates",
            "--app",
            "--columns=application,version",
        ])?;
        if updates.trim().is_empty() {
            return Ok(Vec::new());
        }

        let installed = self
            .runner
            .run(&["list", "--app", "--columns=application,version"])?;

        Ok(parse_outdated(&installed, &updates))
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

/// Parse tab separated `application<TAB>version` rows
fn parse_columns(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let mut cols = line.split('\t');
            let app = cols.next()?.trim();
            if app.is_empty() {
                return None;
            }
            let version = cols.next().map(str::trim).unwrap_or_default();
            Some((app.to_string(), version.to_string()))
        })
        .collect()
}

fn version_or_unknown(version: &str) -> String {
    if version.is_empty() {
        "unknown".to_string()
    } else {
        version.to_string()
    }
}

pub fn parse_outdated(installed: &str, updates: &str) -> Vec<OutdatedPackage> {
    let installed: HashMap<String, String> = parse_columns(installed).into_iter().collect();

    parse_columns(updates)
        .into_iter()
        .map(|(app, latest)| OutdatedPackage {
            installed_version: version_or_unknown(
                installed.get(&app).map(String::as_str).unwrap_or_default(),
            ),
            latest_version: version_or_unknown(&latest),
            upgrade_cli: format!("flatpak update --noninteractive {}", app),
            name: app,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_outdated_joins_versions() {
        let installed = "com.spotify.Client\t1.2.3\norg.mozilla.firefox\t120.0\n";
        let updates = "org.mozilla.firefox\t121.0\n";

        let packages = parse_outdated(installed, updates);

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "org.mozilla.firefox");
        assert_eq!(packages[0].installed_version, "120.0");
        assert_eq!(packages[0].latest_version, "121.0");
        assert_eq!(
            packages[0].upgrade_cli,
            "flatpak update --noninteractive org.mozilla.firefox"
        );
    }

    #[test]
    fn test_missing_versions_are_unknown() {
        let packages = parse_outdated("", "org.gimp.GIMP\t\n\n");

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].installed_version, "unknown");
        assert_eq!(packages[0].latest_version, "unknown");
    }
}
