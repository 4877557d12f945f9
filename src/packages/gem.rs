//! RubyGems package manager

use crate::error::Result;
use crate::packages::cli::CliRunner;
use crate::packages::traits::{ManagerOptions, OutdatedPackage, PackageManager, UpgradeOutcome};
use crate::utils::platform::{self, ANY_OS};
use regex::Regex;
use std::sync::LazyLock;

// rake (13.0.1 < 13.1.0)
static OUTDATED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>\S+) \((?P<installed>\S+) < (?P<latest>[^)\s]+)\)$")
        .expect("valid gem regex")
});

pub struct GemManager {
    runner: CliRunner,
}

impl GemManager {
    pub fn new() -> Self {
        Self {
            runner: CliRunner::new(&["gem"]),
        }
    }
}

impl Default for GemManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for GemManager {
    fn id(&self) -> &str {
        "gem"
    }

    fn name(&self) -> &str {
        "Ruby Gems"
    }

    fn supported(&self) -> bool {
        platform::is_supported(ANY_OS)
    }

    fn available(&self) -> bool {
        self.runner.available()
    }

    fn outdated(&self) -> Result<Vec<OutdatedPackage>> {
        let output = self.runner.run(&["outdated", "--quiet"])?;
        Ok(parse_outdated(&output))
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

pub fn parse_outdated(output: &str) -> Vec<OutdatedPackage> {
    output
        .lines()
        .filter_map(|line| OUTDATED_LINE.captures(line.trim()))
        .map(|caps| OutdatedPackage {
            name: caps["name"].to_string(),
            installed_version: caps["installed"].to_string(),
            latest_version: caps["latest"].to_string(),
            upgrade_cli: format!("gem update {}", &caps["name"]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_outdated() {
        let output = "bigdecimal (3.1.4 < 3.1.5)\nrake (13.0.1 < 13.1.0)\n";

        let packages = parse_outdated(output);

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[1].name, "rake");
        assert_eq!(packages[1].installed_version, "13.0.1");
        assert_eq!(packages[1].latest_version, "13.1.0");
        assert_eq!(packages[1].upgrade_cli, "gem update rake");
    }

    #[test]
    fn test_parse_ignores_other_lines() {
        assert!(parse_outdated("*** LOCAL GEMS ***\n\n").is_empty());
    }
}
