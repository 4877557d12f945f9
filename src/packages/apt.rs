//! APT package manager (Debian, Ubuntu and derivatives)

use crate::error::Result;
use crate::packages::cli::CliRunner;
use crate::packages::traits::{ManagerOptions, OutdatedPackage, PackageManager, UpgradeOutcome};
use crate::utils::platform::{self, LINUX};
use regex::Regex;
use std::sync::LazyLock;

// apt/jammy-updates 2.4.11 amd64 [upgradable from: 2.4.10]
static UPGRADABLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^/\s]+)/\S+\s+(?P<latest>\S+)\s+\S+\s+\[upgradable from: (?P<installed>[^\]]+)\]")
        .expect("valid apt regex")
});

pub struct AptManager {
    runner: CliRunner,
}

impl AptManager {
    pub fn new() -> Self {
        Self {
            runner: CliRunner::new(&["apt"]),
        }
    }
}

impl Default for AptManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for AptManager {
    fn id(&self) -> &str {
        "apt"
    }

    fn name(&self) -> &str {
        "APT"
    }

    fn supported(&self) -> bool {
        platform::is_supported(LINUX)
    }

    fn available(&self) -> bool {
        self.runner.available()
    }

    fn outdated(&self) -> Result<Vec<OutdatedPackage>> {
        let output = self.runner.run(&["list", "--upgradable", "--quiet"])?;
        Ok(parse_upgradable(&output))
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

/// Parse `apt list --upgradable` output
pub fn parse_upgradable(output: &str) -> Vec<OutdatedPackage> {
    output
        .lines()
        .filter_map(|line| UPGRADABLE_LINE.captures(line.trim()))
        .map(|caps| {
            let name = caps["name"].to_string();
            OutdatedPackage {
                upgrade_cli: format!("sudo apt install --only-upgrade {}", name),
                installed_version: caps["installed"].to_string(),
                latest_version: caps["latest"].to_string(),
                name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upgradable() {
        let output = "Listing... Done\n\
            apt/jammy-updates 2.4.11 amd64 [upgradable from: 2.4.10]\n\
            libssl3/jammy-security 3.0.2-0ubuntu1.12 amd64 [upgradable from: 3.0.2-0ubuntu1.10]\n";

        let packages = parse_upgradable(output);

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "apt");
        assert_eq!(packages[0].installed_version, "2.4.10");
        assert_eq!(packages[0].latest_version, "2.4.11");
        assert_eq!(
            packages[0].upgrade_cli,
            "sudo apt install --only-upgrade apt"
        );
        assert_eq!(packages[1].name, "libssl3");
        assert_eq!(packages[1].latest_version, "3.0.2-0ubuntu1.12");
    }

    #[test]
    fn test_parse_upgradable_ignores_noise() {
        let output = "WARNING: apt does not have a stable CLI interface.\n\nListing...\n";
        assert!(parse_upgradable(output).is_empty());
    }

    #[test]
    fn test_apt_identity() {
        let apt = AptManager::new();
        assert_eq!(apt.id(), "apt");
        assert!(!apt.is_virtual());
        assert!(apt.options().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_upgrade_is_reported() {
        let apt = AptManager::new();
        let package = OutdatedPackage {
            name: "curl".to_string(),
            installed_version: "7.88.1-10".to_string(),
            latest_version: "7.88.1-10+deb12u5".to_string(),
            upgrade_cli: "false".to_string(),
        };

        assert!(apt.upgrade(&package).is_err());
    }
}
