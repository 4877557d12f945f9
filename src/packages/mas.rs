//! Mac App Store, through the `mas` CLI

use crate::error::Result;
use crate::packages::cli::CliRunner;
use crate::packages::traits::{ManagerOptions, OutdatedPackage, PackageManager, UpgradeOutcome};
use crate::utils::platform::{self, MACOS};
use regex::Regex;
use std::sync::LazyLock;

// 497799835 Xcode (15.0 -> 15.1)
static OUTDATED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<app_id>\d+)\s+(?P<name>.+?)\s+\((?P<installed>\S+)\s+->\s+(?P<latest>[^)\s]+)\)$")
        .expect("valid mas regex")
});

pub struct MasManager {
    runner: CliRunner,
}

impl MasManager {
    pub fn new() -> Self {
        Self {
            runner: CliRunner::new(&["mas"]),
        }
    }
}

impl Default for MasManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for MasManager {
    fn id(&self) -> &str {
        "mas"
    }

    fn name(&self) -> &str {
        "Mac AppStore"
    }

    fn supported(&self) -> bool {
        platform::is_supported(MACOS)
    }

    fn available(&self) -> bool {
        self.runner.available()
    }

    fn outdated(&self) -> Result<Vec<OutdatedPackage>> {
        let output = self.runner.run(&["outdated"])?;
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
            upgrade_cli: format!("mas upgrade {}", &caps["app_id"]),
        })
        .collect()
}
