//! Homebrew package manager
//!
//! Formulae and casks share the `brew` binary but are reported as two
//! separate managers.

use crate::error::{PkgbarError, Result};
use crate::packages::cli::CliRunner;
use crate::packages::traits::{ManagerOptions, OutdatedPackage, PackageManager, UpgradeOutcome};
use crate::utils::platform::{self, MACOS, Os, UNIX_LIKE};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomebrewKind {
    Formula,
    Cask,
}

pub struct BrewManager {
    kind: HomebrewKind,
    runner: CliRunner,
}

impl BrewManager {
    pub fn formulae() -> Self {
        Self {
            kind: HomebrewKind::Formula,
            runner: CliRunner::new(&["brew"]),
        }
    }

    pub fn casks() -> Self {
        Self {
            kind: HomebrewKind::Cask,
            runner: CliRunner::new(&["brew"]),
        }
    }

    fn platforms(&self) -> &'static [Os] {
        match self.kind {
            HomebrewKind::Formula => UNIX_LIKE,
            HomebrewKind::Cask => MACOS,
        }
    }

    fn outdated_args(&self) -> Vec<&'static str> {
        let mut args = vec!["outdated", "--json=v2"];
        match self.kind {
            HomebrewKind::Formula => args.push("--formula"),
            HomebrewKind::Cask => {
                args.push("--cask");
                // Casks updating themselves are only listed with --greedy
                if !self.runner.options().ignore_auto_updates() {
                    args.push("--greedy");
                }
            }
        }
        args
    }
}

impl PackageManager for BrewManager {
    fn id(&self) -> &str {
        match self.kind {
            HomebrewKind::Formula => "brew",
            HomebrewKind::Cask => "cask",
        }
    }

    fn name(&self) -> &str {
        match self.kind {
            HomebrewKind::Formula => "Homebrew Formulae",
            HomebrewKind::Cask => "Homebrew Cask",
        }
    }

    fn supported(&self) -> bool {
        platform::is_supported(self.platforms())
    }

    fn available(&self) -> bool {
        self.runner.available()
    }

    fn outdated(&self) -> Result<Vec<OutdatedPackage>> {
        let output = self.runner.run(&self.outdated_args())?;
        parse_outdated(&output, self.kind)
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
struct BrewOutdated {
    #[serde(default)]
    formulae: Vec<BrewEntry>,
    #[serde(default)]
    casks: Vec<BrewEntry>,
}

#[derive(Debug, Deserialize)]
struct BrewEntry {
    name: String,
    installed_versions: InstalledVersions,
    current_version: String,
}

/// Formulae report a list of installed versions, older casks a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstalledVersions {
    Many(Vec<String>),
    One(String),
}

impl InstalledVersions {
    fn latest(&self) -> String {
        match self {
            InstalledVersions::Many(versions) => versions.last().cloned().unwrap_or_default(),
            InstalledVersions::One(version) => version.clone(),
        }
    }
}

/// Parse `brew outdated --json=v2` output
pub fn parse_outdated(output: &str, kind: HomebrewKind) -> Result<Vec<OutdatedPackage>> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }

    let parsed: BrewOutdated =
        serde_json::from_str(output).map_err(|e| PkgbarError::ParseError {
            file: "brew outdated".to_string(),
            message: e.to_string(),
        })?;

    let (entries, upgrade_prefix) = match kind {
        HomebrewKind::Formula => (parsed.formulae, "brew upgrade --formula"),
        HomebrewKind::Cask => (parsed.casks, "brew upgrade --cask"),
    };

    Ok(entries
        .into_iter()
        .map(|entry| OutdatedPackage {
            upgrade_cli: format!("{} {}", upgrade_prefix, entry.name),
            installed_version: entry.installed_versions.latest(),
            latest_version: entry.current_version,
            name: entry.name,
        })
        .collect())
}
