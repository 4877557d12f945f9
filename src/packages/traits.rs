use crate::error::{PkgbarError, Result};
use serde::Serialize;
use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

/// One package with a newer version available
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedPackage {
    pub name: String,
    pub installed_version: String,
    pub latest_version: String,
    /// Full command line upgrading this single package
    pub upgrade_cli: String,
}

/// What happened to a package handed to `PackageManager::upgrade`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Upgraded,
    /// `dry_run` was set, the command was only logged
    DryRun,
}

/// The closed set of options a selection may push onto managers.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ExtraOption {
    IgnoreAutoUpdates,
    StopOnError,
    DryRun,
}

impl ExtraOption {
    pub const ALL: [ExtraOption; 3] = [
        ExtraOption::IgnoreAutoUpdates,
        ExtraOption::StopOnError,
        ExtraOption::DryRun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IgnoreAutoUpdates => "ignore_auto_updates",
            Self::StopOnError => "stop_on_error",
            Self::DryRun => "dry_run",
        }
    }
}

impl fmt::Display for ExtraOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExtraOption {
    type Err = PkgbarError;

    fn from_str(s: &str) -> Result<Self> {
        ExtraOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| {
                PkgbarError::SelectionPrecondition(format!(
                    "unknown option '{}' (allowed: {})",
                    s,
                    allowed_option_names()
                ))
            })
    }
}

pub fn allowed_option_names() -> String {
    ExtraOption::ALL
        .iter()
        .map(ExtraOption::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validated option values to apply on selected managers.
///
/// `None` leaves the manager's current value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraOptions {
    pub ignore_auto_updates: Option<bool>,
    pub stop_on_error: Option<bool>,
    pub dry_run: Option<bool>,
}

impl ExtraOptions {
    pub fn set(&mut self, option: ExtraOption, value: bool) {
        match option {
            ExtraOption::IgnoreAutoUpdates => self.ignore_auto_updates = Some(value),
            ExtraOption::StopOnError => self.stop_on_error = Some(value),
            ExtraOption::DryRun => self.dry_run = Some(value),
        }
    }

    pub fn get(&self, option: ExtraOption) -> Option<bool> {
        match option {
            ExtraOption::IgnoreAutoUpdates => self.ignore_auto_updates,
            ExtraOption::StopOnError => self.stop_on_error,
            ExtraOption::DryRun => self.dry_run,
        }
    }

    /// Options explicitly set, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ExtraOption, bool)> + '_ {
        ExtraOption::ALL
            .into_iter()
            .filter_map(|option| self.get(option).map(|value| (option, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Option storage carried by every concrete manager instance
#[derive(Debug, Clone, Default)]
pub struct ManagerOptions {
    ignore_auto_updates: Cell<bool>,
    stop_on_error: Cell<bool>,
    dry_run: Cell<bool>,
}

impl ManagerOptions {
    pub fn set(&self, option: ExtraOption, value: bool) {
        match option {
            ExtraOption::IgnoreAutoUpdates => self.ignore_auto_updates.set(value),
            ExtraOption::StopOnError => self.stop_on_error.set(value),
            ExtraOption::DryRun => self.dry_run.set(value),
        }
    }

    pub fn get(&self, option: ExtraOption) -> bool {
        match option {
            ExtraOption::IgnoreAutoUpdates => self.ignore_auto_updates.get(),
            ExtraOption::StopOnError => self.stop_on_error.get(),
            ExtraOption::DryRun => self.dry_run.get(),
        }
    }

    pub fn ignore_auto_updates(&self) -> bool {
        self.ignore_auto_updates.get()
    }

    pub fn stop_on_error(&self) -> bool {
        self.stop_on_error.get()
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run.get()
    }
}

/// A package manager backend known to pkgbar.
///
/// Implementations are instantiated once by discovery and shared for the
/// whole process. Options are set through `&self` since the selector only
/// ever holds shared borrows of registered managers.
pub trait PackageManager {
    /// Unique identifier, usually the CLI name
    fn id(&self) -> &str;

    /// Human readable name
    fn name(&self) -> &str {
        self.id()
    }

    /// Abstract definitions are never registered
    fn is_virtual(&self) -> bool {
        false
    }

    /// Whether the manager runs on the current platform
    fn supported(&self) -> bool;

    /// Whether the manager's CLI is present and runnable right now
    fn available(&self) -> bool;

    /// List packages with a newer version available
    fn outdated(&self) -> Result<Vec<OutdatedPackage>>;

    /// Upgrade a single package previously reported by `outdated()`.
    ///
    /// A failing upgrade is always an error, whatever `stop_on_error` says.
    /// Callers decide whether to carry on.
    fn upgrade(&self, package: &OutdatedPackage) -> Result<UpgradeOutcome> {
        Err(PkgbarError::PackageManagerError(format!(
            "{} cannot upgrade {}",
            self.id(),
            package.name
        )))
    }

    /// Errors collected from CLI calls while `stop_on_error` was off
    fn errors(&self) -> Vec<String> {
        Vec::new()
    }

    /// Configurable option surface, if any
    fn options(&self) -> Option<&ManagerOptions> {
        None
    }

    fn set_option(&self, option: ExtraOption, value: bool) -> Result<()> {
        let options = self
            .options()
            .ok_or_else(|| PkgbarError::OptionApplication {
                manager: self.id().to_string(),
                option: option.to_string(),
            })?;
        options.set(option, value);
        Ok(())
    }

    fn stop_on_error(&self) -> bool {
        self.options().is_some_and(ManagerOptions::stop_on_error)
    }
}
