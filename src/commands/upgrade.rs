//! Upgrade command
//!
//! Upgrades every outdated package reported by the selected managers, one
//! package at a time, using the command each manager suggests.

use crate::error::Result;
use crate::packages::{ManagerPool, PackageManager, Selection, UpgradeOutcome};
use crate::ui as output;
use std::ops::AddAssign;

/// Per-package results of an upgrade run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeSummary {
    pub upgraded: usize,
    pub dry_run: usize,
    pub failed: usize,
}

impl UpgradeSummary {
    pub fn is_empty(&self) -> bool {
        self.upgraded == 0 && self.dry_run == 0 && self.failed == 0
    }
}

impl AddAssign for UpgradeSummary {
    fn add_assign(&mut self, other: Self) {
        self.upgraded += other.upgraded;
        self.dry_run += other.dry_run;
        self.failed += other.failed;
    }
}

pub fn run(pool: &ManagerPool, selection: &Selection) -> Result<()> {
    let summary = upgrade_all(pool, selection)?;

    if summary.is_empty() {
        output::success("Everything is up to date");
        return Ok(());
    }
    if summary.upgraded > 0 {
        output::success(&format!("Upgraded {} package(s)", summary.upgraded));
    }
    if summary.dry_run > 0 {
        output::info(&format!(
            "Dry run: {} package(s) would be upgraded",
            summary.dry_run
        ));
    }
    if summary.failed > 0 {
        output::warning(&format!("Failed to upgrade {} package(s)", summary.failed));
    }

    Ok(())
}

/// Upgrade the outdated packages of every selected manager
pub fn upgrade_all(pool: &ManagerPool, selection: &Selection) -> Result<UpgradeSummary> {
    let mut summary = UpgradeSummary::default();
    for manager in pool.select_managers(selection)? {
        summary += upgrade_manager(manager?)?;
    }
    Ok(summary)
}

fn upgrade_manager(manager: &dyn PackageManager) -> Result<UpgradeSummary> {
    let mut summary = UpgradeSummary::default();

    let packages = match manager.outdated() {
        Ok(packages) => packages,
        Err(e) if manager.stop_on_error() => return Err(e),
        Err(e) => {
            output::warning(&format!("{}: {}", manager.name(), e));
            return Ok(summary);
        }
    };

    // Failures recorded while listing outdated packages
    for error in manager.errors() {
        output::warning(&format!("{}: {}", manager.name(), error));
    }

    if packages.is_empty() {
        tracing::debug!("{} has nothing to upgrade", manager.id());
        return Ok(summary);
    }

    output::header(&format!(
        "Upgrading {} package(s) with {}",
        packages.len(),
        manager.name()
    ));

    for package in &packages {
        output::indent(
            &format!(
                "{} {} → {}",
                package.name, package.installed_version, package.latest_version
            ),
            1,
        );
        match manager.upgrade(package) {
            Ok(UpgradeOutcome::Upgraded) => summary.upgraded += 1,
            Ok(UpgradeOutcome::DryRun) => summary.dry_run += 1,
            Err(e) if manager.stop_on_error() => return Err(e),
            Err(e) => {
                output::warning(&format!("{}: {}", package.name, e));
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PkgbarError;
    use crate::packages::ExtraOption;
    use crate::packages::testing::{FakeManager, catalog_of};

    fn pool_of(managers: Vec<FakeManager>) -> ManagerPool {
        ManagerPool::new(catalog_of(managers))
    }

    #[test]
    fn test_counts_upgraded_and_failed_packages() {
        let pool = pool_of(vec![
            FakeManager::new("npm")
                .with_package("npm", "9.8.1", "10.2.4")
                .with_package("typescript", "5.1.6", "5.3.3")
                .failing_upgrade("typescript"),
            FakeManager::new("pip").with_package("requests", "2.28.0", "2.31.0"),
        ]);

        let summary = upgrade_all(&pool, &Selection::new()).unwrap();

        assert_eq!(
            summary,
            UpgradeSummary {
                upgraded: 2,
                dry_run: 0,
                failed: 1
            }
        );
    }

    #[test]
    fn test_upgrades_run_in_package_order() {
        let npm = FakeManager::new("npm")
            .with_package("npm", "9.8.1", "10.2.4")
            .with_package("yarn", "1.22.19", "1.22.21");
        let upgraded = npm.upgraded.clone();

        upgrade_manager(&npm).unwrap();

        assert_eq!(*upgraded.borrow(), vec!["npm", "yarn"]);
    }

    #[test]
    fn test_dry_run_is_counted_apart() {
        let pool = pool_of(vec![
            FakeManager::new("gem").with_package("rake", "13.0.1", "13.1.0"),
        ]);
        let selection = Selection::new().option("dry_run", true);

        let summary = upgrade_all(&pool, &selection).unwrap();

        assert_eq!(summary.upgraded, 0);
        assert_eq!(summary.dry_run, 1);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_failing_upgrade_aborts_with_stop_on_error() {
        let manager = FakeManager::new("npm")
            .with_package("npm", "9.8.1", "10.2.4")
            .with_package("typescript", "5.1.6", "5.3.3")
            .failing_upgrade("npm");
        let upgraded = manager.upgraded.clone();
        manager.set_option(ExtraOption::StopOnError, true).unwrap();

        let err = upgrade_manager(&manager).unwrap_err();

        assert!(matches!(err, PkgbarError::SystemCommandFailed { .. }));
        assert!(upgraded.borrow().is_empty());
    }

    #[test]
    fn test_failing_outdated_is_skipped_without_stop_on_error() {
        let manager = FakeManager::new("brew")
            .with_package("git", "2.42.0", "2.43.0")
            .failing_outdated();

        let summary = upgrade_manager(&manager).unwrap();

        assert!(summary.is_empty());
    }

    #[test]
    fn test_failing_outdated_aborts_with_stop_on_error() {
        let pool = pool_of(vec![
            FakeManager::new("brew").failing_outdated(),
            FakeManager::new("npm").with_package("npm", "9.8.1", "10.2.4"),
        ]);
        let selection = Selection::new().option("stop_on_error", true);

        assert!(upgrade_all(&pool, &selection).is_err());
    }

    #[test]
    fn test_nothing_to_upgrade() {
        let pool = pool_of(vec![FakeManager::new("apt")]);

        assert!(upgrade_all(&pool, &Selection::new()).unwrap().is_empty());
    }
}
