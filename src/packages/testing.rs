//! In-memory managers for registry and selection tests

use crate::error::{PkgbarError, Result};
use crate::packages::registry::ManagerCatalog;
use crate::packages::traits::{ManagerOptions, OutdatedPackage, PackageManager, UpgradeOutcome};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone)]
pub struct FakeManager {
    pub id: String,
    pub supported: bool,
    pub available: bool,
    pub virtual_definition: bool,
    pub configurable: bool,
    pub packages: Vec<OutdatedPackage>,
    pub probes: Rc<Cell<usize>>,
    pub options: ManagerOptions,
    pub broken_outdated: bool,
    /// Packages whose upgrade fails
    pub broken_upgrades: Vec<String>,
    /// Names of packages really upgraded, in order
    pub upgraded: Rc<RefCell<Vec<String>>>,
}

impl FakeManager {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            supported: true,
            available: true,
            virtual_definition: false,
            configurable: true,
            packages: Vec::new(),
            probes: Rc::new(Cell::new(0)),
            options: ManagerOptions::default(),
            broken_outdated: false,
            broken_upgrades: Vec::new(),
            upgraded: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn virtual_definition(mut self) -> Self {
        self.virtual_definition = true;
        self
    }

    pub fn without_options(mut self) -> Self {
        self.configurable = false;
        self
    }

    pub fn with_package(mut self, name: &str, installed: &str, latest: &str) -> Self {
        self.packages.push(OutdatedPackage {
            name: name.to_string(),
            installed_version: installed.to_string(),
            latest_version: latest.to_string(),
            upgrade_cli: format!("{} upgrade {}", self.id, name),
        });
        self
    }

    pub fn failing_outdated(mut self) -> Self {
        self.broken_outdated = true;
        self
    }

    pub fn failing_upgrade(mut self, name: &str) -> Self {
        self.broken_upgrades.push(name.to_string());
        self
    }

    pub fn counting_probes(mut self, probes: &Rc<Cell<usize>>) -> Self {
        self.probes = Rc::clone(probes);
        self
    }
}

impl PackageManager for FakeManager {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_virtual(&self) -> bool {
        self.virtual_definition
    }

    fn supported(&self) -> bool {
        self.supported
    }

    fn available(&self) -> bool {
        self.probes.set(self.probes.get() + 1);
        self.available
    }

    fn outdated(&self) -> Result<Vec<OutdatedPackage>> {
        if self.broken_outdated {
            return Err(PkgbarError::SystemCommandFailed {
                command: format!("{} outdated", self.id),
                reason: "exited with exit status: 1".to_string(),
            });
        }
        Ok(self.packages.clone())
    }

    fn upgrade(&self, package: &OutdatedPackage) -> Result<UpgradeOutcome> {
        if self.options.dry_run() {
            return Ok(UpgradeOutcome::DryRun);
        }
        if self.broken_upgrades.contains(&package.name) {
            return Err(PkgbarError::SystemCommandFailed {
                command: package.upgrade_cli.clone(),
                reason: "exited with exit status: 1".to_string(),
            });
        }
        self.upgraded.borrow_mut().push(package.name.clone());
        Ok(UpgradeOutcome::Upgraded)
    }

    fn options(&self) -> Option<&ManagerOptions> {
        self.configurable.then_some(&self.options)
    }
}

/// Catalog building a fresh copy of each template on every discovery
pub fn catalog_of(templates: Vec<FakeManager>) -> ManagerCatalog {
    let mut catalog = ManagerCatalog::new();
    for template in templates {
        let source = format!("fake_{}", template.id);
        catalog.register(&source, move || Ok(Box::new(template.clone())));
    }
    catalog
}
