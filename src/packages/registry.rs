//! # Manager Registration and Discovery
//!
//! Every package manager pkgbar knows about is listed in a `ManagerCatalog`:
//! an ordered table of named factories. Discovery walks that table once,
//! instantiates each definition, drops the virtual ones, and produces a
//! `ManagerRegistry` keyed by manager id.
//!
//! ## Adding a New Manager
//!
//! 1. Create `src/packages/<manager>.rs` with a struct implementing
//!    `PackageManager`
//! 2. Register it in `ManagerCatalog::register_defaults()`
//!
//! ## Failure Policy
//!
//! Discovery is all-or-nothing. A factory error, an empty id or two
//! definitions claiming the same id abort the whole pass, so a partially
//! built registry is never observable.

use crate::error::{PkgbarError, Result};
use crate::packages::PackageManager;
use crate::packages::apt::AptManager;
use crate::packages::brew::BrewManager;
use crate::packages::flatpak::FlatpakManager;
use crate::packages::gem::GemManager;
use crate::packages::mas::MasManager;
use crate::packages::npm::NpmManager;
use crate::packages::pip::PipManager;
use std::collections::HashMap;

/// Factory function for creating package manager definitions
pub type ManagerFactory = Box<dyn Fn() -> Result<Box<dyn PackageManager>>>;

/// Ordered registration table of manager definitions
pub struct ManagerCatalog {
    sources: Vec<(String, ManagerFactory)>,
}

impl ManagerCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Register a definition source with its factory function
    pub fn register<F>(&mut self, source: &str, factory: F)
    where
        F: Fn() -> Result<Box<dyn PackageManager>> + 'static,
    {
        self.sources.push((source.to_string(), Box::new(factory)));
    }

    /// Register all built-in managers
    pub fn register_defaults(&mut self) {
        self.register("apt", || Ok(Box::new(AptManager::new())));
        self.register("brew", || Ok(Box::new(BrewManager::formulae())));
        self.register("cask", || Ok(Box::new(BrewManager::casks())));
        self.register("flatpak", || Ok(Box::new(FlatpakManager::new())));
        self.register("gem", || Ok(Box::new(GemManager::new())));
        self.register("mas", || Ok(Box::new(MasManager::new())));
        self.register("npm", || Ok(Box::new(NpmManager::new())));
        self.register("pip", || Ok(Box::new(PipManager::new())));
    }

    /// Names of the registered sources, in registration order
    #[cfg(test)]
    pub(crate) fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Instantiate every non-virtual definition and index it by id
    pub fn discover(&self) -> Result<ManagerRegistry> {
        let mut managers: HashMap<String, Box<dyn PackageManager>> = HashMap::new();
        let mut origins: HashMap<String, &str> = HashMap::new();

        for (source, factory) in &self.sources {
            tracing::debug!("Search manager definition in {}", source);

            let manager = factory().map_err(|e| PkgbarError::Discovery {
                source_name: source.clone(),
                reason: e.to_string(),
            })?;

            if manager.is_virtual() {
                tracing::debug!("{} is not a valid manager definition (virtual)", source);
                continue;
            }

            let id = manager.id().to_string();
            if id.is_empty() {
                return Err(PkgbarError::Discovery {
                    source_name: source.clone(),
                    reason: "definition has an empty id".to_string(),
                });
            }

            if let Some(first) = origins.get(&id) {
                return Err(PkgbarError::DuplicateManager {
                    id,
                    first: first.to_string(),
                    second: source.clone(),
                });
            }

            tracing::debug!("Found {} manager in {}", id, source);
            origins.insert(id.clone(), source);
            managers.insert(id, manager);
        }

        Ok(ManagerRegistry { managers })
    }
}

impl Default for ManagerCatalog {
    fn default() -> Self {
        let mut catalog = Self::new();
        catalog.register_defaults();
        catalog
    }
}

/// Read-only map of manager id to definition
pub struct ManagerRegistry {
    managers: HashMap<String, Box<dyn PackageManager>>,
}

impl ManagerRegistry {
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.managers.contains_key(id)
    }

    /// Registered ids, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.managers.keys().map(String::as_str)
    }

    pub fn get(&self, id: &str) -> Result<&dyn PackageManager> {
        self.managers
            .get(id)
            .map(|manager| manager.as_ref())
            .ok_or_else(|| PkgbarError::UnknownManager(id.to_string()))
    }

    pub fn values(&self) -> impl Iterator<Item = &dyn PackageManager> {
        self.managers.values().map(|manager| manager.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn PackageManager)> {
        self.managers
            .iter()
            .map(|(id, manager)| (id.as_str(), manager.as_ref()))
    }
}
