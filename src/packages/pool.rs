//! # Manager Pool
//!
//! The pool owns the registry for the life of the process. Discovery runs
//! on first access and its result, along with the id orderings derived
//! from it, is memoized. The pool is built once in the entry point and
//! handed to whatever needs managers.

use crate::error::Result;
use crate::packages::registry::{ManagerCatalog, ManagerRegistry};
use std::cell::OnceCell;
use std::collections::HashSet;

pub struct ManagerPool {
    catalog: ManagerCatalog,
    registry: OnceCell<ManagerRegistry>,
    all_ids: OnceCell<Vec<String>>,
    default_ids: OnceCell<Vec<String>>,
    unsupported_ids: OnceCell<Vec<String>>,
}

impl ManagerPool {
    pub fn new(catalog: ManagerCatalog) -> Self {
        Self {
            catalog,
            registry: OnceCell::new(),
            all_ids: OnceCell::new(),
            default_ids: OnceCell::new(),
            unsupported_ids: OnceCell::new(),
        }
    }

    /// The registry, discovered on first call
    pub fn registry(&self) -> Result<&ManagerRegistry> {
        if let Some(registry) = self.registry.get() {
            return Ok(registry);
        }

        let registry = self.catalog.discover()?;
        tracing::debug!("Registered {} package managers", registry.len());
        Ok(self.registry.get_or_init(|| registry))
    }

    /// All manager ids, sorted
    pub fn all_ids(&self) -> Result<&[String]> {
        if let Some(ids) = self.all_ids.get() {
            return Ok(ids.as_slice());
        }

        let mut ids: Vec<String> = self.registry()?.keys().map(str::to_string).collect();
        ids.sort();
        Ok(self.all_ids.get_or_init(|| ids).as_slice())
    }

    /// Ids of managers supported on this platform, in `all_ids` order
    pub fn default_ids(&self) -> Result<&[String]> {
        if let Some(ids) = self.default_ids.get() {
            return Ok(ids.as_slice());
        }

        let registry = self.registry()?;
        let mut ids = Vec::new();
        for id in self.all_ids()? {
            if registry.get(id)?.supported() {
                ids.push(id.clone());
            }
        }
        Ok(self.default_ids.get_or_init(|| ids).as_slice())
    }

    /// Ids of managers not supported on this platform.
    ///
    /// Only used to discard managers, callers must not rely on the order.
    pub fn unsupported_ids(&self) -> Result<&[String]> {
        if let Some(ids) = self.unsupported_ids.get() {
            return Ok(ids.as_slice());
        }

        let supported: HashSet<&str> = self.default_ids()?.iter().map(String::as_str).collect();
        let ids: Vec<String> = self
            .all_ids()?
            .iter()
            .filter(|id| !supported.contains(id.as_str()))
            .cloned()
            .collect();
        Ok(self.unsupported_ids.get_or_init(|| ids).as_slice())
    }
}

impl Default for ManagerPool {
    fn default() -> Self {
        Self::new(ManagerCatalog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::testing::{FakeManager, catalog_of};
    use std::cell::Cell;
    use std::rc::Rc;

    fn sample_pool() -> ManagerPool {
        ManagerPool::new(catalog_of(vec![
            FakeManager::new("pip"),
            FakeManager::new("brew").unsupported(),
            FakeManager::new("apt"),
            FakeManager::new("mas").unsupported(),
        ]))
    }

    #[test]
    fn test_all_ids_sorted() {
        let pool = sample_pool();

        assert_eq!(pool.all_ids().unwrap(), ["apt", "brew", "mas", "pip"]);
    }

    #[test]
    fn test_all_ids_stable_across_calls() {
        let pool = sample_pool();

        let first = pool.all_ids().unwrap().to_vec();
        let second = pool.all_ids().unwrap().to_vec();

        assert_eq!(first, second);
        assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_default_ids_keep_sorted_order() {
        let pool = sample_pool();

        assert_eq!(pool.default_ids().unwrap(), ["apt", "pip"]);
    }

    #[test]
    fn test_partition_law() {
        let pool = sample_pool();
        let registry = pool.registry().unwrap();

        let all: HashSet<&String> = pool.all_ids().unwrap().iter().collect();
        let supported: HashSet<&String> = pool.default_ids().unwrap().iter().collect();
        let unsupported: HashSet<&String> = pool.unsupported_ids().unwrap().iter().collect();

        assert!(supported.is_disjoint(&unsupported));
        let union: HashSet<&String> = supported.union(&unsupported).copied().collect();
        assert_eq!(union, all);
        for id in &all {
            assert_eq!(
                supported.contains(id),
                registry.get(id).unwrap().supported()
            );
        }
    }

    #[test]
    fn test_registry_built_once() {
        let builds = Rc::new(Cell::new(0));
        let counter = Rc::clone(&builds);
        let mut catalog = ManagerCatalog::new();
        catalog.register("counted", move || {
            counter.set(counter.get() + 1);
            Ok(Box::new(FakeManager::new("apt")))
        });
        let pool = ManagerPool::new(catalog);

        pool.registry().unwrap();
        pool.all_ids().unwrap();
        pool.default_ids().unwrap();
        pool.unsupported_ids().unwrap();

        assert_eq!(builds.get(), 1);
    }

    #[test]
    fn test_callers_share_instances() {
        let pool = sample_pool();

        let first = pool.registry().unwrap().get("apt").unwrap();
        let second = pool.registry().unwrap().get("apt").unwrap();

        assert!(std::ptr::addr_eq(first, second));
    }

    #[test]
    fn test_failed_discovery_is_not_cached_as_partial() {
        let mut catalog = ManagerCatalog::new();
        catalog.register("apt", || Ok(Box::new(FakeManager::new("apt"))));
        catalog.register("broken", || {
            Err(crate::error::PkgbarError::Other("boom".to_string()))
        });
        let pool = ManagerPool::new(catalog);

        assert!(pool.registry().is_err());
        assert!(pool.all_ids().is_err());
    }
}
