//! # Package Managers
//!
//! Definitions of every package manager pkgbar can report on, and the
//! machinery selecting which ones to query.
//!
//! ## Architecture
//!
//! - [`traits`]: the `PackageManager` contract and the closed set of extra
//!   options (`ignore_auto_updates`, `stop_on_error`, `dry_run`)
//! - [`registry`]: the registration table and discovery, producing a
//!   read-only `ManagerRegistry`
//! - [`pool`]: process-lifetime cache of the registry and of the sorted,
//!   supported and unsupported id lists
//! - [`select`]: `select_managers`, filtering and configuring managers
//! - [`cli`]: shared command runner used by the concrete managers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pkgbar::packages::{ManagerPool, Selection};
//!
//! let pool = ManagerPool::default();
//! let selection = Selection::new().exclude(["pip"]).option("dry_run", true);
//! for manager in pool.select_managers(&selection)? {
//!     let manager = manager?;
//!     println!("{}: {} outdated", manager.id(), manager.outdated()?.len());
//! }
//! # Ok::<(), pkgbar::error::PkgbarError>(())
//! ```

pub mod apt;
pub mod brew;
pub mod cli;
pub mod flatpak;
pub mod gem;
pub mod mas;
pub mod npm;
pub mod pip;
pub mod pool;
pub mod registry;
pub mod select;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use pool::ManagerPool;
pub use registry::{ManagerCatalog, ManagerRegistry};
pub use select::{SelectedManagers, Selection};
pub use traits::{
    ExtraOption, ExtraOptions, ManagerOptions, OutdatedPackage, PackageManager, UpgradeOutcome,
};
