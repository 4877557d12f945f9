//! # Manager Selection
//!
//! `ManagerPool::select_managers` turns a `Selection` into the ordered,
//! configured managers a command should act on:
//!
//! 1. `keep` defaults to the supported ids (or all ids when
//!    `drop_unsupported` is off)
//! 2. ids are deduplicated, first occurrence wins
//! 3. ids in `drop` are removed
//! 4. each remaining manager is probed (when `drop_inactive`), configured
//!    with the extra options, then yielded
//!
//! All input validation happens before the first manager is yielded.
//! Probing and configuration happen lazily, one manager at a time.

use crate::error::{PkgbarError, Result};
use crate::packages::pool::ManagerPool;
use crate::packages::registry::ManagerRegistry;
use crate::packages::traits::{ExtraOption, ExtraOptions, PackageManager};
use std::collections::HashSet;

/// What to select from the pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Ids to keep, in order. `None` or empty selects the defaults.
    pub keep: Option<Vec<String>>,
    /// Ids to exclude
    pub drop: Vec<String>,
    /// Only controls the default of `keep`
    pub drop_unsupported: bool,
    /// Skip managers whose CLI is not found
    pub drop_inactive: bool,
    /// Option name and value pairs, validated at selection time
    pub extra_options: Vec<(String, bool)>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            keep: None,
            drop: Vec::new(),
            drop_unsupported: true,
            drop_inactive: true,
            extra_options: Vec::new(),
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn drop_unsupported(mut self, value: bool) -> Self {
        self.drop_unsupported = value;
        self
    }

    pub fn drop_inactive(mut self, value: bool) -> Self {
        self.drop_inactive = value;
        self
    }

    pub fn option(mut self, name: &str, value: bool) -> Self {
        self.extra_options.push((name.to_string(), value));
        self
    }
}

impl ManagerPool {
    /// Select, filter and configure managers.
    ///
    /// Fails before yielding anything if `keep` or `drop` name an unknown
    /// manager, or if an extra option is not one of the allowed names.
    pub fn select_managers(&self, selection: &Selection) -> Result<SelectedManagers<'_>> {
        let registry = self.registry()?;
        let all_ids = self.all_ids()?;

        let keep: Vec<String> = match &selection.keep {
            Some(ids) if !ids.is_empty() => ids.clone(),
            _ if selection.drop_unsupported => self.default_ids()?.to_vec(),
            _ => all_ids.to_vec(),
        };

        let known: HashSet<&str> = all_ids.iter().map(String::as_str).collect();
        check_known("keep", &keep, &known)?;
        check_known("drop", &selection.drop, &known)?;

        let options = parse_extra_options(&selection.extra_options)?;

        let dropped: HashSet<&str> = selection.drop.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let ids: Vec<String> = keep
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .filter(|id| !dropped.contains(id.as_str()))
            .collect();

        tracing::debug!("Manager candidates: {}", ids.join(", "));

        Ok(SelectedManagers {
            registry,
            ids: ids.into_iter(),
            drop_inactive: selection.drop_inactive,
            options,
        })
    }
}

fn check_known(field: &str, ids: &[String], known: &HashSet<&str>) -> Result<()> {
    let unknown: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| !known.contains(id))
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    Err(PkgbarError::SelectionPrecondition(format!(
        "unknown manager id(s) in {} list: {}",
        field,
        unknown.join(", ")
    )))
}

/// Validate option names into typed options. Later values win.
pub fn parse_extra_options(raw: &[(String, bool)]) -> Result<ExtraOptions> {
    let mut options = ExtraOptions::default();
    for (name, value) in raw {
        let option: ExtraOption = name.parse()?;
        options.set(option, *value);
    }
    Ok(options)
}

/// Lazy sequence of selected managers.
///
/// Each step may probe the manager's availability and configure it. A
/// configuration failure is yielded as an error and ends the sequence.
pub struct SelectedManagers<'a> {
    registry: &'a ManagerRegistry,
    ids: std::vec::IntoIter<String>,
    drop_inactive: bool,
    options: ExtraOptions,
}

impl<'a> SelectedManagers<'a> {
    /// Ids not yet considered
    #[cfg(test)]
    pub(crate) fn remaining_ids(&self) -> &[String] {
        self.ids.as_slice()
    }

    fn abort(&mut self, err: PkgbarError) -> Option<Result<&'a dyn PackageManager>> {
        self.ids = Vec::new().into_iter();
        Some(Err(err))
    }
}

impl<'a> Iterator for SelectedManagers<'a> {
    type Item = Result<&'a dyn PackageManager>;

    fn next(&mut self) -> Option<Self::Item> {
        let registry = self.registry;
        let options = self.options;

        while let Some(id) = self.ids.next() {
            let manager = match registry.get(&id) {
                Ok(manager) => manager,
                Err(e) => return self.abort(e),
            };

            if self.drop_inactive && !manager.available() {
                tracing::warn!("Skip unavailable {} manager.", id);
                continue;
            }

            for (option, value) in options.iter() {
                if let Err(e) = manager.set_option(option, value) {
                    return self.abort(e);
                }
            }

            return Some(Ok(manager));
        }

        None
    }
}
