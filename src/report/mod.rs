//! Outdated package reports, one per selected manager.

pub mod bar;

use crate::error::Result;
use crate::packages::{OutdatedPackage, PackageManager};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerReport {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub error: Option<String>,
    pub packages: Vec<OutdatedPackage>,
}

/// Query one manager for its outdated packages.
///
/// Failures are folded into `error` unless the manager runs with
/// `stop_on_error`, in which case they are returned.
pub fn report_for(manager: &dyn PackageManager) -> Result<ManagerReport> {
    let (packages, failure) = match manager.outdated() {
        Ok(packages) => (packages, None),
        Err(e) if manager.stop_on_error() => return Err(e),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    let mut errors = manager.errors();
    errors.extend(failure);

    Ok(ManagerReport {
        id: manager.id().to_string(),
        name: manager.name().to_string(),
        error: (!errors.is_empty()).then(|| errors.join("\n")),
        packages,
    })
}

/// Build reports for a sequence of selected managers
pub fn collect_reports<'a, I>(selected: I) -> Result<Vec<ManagerReport>>
where
    I: IntoIterator<Item = Result<&'a dyn PackageManager>>,
{
    let mut reports = Vec::new();
    for manager in selected {
        let manager = manager?;
        tracing::debug!("Collecting outdated packages from {}", manager.id());
        reports.push(report_for(manager)?);
    }
    Ok(reports)
}

/// JSON object keyed by manager id
pub fn to_json(reports: &[ManagerReport]) -> Result<String> {
    let by_id: BTreeMap<&str, &ManagerReport> = reports
        .iter()
        .map(|report| (report.id.as_str(), report))
        .collect();
    Ok(serde_json::to_string_pretty(&by_id)?)
}
