//! Managers command
//!
//! Lists every registered manager with its platform support and whether
//! its CLI was found.

use crate::error::Result;
use crate::packages::ManagerPool;
use crate::ui as output;
use crate::utils::platform;
use colored::Colorize;

pub fn run(pool: &ManagerPool) -> Result<()> {
    let registry = pool.registry()?;

    output::header("Package managers");
    output::keyval("Platform", platform::current_os_tag());
    println!();

    println!(
        "{:<10} {:<24} {:<10} {}",
        "ID".bold(),
        "NAME".bold(),
        "SUPPORTED".bold(),
        "AVAILABLE".bold()
    );

    for id in pool.all_ids()? {
        let manager = registry.get(id)?;
        let supported = manager.supported();
        // Probing an unsupported manager is pointless
        let available = supported && manager.available();
        println!(
            "{:<10} {:<24} {:<10} {}",
            id.cyan(),
            manager.name(),
            output::mark(supported),
            output::mark(available)
        );
    }

    println!();
    output::info(&format!(
        "{} registered, {} supported on this platform",
        pool.all_ids()?.len(),
        pool.default_ids()?.len()
    ));

    Ok(())
}
