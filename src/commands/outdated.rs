use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::packages::{ManagerPool, Selection};
use crate::report::{self, bar};

/// Print outdated packages of the selected managers
pub fn run(pool: &ManagerPool, selection: &Selection, format: OutputFormat) -> Result<()> {
    let selected = pool.select_managers(selection)?;
    let reports = report::collect_reports(selected)?;

    match format {
        OutputFormat::Json => println!("{}", report::to_json(&reports)?),
        OutputFormat::Bar => print!("{}", bar::render(&reports)),
    }

    Ok(())
}
