//! Menu-bar plugin output (BitBar, xbar, SwiftBar).
//!
//! The first line is the menu-bar title, every line after `---` is a
//! dropdown entry. Trailing `| key=value` pairs are plugin directives.

use crate::report::ManagerReport;

/// Render the full plugin output
pub fn render(reports: &[ManagerReport]) -> String {
    let mut sorted: Vec<&ManagerReport> = reports.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let total_outdated: usize = sorted.iter().map(|report| report.packages.len()).sum();
    let total_errors = sorted.iter().filter(|report| report.error.is_some()).count();

    let mut out = String::new();
    let warning = if total_errors > 0 {
        format!(" ⚠️{}", total_errors)
    } else {
        String::new()
    };
    out.push_str(&format!("↑{}{} | dropdown=false\n", total_outdated, warning));

    for report in sorted {
        out.push_str("---\n");

        if let Some(error) = &report.error {
            out.push_str(&render_error(error));
        }

        let count = report.packages.len();
        out.push_str(&format!(
            "{} outdated {} package{}\n",
            count,
            report.name,
            if count == 1 { "" } else { "s" }
        ));

        for package in &report.packages {
            out.push_str(&format!(
                "{} {} → {} | {} terminal=false refresh=true\n",
                package.name,
                package.installed_version,
                package.latest_version,
                action_params(&package.upgrade_cli)
            ));
        }
    }

    out
}

/// Output shown when the plugin cannot run at all
pub fn render_fatal(message: &str) -> String {
    let mut out = String::from("❌ | dropdown=false\n---\n");
    out.push_str(&render_error(message));
    out
}

/// Error text, one red line per input line
fn render_error(message: &str) -> String {
    message
        .trim()
        .lines()
        .map(|line| format!("{} | color=red font=Menlo\n", line))
        .collect()
}

/// Turn a command line into `bash=<program> param1=<arg> ...` directives
pub fn action_params(command: &str) -> String {
    let parts = shlex::split(command).unwrap_or_default();
    let Some((program, args)) = parts.split_first() else {
        return String::new();
    };

    let mut params = vec![format!("bash={}", program)];
    params.extend(
        args.iter()
            .enumerate()
            .map(|(index, arg)| format!("param{}={}", index + 1, arg)),
    );
    params.join(" ")
}
