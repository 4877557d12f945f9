//! Command dispatcher
//!
//! Merges settings from the config file with the command line and routes
//! the parsed command to its handler.

use crate::cli::args::{Cli, Command, GlobalFlags, OutputFormat};
use crate::commands;
use crate::config::{self, Settings};
use crate::error::Result;
use crate::packages::{ExtraOption, ManagerPool, Selection};
use crate::report::bar;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    // Completions must work even with a broken config file
    if let Command::Completions { shell } = &args.command {
        return commands::completions::run(*shell);
    }

    let result = route(args);

    // The menu-bar host only shows stdout
    if let Err(e) = &result
        && matches!(
            args.command,
            Command::Outdated {
                format: OutputFormat::Bar
            }
        )
    {
        print!("{}", bar::render_fatal(&e.to_string()));
    }

    result
}

fn route(args: &Cli) -> Result<()> {
    let settings = config::load_settings(args.global.config.as_deref())?;
    let selection = build_selection(&args.global, &settings);
    let pool = ManagerPool::default();

    match &args.command {
        Command::Managers => commands::managers::run(&pool),
        Command::Outdated { format } => commands::outdated::run(&pool, &selection, *format),
        Command::Upgrade => commands::upgrade::run(&pool, &selection),
        Command::Completions { .. } => Ok(()),
    }
}

/// Combine file settings and command line flags into a selection.
///
/// Managers given on the command line replace those from the file.
/// Exclusions add up. Option flags are applied after the file's options so
/// they take precedence.
pub fn build_selection(flags: &GlobalFlags, settings: &Settings) -> Selection {
    let keep = if flags.managers.is_empty() {
        settings.managers.clone()
    } else {
        flags.managers.clone()
    };

    let mut exclude = settings.exclude.clone();
    exclude.extend(flags.exclude.iter().cloned());

    let all_managers = flags.all_managers || settings.all_managers.unwrap_or(false);
    let include_inactive = flags.include_inactive || settings.include_inactive.unwrap_or(false);

    let mut selection = Selection::new()
        .exclude(exclude)
        .drop_unsupported(!all_managers)
        .drop_inactive(!include_inactive);
    if !keep.is_empty() {
        selection = selection.keep(keep);
    }
    selection.extra_options = settings.options.clone();

    let flagged = [
        (ExtraOption::IgnoreAutoUpdates, flags.ignore_auto_updates),
        (ExtraOption::StopOnError, flags.stop_on_error),
        (ExtraOption::DryRun, flags.dry_run),
    ];
    for (option, set) in flagged {
        if set {
            selection = selection.option(option.as_str(), true);
        }
    }

    selection
}
