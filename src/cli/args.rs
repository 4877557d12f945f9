use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pkgbar",
    about = "Outdated packages across every package manager",
    long_about = "Query installed package managers for outdated packages, \
                  upgrade them, and render the result for a menu-bar plugin",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Restrict to this manager (repeatable, order is kept)
    #[arg(
        short = 'm',
        long = "manager",
        value_name = "ID",
        global = true,
        help_heading = "Selection"
    )]
    pub managers: Vec<String>,

    /// Never use this manager (repeatable)
    #[arg(
        short = 'x',
        long = "exclude",
        value_name = "ID",
        global = true,
        help_heading = "Selection"
    )]
    pub exclude: Vec<String>,

    /// Also consider managers not supported on this platform
    #[arg(long, global = true, help_heading = "Selection")]
    pub all_managers: bool,

    /// Keep managers whose CLI is not installed
    #[arg(long, global = true, help_heading = "Selection")]
    pub include_inactive: bool,

    /// Skip packages that update themselves (casks)
    #[arg(long, global = true, help_heading = "Manager options")]
    pub ignore_auto_updates: bool,

    /// Abort on the first failing manager command
    #[arg(long, global = true, help_heading = "Manager options")]
    pub stop_on_error: bool,

    /// Print upgrade commands instead of running them
    #[arg(long, global = true, help_heading = "Manager options")]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List known package managers and their status
    Managers,

    /// Show outdated packages
    Outdated {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Bar)]
        format: OutputFormat,
    },

    /// Upgrade all outdated packages
    Upgrade,

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON object keyed by manager id
    Json,
    /// Menu-bar plugin text
    #[default]
    Bar,
}
