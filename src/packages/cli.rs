//! Shared plumbing for managers driven through their command line.
//!
//! `CliRunner` locates the manager's binary, runs it, and applies the
//! `stop_on_error` and `dry_run` options uniformly across adapters.

use crate::error::{PkgbarError, Result};
use crate::packages::traits::{ManagerOptions, UpgradeOutcome};
use std::cell::{OnceCell, RefCell};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub struct CliRunner {
    /// Binary names tried in order, e.g. `["pip3", "pip"]`
    binaries: &'static [&'static str],
    resolved: OnceCell<Option<PathBuf>>,
    options: ManagerOptions,
    errors: RefCell<Vec<String>>,
}

impl CliRunner {
    pub fn new(binaries: &'static [&'static str]) -> Self {
        Self {
            binaries,
            resolved: OnceCell::new(),
            options: ManagerOptions::default(),
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Full path of the first binary found on `PATH`. Looked up once.
    pub fn binary(&self) -> Option<&Path> {
        self.resolved
            .get_or_init(|| {
                self.binaries.iter().find_map(|bin| {
                    let found = which::which(bin).ok();
                    tracing::debug!("Looking up {}: {:?}", bin, found);
                    found
                })
            })
            .as_deref()
    }

    /// Name to use when printing commands for the user
    pub fn binary_name(&self) -> &str {
        self.binary()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .or_else(|| self.binaries.first().copied())
            .unwrap_or("unknown")
    }

    pub fn available(&self) -> bool {
        self.binary().is_some()
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// Run the manager binary and return its stdout
    pub fn run(&self, args: &[&str]) -> Result<String> {
        self.run_allowing(args, &[0])
    }

    /// Same as `run`, treating the listed exit codes as success
    pub fn run_allowing(&self, args: &[&str], ok_codes: &[i32]) -> Result<String> {
        let shown = format!("{} {}", self.binary_name(), args.join(" "));

        let Some(binary) = self.binary() else {
            return self.fail(shown, "executable not found in PATH".to_string());
        };

        tracing::debug!("Running: {}", shown);
        let output = match Command::new(binary).args(args).output() {
            Ok(output) => output,
            Err(e) => return self.fail(shown, e.to_string()),
        };

        let succeeded = output
            .status
            .code()
            .is_some_and(|code| ok_codes.contains(&code));

        if !succeeded {
            return self.fail(shown, failure_reason(&output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a full command line such as an `upgrade_cli`.
    ///
    /// Nothing is executed in dry-run mode. Failures are returned, never
    /// recorded, so the caller can count them.
    pub fn run_command_line(&self, line: &str) -> Result<UpgradeOutcome> {
        let parts = shlex::split(line).ok_or_else(|| PkgbarError::ParseError {
            file: "<command line>".to_string(),
            message: format!("cannot split '{}'", line),
        })?;

        let Some((program, args)) = parts.split_first() else {
            return Err(PkgbarError::PackageManagerError(
                "empty command line".to_string(),
            ));
        };

        if self.options.dry_run() {
            tracing::info!("Dry run: {}", line);
            return Ok(UpgradeOutcome::DryRun);
        }

        tracing::debug!("Running: {}", line);
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| PkgbarError::SystemCommandFailed {
                command: line.to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PkgbarError::SystemCommandFailed {
                command: line.to_string(),
                reason: failure_reason(&output),
            });
        }

        Ok(UpgradeOutcome::Upgraded)
    }

    /// Either abort or remember the failure, depending on `stop_on_error`
    fn fail(&self, command: String, reason: String) -> Result<String> {
        if self.options.stop_on_error() {
            return Err(PkgbarError::SystemCommandFailed { command, reason });
        }

        tracing::debug!("Recording error for '{}': {}", command, reason);
        self.errors
            .borrow_mut()
            .push(format!("{}: {}", command, reason));
        Ok(String::new())
    }
}

/// Stderr of a failed command, or its exit status when stderr is empty
fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        stderr
    }
}
