use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkgbarError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("Parsing error in '{file}': {message}")]
    ParseError { file: String, message: String },

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// A manager definition could not be loaded during discovery
    #[error("Failed to load manager definition '{source_name}': {reason}")]
    Discovery { source_name: String, reason: String },

    /// Two definitions resolved to the same manager id
    #[error("Duplicate manager id '{id}' (registered by '{first}' and '{second}')")]
    DuplicateManager {
        id: String,
        first: String,
        second: String,
    },

    /// Caller asked for unknown manager ids or options
    #[error("Invalid manager selection: {0}")]
    SelectionPrecondition(String),

    #[error("Unknown package manager: {0}")]
    UnknownManager(String),

    /// An allowed extra option is not exposed by a manager definition
    #[error("Manager '{manager}' does not accept the '{option}' option")]
    OptionApplication { manager: String, option: String },

    #[error("Package manager error: {0}")]
    PackageManagerError(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PkgbarError>;
