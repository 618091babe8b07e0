//! Validated run configuration built from command line arguments.

use std::path::PathBuf;

use thiserror::Error;
use tracing::Level;

use crate::cli::Cli;
use crate::notify::NotifyMode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0}")]
    NotifyMode(String),
    #[error("unknown clipboard backend '{0}' (expected system|memory)")]
    ClipboardBackend(String),
    #[error("element id must not be empty")]
    EmptyElementId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Sample,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    List,
    Copy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    System,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// The interactive UI owns the terminal, so without a log file logs go nowhere.
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: DocumentSource,
    pub mode: RunMode,
    pub notify: NotifyMode,
    pub clipboard: ClipboardBackend,
    pub log_target: LogTarget,
    pub log_level: Level,
}

impl TryFrom<&Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let notify = cli.notify.parse().map_err(ConfigError::NotifyMode)?;
        let clipboard = match cli.clipboard.to_ascii_lowercase().as_str() {
            "system" => ClipboardBackend::System,
            "memory" => ClipboardBackend::Memory,
            _ => return Err(ConfigError::ClipboardBackend(cli.clipboard.clone())),
        };
        let mode = match (&cli.copy, cli.list) {
            (Some(id), _) if id.trim().is_empty() => return Err(ConfigError::EmptyElementId),
            (Some(id), _) => RunMode::Copy(id.trim().to_string()),
            (None, true) => RunMode::List,
            (None, false) => RunMode::Interactive,
        };
        let log_target = match (&cli.log_file, &mode) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, RunMode::Interactive) => LogTarget::Discard,
            (None, _) => LogTarget::Stderr,
        };
        let log_level = match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Ok(Self {
            source: cli
                .file
                .clone()
                .map_or(DocumentSource::Sample, DocumentSource::File),
            mode,
            notify,
            clipboard,
            log_target,
            log_level,
        })
    }
}
