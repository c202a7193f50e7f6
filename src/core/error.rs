//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`PushyError`] which covers every failure mode of the
//! publishing core. It uses `thiserror` for ergonomic error definitions and
//! includes constructors for the variants that carry context.
//!
//! # Public API
//! - [`PushyError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, PushyError>`
//!
//! # Error Categories
//! - **Process**: git binary missing, unexpected exit code, timeout
//! - **Parsing**: malformed status lines (recovered during listing)
//! - **Lookup**: registry misses and content repository misses
//! - **Publishing**: staging or commit failures, invalid requests
//! - **Environment**: repository discovery, configuration, I/O

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Domain-specific error types for pushy
#[derive(Error, Debug)]
pub enum PushyError {
    // Repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Repository has no working tree: {path}")]
    BareRepository { path: PathBuf },

    // Subprocess errors
    #[error("Failed to run '{command}': {source}")]
    ProcessSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("{output}")]
    Process {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    #[error("'{command}' did not finish within {}s", .timeout.as_secs())]
    ProcessTimeout { command: String, timeout: Duration },

    // Status parsing
    #[error("Malformed status line: '{line}'")]
    Parse { line: String },

    // Lookups
    #[error("No changed item for path {path}")]
    NotFound { path: String },

    #[error("No page found in folder {folder}")]
    PageNotFound { folder: String },

    // Publishing
    #[error("{message}")]
    Publish { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Unknown request '{task}'")]
    UnknownTask { task: String },

    #[error("No author identity available: {message}")]
    MissingIdentity { message: String },

    // Configuration
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid page frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience type alias for Results using PushyError
pub type Result<T> = std::result::Result<T, PushyError>;

impl PushyError {
    /// Create a process spawn error
    pub fn process_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::ProcessSpawn {
            command: command.into(),
            source,
        }
    }

    /// Create an unexpected exit code error with the captured output
    pub fn process(command: impl Into<String>, exit_code: Option<i32>, lines: &[String]) -> Self {
        Self::Process {
            command: command.into(),
            exit_code,
            output: lines.join("\n"),
        }
    }

    /// Create a process timeout error
    pub fn process_timeout(command: impl Into<String>, timeout: Duration) -> Self {
        Self::ProcessTimeout {
            command: command.into(),
            timeout,
        }
    }

    /// Create a malformed status line error
    pub fn parse(line: impl Into<String>) -> Self {
        Self::Parse { line: line.into() }
    }

    /// Create a registry miss error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a content repository miss error
    pub fn page_not_found(folder: impl Into<String>) -> Self {
        Self::PageNotFound {
            folder: folder.into(),
        }
    }

    /// Create a staging or commit failure
    pub fn publish(message: impl Into<String>) -> Self {
        Self::Publish {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an unknown task error
    pub fn unknown_task(task: impl Into<String>) -> Self {
        Self::UnknownTask { task: task.into() }
    }

    /// Create a missing identity error
    pub fn missing_identity(message: impl Into<String>) -> Self {
        Self::MissingIdentity {
            message: message.into(),
        }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from running the git binary
    pub fn is_process_error(&self) -> bool {
        matches!(
            self,
            Self::ProcessSpawn { .. } | Self::Process { .. } | Self::ProcessTimeout { .. }
        )
    }
}
