//! Error types shared by the cleaner, the converters, and the config layer.
//!
//! Every failure coming out of the filesystem or process-inspection APIs is
//! folded into one of these enums at the boundary where it happens, so the
//! orchestrator only ever matches on [`FailureKind`].

use std::{io, path::PathBuf};

/// The closed set of failure categories a cache location can end up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The path does not exist. Expected and benign.
    NotFound,
    /// Reported, but the run continues with the next location.
    PermissionDenied,
    /// Anything else the filesystem threw at us.
    Unexpected,
    /// The user declined the confirmation prompt.
    Cancelled,
}

/// Errors raised while measuring or erasing cache locations.
#[derive(thiserror::Error, Debug)]
pub enum CleanError {
    /// The location does not exist on disk.
    #[error("Path not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// An entry could not be removed or read because of its permissions.
    #[error("Permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that was refused.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// Any other I/O failure.
    #[error("Error removing {}: {error}", path.display())]
    Unexpected {
        /// The path being worked on.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// The confirmation prompt was answered with anything but `y`.
    #[error("Cache clearing cancelled.")]
    Cancelled,

    /// Reading the answer or writing the report failed.
    #[error("Console I/O failed: {0}")]
    Console(#[from] io::Error),
}

impl CleanError {
    /// Classify an I/O error raised while working on `path`.
    pub fn from_io(path: impl Into<PathBuf>, error: io::Error) -> Self {
        let path = path.into();
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, error },
            _ => Self::Unexpected { path, error },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::PermissionDenied { .. } => FailureKind::PermissionDenied,
            Self::Unexpected { .. } | Self::Console(_) => FailureKind::Unexpected,
            Self::Cancelled => FailureKind::Cancelled,
        }
    }
}

/// Errors from the external tools driven by `convert` and `render`.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// The executable could not be found at the configured location.
    #[error("Could not find '{}'. Please check that the path is correct.", program.display())]
    MissingBinary {
        /// The program that was looked up.
        program: PathBuf,
    },

    /// The tool started but exited unsuccessfully.
    #[error("'{}' exited with {status}: {stderr}", program.display())]
    Failed {
        /// The program that ran.
        program: PathBuf,
        /// Its exit status, rendered for display.
        status: String,
        /// Trimmed stderr output.
        stderr: String,
    },

    /// The browser session failed over the DevTools protocol.
    #[error("Browser '{}' failed: {message}", program.display())]
    Browser {
        /// The browser executable.
        program: PathBuf,
        /// The protocol or launch error, rendered for display.
        message: String,
    },

    /// The tool did not finish in the allotted time.
    #[error("'{}' did not finish within {secs}s", program.display())]
    TimedOut {
        /// The program that hung.
        program: PathBuf,
        /// The timeout that elapsed.
        secs: u64,
    },

    /// The tool reported success but the expected file is not there.
    #[error("Expected output '{}' was not produced", path.display())]
    NoOutput {
        /// The missing output path.
        path: PathBuf,
    },

    /// Failed to read or write a file around the tool invocation.
    #[error("Failed to access '{}': {error}", path.display())]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },
}

impl ToolError {
    /// Classify a spawn failure for `program`.
    pub fn from_spawn(program: impl Into<PathBuf>, error: io::Error) -> Self {
        let program = program.into();
        if error.kind() == io::ErrorKind::NotFound {
            Self::MissingBinary { program }
        } else {
            Self::Io {
                path: program,
                error,
            }
        }
    }
}

/// Errors from loading the config file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read '{}': {error}", path.display())]
    IoRead {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// A numeric key holds something that is not a number.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidNumber {
        /// The offending key.
        key: String,
        /// The raw value.
        value: String,
    },
}
