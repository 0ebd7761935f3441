//! Error types.
//!
//! Library code reports [`CurveError`]; the `gcurve` binary converts it into an
//! [`AppError`] carrying the process exit code.

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::DecodeError;

/// Exit code for usage and configuration problems.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for a missing file, directory, catalog key or block.
pub const EXIT_NOT_FOUND: u8 = 3;
/// Exit code for decode and filesystem failures.
pub const EXIT_IO: u8 = 4;

/// Failures raised by the store, the sync pipeline and the caller-facing operations.
#[derive(Debug, Error)]
pub enum CurveError {
    /// A required root directory is missing. Fatal to the whole call.
    #[error("Output directory should exist: {}", .0.display())]
    Configuration(PathBuf),

    /// A curve file exists but could not be decoded.
    #[error("Unable to load curve from file: {} ({source})", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// An expected file, directory, catalog key or data block is absent.
    #[error("{0}")]
    NotFound(String),

    /// Filesystem read/write failure.
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CurveError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Process exit code used when this error reaches the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            CurveError::Configuration(_) => EXIT_CONFIG,
            CurveError::NotFound(_) => EXIT_NOT_FOUND,
            CurveError::Decode { .. } | CurveError::Io { .. } => EXIT_IO,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CurveError> for AppError {
    fn from(err: CurveError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
