//! Error kinds surfaced by the updater.

use std::{io, path::PathBuf};

use aws_smithy_types::date_time::DateTimeFormatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UpdaterError>;

/// Every failure aborts the run; nothing here is retried.
#[derive(Error, Debug)]
pub enum UpdaterError {
    /// The caller has no MFA device registered
    #[error("No MFA devices registered")]
    NoDeviceRegistered,

    /// Device selection was not an index into the listed devices
    #[error("Invalid MFA device selection '{input}' (expected a number from 0 to {})", .count - 1)]
    InvalidSelection { input: String, count: usize },

    /// Session token request failed local validation
    #[error("Invalid session request: {0}")]
    InvalidRequest(String),

    /// STS or IAM reported a failure
    #[error("Credential service error: {0}")]
    CredentialService(String),

    /// Existing credentials file could not be read or parsed
    #[error("Failed to load credentials from {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    /// Updated credentials file could not be written
    #[error("Failed to write credentials to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Timestamp could not be rendered for the credentials file
    #[error("Failed to format timestamp: {0}")]
    Timestamp(#[from] DateTimeFormatError),

    /// Confirmation prompt answered negatively
    #[error("Credentials update declined")]
    UserDeclined,

    /// Reading from or writing to the terminal failed
    #[error("Console I/O error: {0}")]
    Console(#[from] io::Error),
}
