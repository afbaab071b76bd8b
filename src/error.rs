use std::fmt::Display;
use std::io;

use thiserror::Error;

/// Type alias for `Result<T, MonitorError>`.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// An error that occurred while enumerating devices or drawing the table.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("IoError: {cause}")]
    IoError { cause: io::Error },
    #[error("PermissionDenied: {cause}")]
    PermissionDenied { cause: io::Error },
    #[error("Failed to render the device table: {message}")]
    RenderError { message: String },
}

impl MonitorError {
    pub(crate) fn render_error<D: Display>(message: D) -> MonitorError {
        MonitorError::RenderError {
            message: message.to_string(),
        }
    }
}

impl From<io::Error> for MonitorError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { cause: e }
        } else {
            Self::IoError { cause: e }
        }
    }
}
