//! Error types for safewire.

use thiserror::Error;

/// Main error type for all safewire operations.
#[derive(Debug, Error)]
pub enum SafewireError {
    /// I/O error during transport reads or writes.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial-port layer error (enumeration, buffer control).
    #[error("serial error: {0}")]
    Serial(#[from] serialport::Error),

    /// Failed to acquire the serial connection at session start.
    #[error("failed to open serial port `{port}`: {source}")]
    TransportOpen {
        /// Port path that was requested.
        port: String,
        /// Underlying serial-port error.
        source: serialport::Error,
    },
}

/// Result type alias using SafewireError.
pub type Result<T> = std::result::Result<T, SafewireError>;
