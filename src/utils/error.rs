//! Error types for framestep
//!
//! This module defines the error taxonomy used throughout the application.
//! We use thiserror for convenient error type definitions and anyhow for
//! application-level error handling in the binary.

use thiserror::Error;

/// Main error type for framestep
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Source could not be opened (bad path, unreadable container,
    /// zero frames, unreadable first frame)
    #[error("Open error: {0}")]
    Open(String),

    /// Decoder returned no frame for a requested index
    #[error("Read error: {0}")]
    Read(String),

    /// Navigation target outside the valid frame range
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Invalid input errors (console entry, bad option values)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Display collaborator errors (window, overlay, key wait)
    #[error("Display error: {0}")]
    Display(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),
}

impl From<opencv::Error> for PlayerError {
    fn from(err: opencv::Error) -> Self {
        PlayerError::Read(format!("OpenCV error: {}", err))
    }
}

impl PlayerError {
    /// Create an open error from string
    pub fn open_error<S: Into<String>>(msg: S) -> Self {
        PlayerError::Open(msg.into())
    }

    /// Create a read error from string
    pub fn read_error<S: Into<String>>(msg: S) -> Self {
        PlayerError::Read(msg.into())
    }

    /// True for failures the event loop reports and survives; the loop
    /// only aborts on collaborator/console breakage
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PlayerError::Read(_) | PlayerError::OutOfRange(_) | PlayerError::InvalidInput(_)
        )
    }
}

/// Convenience type alias for Results in framestep
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Extension trait for converting other errors to PlayerError
pub trait IntoPlayerError<T> {
    /// Convert this error into a PlayerError with the given context
    fn open_err(self, context: &str) -> Result<T>;
    fn read_err(self, context: &str) -> Result<T>;
    fn display_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoPlayerError<T> for std::result::Result<T, E> {
    fn open_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Open(format!("{}: {}", context, e)))
    }

    fn read_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Read(format!("{}: {}", context, e)))
    }

    fn display_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Display(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Config(format!("{}: {}", context, e)))
    }
}
