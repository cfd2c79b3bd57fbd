//! Utility module for framestep
//!
//! This module provides common utilities used throughout the application:
//! - Error handling with custom error types
//! - Configuration management

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{Config, OverlayConfig, PlaybackConfig, WindowConfig};
pub use error::{PlayerError, Result};
