//! Error types for the generator crate.
//!
//! Generation itself cannot fail on a validated configuration; errors come
//! from rejected configuration updates and from writing a program out.

use std::io;
use thiserror::Error;
use turtlegcode_settings::ConfigError;

/// Errors that can occur during generator operations.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A configuration value was rejected; the previous configuration is kept.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// I/O error while writing a program.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;
