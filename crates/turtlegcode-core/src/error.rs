//! Error handling for turtlegcode
//!
//! Provides [`GcodeError`], raised while reading an emitted program back.
//! Each crate layers its own `thiserror` enum on top for its operations.

use thiserror::Error;

/// G-Code error type
///
/// Represents errors found while reading a motion program back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// Invalid G-Code syntax
    #[error("Invalid syntax at line {line_number}: {reason}")]
    InvalidSyntax {
        /// The line number where the syntax error occurred.
        line_number: u32,
        /// The reason for the syntax error.
        reason: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter '{param}' at line {line_number}: {reason}")]
    InvalidParameter {
        /// The line number where the invalid parameter was found.
        line_number: u32,
        /// The parameter name.
        param: String,
        /// The reason the parameter is invalid.
        reason: String,
    },

    /// Missing required parameter
    #[error("Missing required parameter '{param}' at line {line_number}")]
    MissingParameter {
        /// The line number where the parameter was missing.
        line_number: u32,
        /// The name of the missing parameter.
        param: String,
    },
}
