//! G-Code parser and modal state
//!
//! This module provides:
//! - Program command types
//! - Line-by-line parsing with modal state tracking

pub mod command;
pub mod parser;

pub use command::*;
pub use parser::*;
