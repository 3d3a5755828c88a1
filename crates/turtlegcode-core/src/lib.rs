//! # turtlegcode Core
//!
//! Core types, aliases, and error types shared by the turtlegcode crates.
//! Provides the drawing-space geometry ([`Point`], [`Segment`],
//! [`BoundingBox`]) recorded from turtle scripts, the thread-safety aliases
//! used to share a generator between tasks, and the G-code error types.

pub mod data;
pub mod error;
pub mod types;

pub use data::{BoundingBox, Point, Segment};

pub use error::GcodeError;

pub use types::{thread_safe, ThreadSafe};
