//! # turtlegcode Parser
//!
//! Reads an emitted plotter program back into motion commands and derives
//! statistics from it: move and pen-toggle counts, the bounds of the drawn
//! path, draw and travel distance, and the estimated drawing time.

pub mod gcode;
pub mod summary;

pub use gcode::{ModalState, ParsedLine, ProgramCommand, ProgramParser};
pub use summary::ProgramSummary;
