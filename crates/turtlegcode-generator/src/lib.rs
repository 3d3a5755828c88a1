//! # turtlegcode Generator
//!
//! Compiles the line segments recorded from a turtle-graphics script into a
//! complete motion program for a pen plotter.
//!
//! ## Pipeline
//!
//! - **Command Store**: the ordered segment history, source of truth for every rebuild
//! - **Normalizer**: scale and shift derived from the bounding box of the whole history
//! - **Motion Emitter**: rapid/linear moves and pen toggles, one segment at a time
//! - **Program Assembler**: header, emitted motion, footer
//!
//! Every rebuild recomputes the program from `(history, configuration)`.
//! A later segment can extend the bounding box and move the origin of every
//! coordinate emitted before it, so the program is never patched in place.

pub mod command_store;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod normalizer;
pub mod program;

pub use command_store::CommandStore;
pub use emitter::{EmissionState, MotionEmitter, PenState, POSITION_TOLERANCE};
pub use error::{GeneratorError, GeneratorResult};
pub use generator::GcodeGenerator;
pub use normalizer::Transform;
pub use program::Program;

pub use turtlegcode_core::{Point, Segment};
pub use turtlegcode_settings::{Config, ConfigPatch};
