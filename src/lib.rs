//! # turtlegcode
//!
//! Compiles the line segments drawn by a turtle-graphics script into a motion
//! program for a pen plotter.
//!
//! ## Architecture
//!
//! turtlegcode is organized as a workspace with multiple crates:
//!
//! 1. **turtlegcode-core** - Geometry types, thread-safety aliases, shared errors
//! 2. **turtlegcode-settings** - Typed configuration, merge-patches, pen presets, config files
//! 3. **turtlegcode-generator** - Command store, normalizer, motion emitter, program assembler
//! 4. **turtlegcode-parser** - Reads emitted programs back and summarizes them
//! 5. **turtlegcode** - Segment ingestion, the debounced rebuild driver and the CLI binary

pub mod driver;
pub mod ingest;

pub use driver::{DriverMessage, DriverStats, RebuildDriver};
pub use ingest::{forward_segments, parse_segments, IngestError};

pub use turtlegcode_core::{BoundingBox, GcodeError, Point, Segment};
pub use turtlegcode_generator::{GcodeGenerator, GeneratorError, Program};
pub use turtlegcode_parser::{ProgramCommand, ProgramParser, ProgramSummary};
pub use turtlegcode_settings::{Config, ConfigPatch, PenPreset};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support, `default_level` otherwise
/// - Output on stderr, leaving stdout for the program text
pub fn init_logging(default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
