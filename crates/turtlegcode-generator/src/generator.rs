//! The segment-to-program generator.

use crate::command_store::CommandStore;
use crate::emitter::EmissionState;
use crate::error::GeneratorResult;
use crate::program::Program;
use std::io::Write;
use turtlegcode_core::Segment;
use turtlegcode_settings::{Config, ConfigPatch};

/// Records drawn segments and compiles them into a plotter program
///
/// Single-owner and synchronous: every operation runs to completion. Share it
/// across tasks behind a [`ThreadSafe`](turtlegcode_core::ThreadSafe) lock.
///
/// [`rebuild`](Self::rebuild) always recomputes the whole program from the
/// recorded history and the current configuration, so calling it twice
/// without changes in between yields identical text.
#[derive(Debug, Clone)]
pub struct GcodeGenerator {
    store: CommandStore,
    config: Config,
    state: EmissionState,
    program: Program,
}

impl Default for GcodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GcodeGenerator {
    /// Generator with the default configuration.
    ///
    /// The current program starts out as the empty-history program.
    pub fn new() -> Self {
        let mut generator = Self {
            store: CommandStore::new(),
            config: Config::default(),
            state: EmissionState::new(),
            program: Program::default(),
        };
        generator.rebuild();
        generator
    }

    /// Generator with a validated configuration
    pub fn with_config(config: Config) -> GeneratorResult<Self> {
        let mut generator = Self::new();
        generator.set_configuration(config)?;
        generator.rebuild();
        Ok(generator)
    }

    /// Append a segment to the history
    pub fn record(&mut self, segment: Segment) {
        self.store.record(segment);
    }

    /// Append several segments in order
    pub fn record_all<I: IntoIterator<Item = Segment>>(&mut self, segments: I) {
        self.store.extend(segments);
    }

    /// Drop the history and reset the emission state.
    ///
    /// The current program is kept until the next rebuild.
    pub fn clear(&mut self) {
        self.store.clear();
        self.state.reset();
        tracing::debug!("Cleared segment history");
    }

    /// Replace the configuration wholesale
    pub fn set_configuration(&mut self, config: Config) -> GeneratorResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Merge a patch into the configuration
    pub fn update_configuration(&mut self, patch: &ConfigPatch) -> GeneratorResult<()> {
        self.config.apply(patch)?;
        Ok(())
    }

    /// Recompute the program from scratch
    pub fn rebuild(&mut self) -> &Program {
        self.program = Program::assemble(self.store.segments(), &self.config, &mut self.state);
        tracing::debug!(
            segments = self.store.len(),
            lines = self.program.line_count(),
            "Rebuilt program"
        );
        &self.program
    }

    /// The most recently assembled program (not rebuilt)
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Text of the most recently assembled program (not rebuilt)
    pub fn program_text(&self) -> String {
        self.program.text()
    }

    /// Write the most recently assembled program to `writer`
    pub fn write_program<W: Write>(&self, writer: W) -> GeneratorResult<()> {
        self.program.write_to(writer)?;
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        self.store.segments()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn emission_state(&self) -> EmissionState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::PenState;
    use crate::error::GeneratorError;

    #[test]
    fn test_new_generator_has_placeholder_program() {
        let generator = GcodeGenerator::new();
        assert!(generator
            .program_text()
            .contains("; No drawing commands recorded"));
        assert!(generator.segments().is_empty());
    }

    #[test]
    fn test_program_text_is_not_a_rebuild() {
        let mut generator = GcodeGenerator::new();
        generator.record(Segment::new(0.0, 0.0, 10.0, 0.0));
        assert!(!generator.program_text().contains("G1 "));
        generator.rebuild();
        assert!(generator.program_text().contains("G1 X10.000 Y0.000 F3000 ;"));
    }

    #[test]
    fn test_clear_resets_history_and_state() {
        let mut generator = GcodeGenerator::new();
        generator.record(Segment::new(0.0, 0.0, 10.0, 0.0));
        generator.rebuild();
        generator.clear();
        assert!(generator.segments().is_empty());
        assert_eq!(generator.emission_state(), EmissionState::new());

        generator.rebuild();
        let text = generator.program_text();
        assert!(text.contains("; No drawing commands recorded"));
        assert!(!text.contains("G1 "));
    }

    #[test]
    fn test_pen_is_lifted_after_rebuild() {
        let mut generator = GcodeGenerator::new();
        generator.record(Segment::new(0.0, 0.0, 10.0, 10.0));
        generator.rebuild();
        assert_eq!(generator.emission_state().pen, PenState::Up);
    }

    #[test]
    fn test_rejected_configuration_is_kept_out() {
        let mut generator = GcodeGenerator::new();
        let patch = ConfigPatch {
            feed_rate: Some(f64::INFINITY),
            ..ConfigPatch::default()
        };
        let err = generator.update_configuration(&patch).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidConfiguration(_)));
        assert_eq!(generator.config().feed_rate, 3000.0);

        let bad = Config {
            scale_percent: f64::NAN,
            ..Config::default()
        };
        assert!(generator.set_configuration(bad).is_err());
        assert_eq!(generator.config().scale_percent, 100.0);
        assert!(GcodeGenerator::with_config(Config {
            feed_rate: 0.0,
            ..Config::default()
        })
        .is_err());
    }

    #[test]
    fn test_write_program() {
        let mut generator = GcodeGenerator::new();
        generator.record(Segment::new(0.0, 0.0, 1.0, 1.0));
        generator.rebuild();
        let mut out = Vec::new();
        generator.write_program(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), generator.program_text() + "\n");
    }

    #[test]
    fn test_configuration_applies_on_next_rebuild() {
        let mut generator = GcodeGenerator::new();
        generator.record(Segment::new(0.0, 0.0, 10.0, 0.0));
        generator.rebuild();
        generator
            .update_configuration(&ConfigPatch {
                feed_rate: Some(1200.0),
                ..ConfigPatch::default()
            })
            .unwrap();
        assert!(generator.program_text().contains("F3000"));
        generator.rebuild();
        assert!(generator.program_text().contains("G1 X10.000 Y0.000 F1200 ;"));
    }
}
