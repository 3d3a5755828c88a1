//! Program assembly: header, motion body, footer.

use crate::emitter::{EmissionState, MotionEmitter};
use crate::normalizer::Transform;
use std::fmt;
use std::io::Write;
use turtlegcode_core::Segment;
use turtlegcode_settings::Config;

/// Comment emitted in place of a body when nothing was drawn
pub const EMPTY_HISTORY_COMMENT: &str = "; No drawing commands recorded";

const UNITS_LINE: &str = "G21 ; Set units to millimeters";
const POSITIONING_LINE: &str = "G90 ; Absolute positioning";
const RETURN_LINE: &str = "G0 X0 Y0 ; Return to origin";

/// An assembled motion program, one entry per line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    lines: Vec<String>,
}

impl Program {
    /// Build the complete program for `segments` from scratch.
    ///
    /// `state` is reset first and threaded through every segment in order.
    pub fn assemble(segments: &[Segment], config: &Config, state: &mut EmissionState) -> Self {
        state.reset();

        let mut lines = vec![
            UNITS_LINE.to_string(),
            POSITIONING_LINE.to_string(),
            format!("{} ;", config.start),
            String::new(),
        ];

        let Some(transform) = Transform::from_history(segments, config.scale()) else {
            lines.push(EMPTY_HISTORY_COMMENT.to_string());
            lines.push(String::new());
            lines.push(RETURN_LINE.to_string());
            lines.push(format!("{} ; End program", config.end));
            return Self { lines };
        };

        {
            let mut emitter = MotionEmitter::new(transform, config, state, &mut lines);
            for segment in segments {
                emitter.emit_segment(segment);
            }
            emitter.pen_up();
        }

        lines.push(String::new());
        lines.push(RETURN_LINE.to_string());
        lines.push(format!("{} ; End program", config.end));
        state.position = Default::default();

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Newline-separated program text, without a trailing newline
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Write the program followed by a final newline
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
