//! Motion emission with pen state tracking.
//!
//! The pen is a two-state machine. It is lifted only when the tool has to
//! travel to a new start point, and lowered only right before a drawing move,
//! so a toggle is never emitted for a state the pen is already in.

use crate::normalizer::Transform;
use turtlegcode_core::{Point, Segment};
use turtlegcode_settings::Config;

/// Start points closer than this (output units, per axis) to the current
/// position are drawn from the current position without a rapid move.
pub const POSITION_TOLERANCE: f64 = 0.01;

/// Pen position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenState {
    #[default]
    Up,
    Down,
}

/// Tool position and pen state while a program is being emitted.
///
/// Reset to the origin with the pen up at the start of every rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmissionState {
    pub position: Point,
    pub pen: PenState,
}

impl EmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen == PenState::Down
    }

    fn needs_travel_to(&self, target: Point) -> bool {
        (target.x - self.position.x).abs() > POSITION_TOLERANCE
            || (target.y - self.position.y).abs() > POSITION_TOLERANCE
    }
}

/// Emits program lines for normalized segments
pub struct MotionEmitter<'a> {
    transform: Transform,
    config: &'a Config,
    state: &'a mut EmissionState,
    lines: &'a mut Vec<String>,
}

impl<'a> MotionEmitter<'a> {
    pub fn new(
        transform: Transform,
        config: &'a Config,
        state: &'a mut EmissionState,
        lines: &'a mut Vec<String>,
    ) -> Self {
        Self {
            transform,
            config,
            state,
            lines,
        }
    }

    /// Emit the moves for one segment, travelling first if its start is away
    /// from the current position.
    pub fn emit_segment(&mut self, segment: &Segment) {
        let start = self.transform.apply(segment.start());
        let end = self.transform.apply(segment.end());

        if self.state.needs_travel_to(start) {
            self.pen_up();
            tracing::trace!(from = %self.state.position, to = %start, "Travel move");
            self.lines.push(rapid_line(start));
            self.state.position = start;
        }

        self.pen_down();
        self.lines.push(linear_line(end, self.config.feed_rate));
        self.state.position = end;
    }

    /// Lift the pen if it is down
    pub fn pen_up(&mut self) {
        if self.state.pen == PenState::Down {
            self.lines.push(format!("{} ; Pen up", self.config.pen_up));
            self.state.pen = PenState::Up;
        }
    }

    /// Lower the pen if it is up
    pub fn pen_down(&mut self) {
        if self.state.pen == PenState::Up {
            self.lines.push(format!("{} ; Pen down", self.config.pen_down));
            self.state.pen = PenState::Down;
        }
    }
}

fn rapid_line(target: Point) -> String {
    format!("G0 X{:.3} Y{:.3} ;", coord(target.x), coord(target.y))
}

fn linear_line(target: Point, feed_rate: f64) -> String {
    format!(
        "G1 X{:.3} Y{:.3} F{} ;",
        coord(target.x),
        coord(target.y),
        feed_rate
    )
}

// Keeps a negative zero from printing as "-0.000".
fn coord(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
