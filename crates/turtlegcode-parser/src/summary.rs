//! Program statistics
//!
//! Replays parsed commands from the origin with the pen up and records what a
//! plotter would do: how far it draws, how far it travels, and where ink ends
//! up on the page.

use crate::gcode::{ParsedLine, ProgramCommand};
use std::fmt;
use turtlegcode_core::{BoundingBox, Point};

/// Statistics for one program
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSummary {
    pub line_count: usize,
    pub rapid_moves: usize,
    pub linear_moves: usize,
    pub pen_up_count: usize,
    pub pen_down_count: usize,
    /// Toggles that asked for the state the pen was already in
    pub redundant_pen_toggles: usize,
    /// Bounds of pen-down moves, start points included
    pub drawn_bounds: Option<BoundingBox>,
    /// Length of pen-down moves (output units)
    pub draw_distance: f64,
    /// Length of moves made with the pen up (output units)
    pub travel_distance: f64,
    /// Time spent drawing at the programmed feed rates
    pub estimated_draw_seconds: f64,
    /// Pen state after the last command
    pub ends_pen_up: bool,
}

impl ProgramSummary {
    /// Replay `lines` and collect statistics
    pub fn from_lines(lines: &[ParsedLine]) -> Self {
        Self::from_commands(lines.iter().map(|line| &line.command))
    }

    /// Replay `commands` and collect statistics
    pub fn from_commands<'a, I>(commands: I) -> Self
    where
        I: IntoIterator<Item = &'a ProgramCommand>,
    {
        let mut summary = Self {
            line_count: 0,
            rapid_moves: 0,
            linear_moves: 0,
            pen_up_count: 0,
            pen_down_count: 0,
            redundant_pen_toggles: 0,
            drawn_bounds: None,
            draw_distance: 0.0,
            travel_distance: 0.0,
            estimated_draw_seconds: 0.0,
            ends_pen_up: true,
        };
        let mut position = Point::default();
        let mut pen_down = false;

        for command in commands {
            summary.line_count += 1;
            match command {
                ProgramCommand::Rapid { x, y } => {
                    let target = Point::new(*x, *y);
                    summary.rapid_moves += 1;
                    summary.travel_distance += position.distance_to(&target);
                    position = target;
                }
                ProgramCommand::Linear { x, y, feed } => {
                    let target = Point::new(*x, *y);
                    let distance = position.distance_to(&target);
                    summary.linear_moves += 1;
                    if pen_down {
                        let bounds = summary.drawn_bounds.get_or_insert(BoundingBox::EMPTY);
                        bounds.include(position);
                        bounds.include(target);
                        summary.draw_distance += distance;
                        if *feed > 0.0 {
                            summary.estimated_draw_seconds += distance / feed * 60.0;
                        }
                    } else {
                        summary.travel_distance += distance;
                    }
                    position = target;
                }
                ProgramCommand::PenUp => {
                    summary.pen_up_count += 1;
                    if !pen_down {
                        summary.redundant_pen_toggles += 1;
                    }
                    pen_down = false;
                }
                ProgramCommand::PenDown => {
                    summary.pen_down_count += 1;
                    if pen_down {
                        summary.redundant_pen_toggles += 1;
                    }
                    pen_down = true;
                }
                ProgramCommand::Comment(_) | ProgramCommand::Blank | ProgramCommand::Other(_) => {}
            }
        }

        summary.ends_pen_up = !pen_down;
        tracing::trace!(
            lines = summary.line_count,
            draw = summary.draw_distance,
            travel = summary.travel_distance,
            "Summarized program"
        );
        summary
    }

    pub fn has_redundant_pen_toggles(&self) -> bool {
        self.redundant_pen_toggles > 0
    }
}

impl fmt::Display for ProgramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lines: {}", self.line_count)?;
        writeln!(
            f,
            "Moves: {} linear, {} rapid",
            self.linear_moves, self.rapid_moves
        )?;
        writeln!(
            f,
            "Pen toggles: {} down, {} up",
            self.pen_down_count, self.pen_up_count
        )?;
        match &self.drawn_bounds {
            Some(b) => writeln!(
                f,
                "Drawn area: X{:.3}..{:.3} Y{:.3}..{:.3} ({:.3} x {:.3})",
                b.min_x,
                b.max_x,
                b.min_y,
                b.max_y,
                b.width(),
                b.height()
            )?,
            None => writeln!(f, "Drawn area: none")?,
        }
        writeln!(
            f,
            "Distance: {:.3} drawn, {:.3} travel",
            self.draw_distance, self.travel_distance
        )?;
        write!(f, "Estimated drawing time: {:.1} s", self.estimated_draw_seconds)
    }
}
