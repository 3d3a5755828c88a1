//! Program command types

use serde::{Deserialize, Serialize};

/// One line of a plotter program, classified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgramCommand {
    /// Rapid (non-drawing) move to an absolute position
    Rapid { x: f64, y: f64 },
    /// Linear move to an absolute position at a feed rate
    Linear { x: f64, y: f64, feed: f64 },
    /// The configured pen-up command
    PenUp,
    /// The configured pen-down command
    PenDown,
    /// A comment-only line (text after the `;`)
    Comment(String),
    /// An empty line
    Blank,
    /// Any other command, comment stripped
    Other(String),
}

impl ProgramCommand {
    /// True for rapid and linear moves
    pub fn is_motion(&self) -> bool {
        matches!(self, Self::Rapid { .. } | Self::Linear { .. })
    }

    /// True for pen-up and pen-down
    pub fn is_pen_toggle(&self) -> bool {
        matches!(self, Self::PenUp | Self::PenDown)
    }

    /// Target of a motion command
    pub fn target(&self) -> Option<(f64, f64)> {
        match self {
            Self::Rapid { x, y } | Self::Linear { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProgramCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rapid { x, y } => write!(f, "Rapid to ({:.3}, {:.3})", x, y),
            Self::Linear { x, y, feed } => {
                write!(f, "Linear to ({:.3}, {:.3}) at F{}", x, y, feed)
            }
            Self::PenUp => write!(f, "Pen up"),
            Self::PenDown => write!(f, "Pen down"),
            Self::Comment(text) => write!(f, "Comment: {}", text),
            Self::Blank => write!(f, "Blank"),
            Self::Other(code) => write!(f, "{}", code),
        }
    }
}

/// A parsed command with its 1-based line number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub line_number: u32,
    pub command: ProgramCommand,
}
