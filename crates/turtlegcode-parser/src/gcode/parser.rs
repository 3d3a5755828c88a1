//! G-Code parser with modal state tracking

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use turtlegcode_core::{GcodeError, Point};

use super::{ParsedLine, ProgramCommand};

/// Modal state carried from line to line
///
/// The tool starts at the origin in absolute mode with no feed rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalState {
    /// G90 (true) or G91 (false)
    pub absolute: bool,
    /// Last programmed F word
    pub feed_rate: Option<f64>,
    /// Current tool position
    pub position: Point,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            absolute: true,
            feed_rate: None,
            position: Point::default(),
        }
    }
}

/// Parser for plotter programs
///
/// Pen commands are configured strings, so the parser is told which command
/// text means pen up and which means pen down. They are matched before motion
/// words, which lets Z-axis pens (`G0 Z5`) be recognized as toggles.
pub struct ProgramParser {
    pen_up: String,
    pen_down: String,
    state: ModalState,
}

impl ProgramParser {
    /// Create a parser for the given pen commands.
    ///
    /// Comments inside the commands are dropped, since they are dropped from
    /// program lines before matching too.
    pub fn new(pen_up: impl AsRef<str>, pen_down: impl AsRef<str>) -> Self {
        Self {
            pen_up: remove_comments(pen_up.as_ref()).trim().to_string(),
            pen_down: remove_comments(pen_down.as_ref()).trim().to_string(),
            state: ModalState::default(),
        }
    }

    /// Current modal state
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Parse a whole program
    pub fn parse_program(&mut self, text: &str) -> Result<Vec<ParsedLine>, GcodeError> {
        text.lines()
            .enumerate()
            .map(|(idx, line)| {
                let line_number = idx as u32 + 1;
                self.parse_line(line_number, line).map(|command| ParsedLine {
                    line_number,
                    command,
                })
            })
            .collect()
    }

    /// Parse one line, updating modal state
    pub fn parse_line(
        &mut self,
        line_number: u32,
        line: &str,
    ) -> Result<ProgramCommand, GcodeError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(ProgramCommand::Blank);
        }

        let code = remove_comments(trimmed);
        let code = code.trim();
        if code.is_empty() {
            let text = trimmed
                .trim_start_matches([';', '('])
                .trim_end_matches(')')
                .trim();
            return Ok(ProgramCommand::Comment(text.to_string()));
        }

        if !self.pen_up.is_empty() && code == self.pen_up {
            return Ok(ProgramCommand::PenUp);
        }
        if !self.pen_down.is_empty() && code == self.pen_down {
            return Ok(ProgramCommand::PenDown);
        }

        let mut tokens = code.split_whitespace();
        let first = tokens.next().and_then(parse_word);
        match first {
            Some(('G', g)) if g == 0.0 || g == 1.0 => {
                self.parse_motion(line_number, g == 1.0, tokens)
            }
            _ => {
                self.update_modal(code);
                Ok(ProgramCommand::Other(code.to_string()))
            }
        }
    }

    fn parse_motion<'a>(
        &mut self,
        line_number: u32,
        linear: bool,
        tokens: impl Iterator<Item = &'a str>,
    ) -> Result<ProgramCommand, GcodeError> {
        let mut x = None;
        let mut y = None;
        let mut feed = None;

        for token in tokens {
            let (letter, value) = parse_word(token).ok_or_else(|| GcodeError::InvalidSyntax {
                line_number,
                reason: format!("unrecognized word '{}'", token),
            })?;
            if !value.is_finite() {
                return Err(GcodeError::InvalidParameter {
                    line_number,
                    param: letter.to_string(),
                    reason: format!("'{}' is not a finite number", token),
                });
            }
            match letter {
                'X' => x = Some(value),
                'Y' => y = Some(value),
                'F' => feed = Some(value),
                _ => {}
            }
        }

        let current = self.state.position;
        let resolve = |axis: Option<f64>, current: f64| match axis {
            Some(v) if self.state.absolute => v,
            Some(v) => current + v,
            None => current,
        };
        let target = Point::new(resolve(x, current.x), resolve(y, current.y));

        if feed.is_some() {
            self.state.feed_rate = feed;
        }
        self.state.position = target;

        if linear {
            let feed = self
                .state
                .feed_rate
                .ok_or_else(|| GcodeError::MissingParameter {
                    line_number,
                    param: "F".to_string(),
                })?;
            Ok(ProgramCommand::Linear {
                x: target.x,
                y: target.y,
                feed,
            })
        } else {
            Ok(ProgramCommand::Rapid {
                x: target.x,
                y: target.y,
            })
        }
    }

    fn update_modal(&mut self, code: &str) {
        for (letter, value) in code.split_whitespace().filter_map(parse_word) {
            if letter != 'G' {
                continue;
            }
            match value as u32 {
                90 => self.state.absolute = true,
                91 => self.state.absolute = false,
                _ => {}
            }
        }
    }
}

/// Remove comments from a G-Code line
fn remove_comments(line: &str) -> String {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COMMENT_REGEX.get_or_init(|| Regex::new(r"[;(].*").expect("invalid regex pattern"));
    regex.replace(line, "").to_string()
}

/// Split a word such as `X10.500` into its letter and value
fn parse_word(token: &str) -> Option<(char, f64)> {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = WORD_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z])([-+]?(?:\d+\.?\d*|\.\d+))$").expect("invalid regex pattern")
    });
    let caps = regex.captures(token)?;
    let letter = caps[1].chars().next()?.to_ascii_uppercase();
    let value = caps[2].parse::<f64>().ok()?;
    Some((letter, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ProgramParser {
        ProgramParser::new("M5", "M3")
    }

    #[test]
    fn test_classifies_program_lines() {
        let mut p = parser();
        assert_eq!(p.parse_line(1, "").unwrap(), ProgramCommand::Blank);
        assert_eq!(
            p.parse_line(2, "; No drawing commands recorded").unwrap(),
            ProgramCommand::Comment("No drawing commands recorded".to_string())
        );
        assert_eq!(p.parse_line(3, "M3 ; Pen down").unwrap(), ProgramCommand::PenDown);
        assert_eq!(p.parse_line(4, "M5 ; Pen up").unwrap(), ProgramCommand::PenUp);
        assert_eq!(
            p.parse_line(5, "G28 ;").unwrap(),
            ProgramCommand::Other("G28".to_string())
        );
        assert_eq!(
            p.parse_line(6, "G0 X1.500 Y2.000 ;").unwrap(),
            ProgramCommand::Rapid { x: 1.5, y: 2.0 }
        );
        assert_eq!(
            p.parse_line(7, "G1 X3.000 Y4.000 F3000 ;").unwrap(),
            ProgramCommand::Linear {
                x: 3.0,
                y: 4.0,
                feed: 3000.0
            }
        );
    }

    #[test]
    fn test_missing_axis_keeps_position() {
        let mut p = parser();
        p.parse_line(1, "G0 X5 Y6").unwrap();
        assert_eq!(
            p.parse_line(2, "G0 X7").unwrap(),
            ProgramCommand::Rapid { x: 7.0, y: 6.0 }
        );
    }

    #[test]
    fn test_modal_feed_and_missing_feed() {
        let mut p = parser();
        let err = p.parse_line(4, "G1 X1 Y1").unwrap_err();
        assert_eq!(
            err,
            GcodeError::MissingParameter {
                line_number: 4,
                param: "F".to_string()
            }
        );

        p.parse_line(5, "G1 X1 Y1 F1200").unwrap();
        assert_eq!(
            p.parse_line(6, "G01 X2 Y1").unwrap(),
            ProgramCommand::Linear {
                x: 2.0,
                y: 1.0,
                feed: 1200.0
            }
        );
    }

    #[test]
    fn test_relative_mode() {
        let mut p = parser();
        p.parse_line(1, "G0 X10 Y10").unwrap();
        p.parse_line(2, "G91").unwrap();
        assert!(!p.state().absolute);
        assert_eq!(
            p.parse_line(3, "G0 X-2.5 Y1").unwrap(),
            ProgramCommand::Rapid { x: 7.5, y: 11.0 }
        );
        p.parse_line(4, "G90 ; Absolute positioning").unwrap();
        assert!(p.state().absolute);
    }

    #[test]
    fn test_malformed_word_reports_line() {
        let mut p = parser();
        let err = p.parse_line(9, "G1 X1.0.0 Y2 F100").unwrap_err();
        assert!(matches!(err, GcodeError::InvalidSyntax { line_number: 9, .. }));
        let err = p.parse_line(10, "G0 XNaN Y2").unwrap_err();
        assert!(matches!(err, GcodeError::InvalidSyntax { line_number: 10, .. }));
    }

    #[test]
    fn test_z_axis_pen_commands_are_toggles() {
        let mut p = ProgramParser::new("G0 Z5", "G0 Z0");
        assert_eq!(p.parse_line(1, "G0 Z5 ; Pen up").unwrap(), ProgramCommand::PenUp);
        assert_eq!(p.parse_line(2, "G0 Z0 ; Pen down").unwrap(), ProgramCommand::PenDown);
        assert_eq!(p.state().position, Point::default());
    }

    #[test]
    fn test_pen_commands_with_comments() {
        let mut p = ProgramParser::new("M280 P0 S90 ; servo", "M280 P0 S0 (servo)");
        assert_eq!(
            p.parse_line(1, "M280 P0 S0 (servo) ; Pen down").unwrap(),
            ProgramCommand::PenDown
        );
        assert_eq!(
            p.parse_line(2, "M280 P0 S90 ; servo ; Pen up").unwrap(),
            ProgramCommand::PenUp
        );
        assert_eq!(p.parse_line(3, "M280 P0 S90").unwrap(), ProgramCommand::PenUp);
    }

    #[test]
    fn test_parse_program_numbers_lines() {
        let mut p = parser();
        let parsed = p.parse_program("G21\n\nG0 X1 Y1 ;").unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2].line_number, 3);
        assert_eq!(parsed[1].command, ProgramCommand::Blank);
    }
}
