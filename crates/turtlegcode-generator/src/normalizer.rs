//! Bounding-box normalization from drawing space to output space.
//!
//! Drawing space follows the turtle convention (Y grows downwards); the
//! program is Y-up. Y is inverted first, then the history's minimum X and
//! minimum inverted Y are shifted to zero so all motion stays in the
//! non-negative quadrant, then the shifted value is scaled.

use turtlegcode_core::{BoundingBox, Point, Segment};

/// Uniform scale and additive shift for one rebuild
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Multiplier applied after shifting
    pub scale: f64,
    /// Minimum X over every endpoint, in drawing units
    pub x_shift: f64,
    /// Minimum of `-y` over every endpoint, in drawing units
    pub y_shift: f64,
}

impl Transform {
    /// Derive the transform from the full history.
    ///
    /// Returns `None` for an empty history; the assembler takes its
    /// placeholder path instead.
    pub fn from_history(segments: &[Segment], scale: f64) -> Option<Self> {
        let bbox = BoundingBox::of_segments(segments)?;
        Some(Self {
            scale,
            x_shift: bbox.min_x,
            // min(-y) == -max(y)
            y_shift: -bbox.max_y,
        })
    }

    /// Map a drawing-space point into output space
    pub fn apply(&self, point: Point) -> Point {
        let inverted_y = -point.y;
        Point::new(
            (point.x - self.x_shift) * self.scale,
            (inverted_y - self.y_shift) * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_has_no_transform() {
        assert!(Transform::from_history(&[], 1.0).is_none());
    }

    #[test]
    fn test_shift_and_inversion() {
        let segments = [
            Segment::new(-50.0, -20.0, 10.0, 30.0),
            Segment::new(10.0, 30.0, 40.0, -60.0),
        ];
        let t = Transform::from_history(&segments, 1.0).unwrap();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.x_shift, -50.0);
        assert_eq!(t.y_shift, -30.0);

        // Lowest drawn point after inversion is y = 30 -> output 0
        assert_eq!(t.apply(Point::new(10.0, 30.0)), Point::new(60.0, 0.0));
        // Highest drawn point y = -60 -> output 90
        assert_eq!(t.apply(Point::new(40.0, -60.0)), Point::new(90.0, 90.0));
        // Leftmost point -> output x 0
        assert_eq!(t.apply(Point::new(-50.0, -20.0)).x, 0.0);
    }

    #[test]
    fn test_scale_applies_after_shift() {
        let segments = [Segment::new(10.0, 0.0, 20.0, -10.0)];
        let t = Transform::from_history(&segments, 2.5).unwrap();
        assert_eq!(t.scale, 2.5);
        assert_eq!(t.apply(Point::new(20.0, -10.0)), Point::new(25.0, 25.0));
        assert_eq!(t.apply(Point::new(10.0, 0.0)), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_single_point_history_collapses() {
        let segments = [Segment::new(7.0, -3.0, 7.0, -3.0)];
        let t = Transform::from_history(&segments, 1.0).unwrap();
        assert_eq!(t.x_shift, 7.0);
        assert_eq!(t.y_shift, 3.0);
        assert_eq!(t.apply(Point::new(7.0, -3.0)), Point::new(0.0, 0.0));
    }
}
