//! Stroke geometry: points, styled segments and strokes.

use super::color::Color;

/// Integer pixel coordinate on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One straight line segment with the brush style it was drawn with.
///
/// Style is captured per segment, so a stroke whose color or width changed
/// mid-drag replays exactly as it was drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyledSegment {
    /// Starting X coordinate
    pub x1: i32,
    /// Starting Y coordinate
    pub y1: i32,
    /// Ending X coordinate
    pub x2: i32,
    /// Ending Y coordinate
    pub y2: i32,
    /// Line color
    pub color: Color,
    /// Line width in pixels
    pub width: f64,
}

impl StyledSegment {
    pub fn new(from: Point, to: Point, color: Color, width: f64) -> Self {
        Self {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            color,
            width,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

/// Ordered segments recorded between one pointer-down and the next pointer-up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    segments: Vec<StyledSegment>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: StyledSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[StyledSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<StyledSegment> for Stroke {
    fn from_iter<T: IntoIterator<Item = StyledSegment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
