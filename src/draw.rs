//! Rendering seam used for debugging. Nothing here is needed for queries.
use crate::{Point, Rect};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Color {
    Black,
    /// Vertical split, x axis
    Red,
    /// Horizontal split, y axis
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Point(Point),
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
}

pub trait Canvas {
    fn point(&mut self, point: Point);
    fn line(&mut self, from: Point, to: Point, color: Color);

    /// Outline `rect` with black lines
    fn border(&mut self, rect: &Rect) {
        let [x0, y0] = *rect.min;
        let [x1, y1] = *rect.max;
        self.line(Point::new(x0, y0), Point::new(x1, y0), Color::Black);
        self.line(Point::new(x0, y1), Point::new(x1, y1), Color::Black);
        self.line(Point::new(x0, y0), Point::new(x0, y1), Color::Black);
        self.line(Point::new(x1, y0), Point::new(x1, y1), Color::Black);
    }
}

/// Records every call, for renderers that want the whole picture up front.
impl Canvas for Vec<Shape> {
    fn point(&mut self, point: Point) {
        self.push(Shape::Point(point));
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        self.push(Shape::Line { from, to, color });
    }
}
