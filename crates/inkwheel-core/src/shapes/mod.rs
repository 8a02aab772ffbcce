//! Shapes that make up a drawing.

mod ellipse;
mod freehand;
mod line;
mod rectangle;

pub use ellipse::Ellipse;
pub use freehand::{Stroke, smooth_path};
pub use line::Line;
pub use rectangle::Rectangle;

use crate::color::Color;
use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stroke width used until the user picks another.
pub const DEFAULT_THICKNESS: f64 = 5.0;

/// Style properties for shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: Color,
    /// Stroke width.
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn new(stroke_color: Color, stroke_width: f64) -> Self {
        Self {
            stroke_color,
            stroke_width,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(Color::BLACK, DEFAULT_THICKNESS)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box of the geometry, ignoring stroke width.
    fn bounds(&self) -> Rect;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Stroke(Stroke),
    Line(Line),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Stroke(s) => s,
            Shape::Line(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Stroke(s) => s.style(),
            Shape::Line(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Stroke(s) => s.style_mut(),
            Shape::Line(s) => s.style_mut(),
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Ellipse(s) => s.style_mut(),
        }
    }

    /// Bounds grown by half the stroke width on every side.
    pub fn stroke_bounds(&self) -> Rect {
        let half = self.style().stroke_width / 2.0;
        self.bounds().inflate(half, half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_default_style() {
        let style = ShapeStyle::default();
        assert_eq!(style.stroke_color, Color::BLACK);
        assert!((style.stroke_width - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stroke_bounds() {
        let mut shape = Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        shape.style_mut().stroke_width = 4.0;
        let bounds = shape.stroke_bounds();
        assert!((bounds.y0 + 2.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shape_serde() {
        let shape = Shape::Rectangle(Rectangle::new(Point::new(1.0, 2.0), 3.0, 4.0));
        let json = serde_json::to_string(&shape).unwrap();
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
        assert_eq!(back.id(), shape.id());
    }
}
