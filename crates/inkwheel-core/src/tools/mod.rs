//! Drawing tools.

use crate::shapes::{Ellipse, Line, Rectangle, Shape, ShapeStyle, Stroke};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Ink,
    Line,
    Rectangle,
    Ellipse,
}

impl ToolKind {
    /// Every tool, in toolbar order.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Ink,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Ink => "Pen",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// Tool is actively being used (e.g., drawing a shape).
    Active {
        /// Starting point of the interaction.
        start: Point,
        /// Current point of the interaction.
        current: Point,
    },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Ink stroke being captured.
    stroke: Option<Stroke>,
    /// Current style to apply to new shapes.
    pub current_style: ShapeStyle,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, abandoning any interaction in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.cancel();
    }

    /// Begin a tool interaction.
    pub fn begin(&mut self, point: Point) {
        if self.current_tool == ToolKind::Ink {
            let mut stroke = Stroke::new(self.current_style);
            stroke.add_point(point);
            self.stroke = Some(stroke);
        }
        self.state = ToolState::Active {
            start: point,
            current: point,
        };
    }

    /// Update the current interaction.
    pub fn update(&mut self, point: Point) {
        if let ToolState::Active { current, .. } = &mut self.state {
            *current = point;
            if let Some(stroke) = &mut self.stroke {
                stroke.add_point(point);
            }
        }
    }

    /// End the current interaction and return any created shape.
    pub fn end(&mut self, point: Point) -> Option<Shape> {
        let ToolState::Active { start, .. } = self.state else {
            return None;
        };
        self.update(point);
        let shape = match self.stroke.take() {
            Some(stroke) => Some(Shape::Stroke(stroke)),
            None if start == point => None,
            None => self.create_shape(start, point),
        };
        self.state = ToolState::Idle;
        shape
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.stroke = None;
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Get the preview shape for the current interaction.
    pub fn preview_shape(&self) -> Option<Shape> {
        let ToolState::Active { start, current } = self.state else {
            return None;
        };
        match &self.stroke {
            Some(stroke) => Some(Shape::Stroke(stroke.clone())),
            None => self.create_shape(start, current),
        }
    }

    /// Create a shape spanning `start` to `end` with the current style.
    fn create_shape(&self, start: Point, end: Point) -> Option<Shape> {
        let style = self.current_style;
        match self.current_tool {
            ToolKind::Line => Some(Shape::Line(Line::new(start, end).with_style(style))),
            ToolKind::Rectangle => Some(Shape::Rectangle(
                Rectangle::from_corners(start, end).with_style(style),
            )),
            ToolKind::Ellipse => Some(Shape::Ellipse(
                Ellipse::from_rect(Rect::from_points(start, end)).with_style(style),
            )),
            ToolKind::Ink => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Ink);

        tm.set_tool(ToolKind::Rectangle);
        assert_eq!(tm.current_tool, ToolKind::Rectangle);
    }

    #[test]
    fn test_tool_interaction() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);

        assert!(!tm.is_active());

        tm.begin(Point::new(100.0, 100.0));
        assert!(tm.is_active());

        tm.update(Point::new(50.0, 50.0));

        let preview = tm.preview_shape();
        assert!(matches!(preview, Some(Shape::Rectangle(_))));

        let shape = tm.end(Point::new(20.0, 60.0));
        assert!(!tm.is_active());
        match shape {
            Some(Shape::Rectangle(rect)) => {
                assert!((rect.position.x - 20.0).abs() < f64::EPSILON);
                assert!((rect.position.y - 60.0).abs() < f64::EPSILON);
                assert!((rect.width - 80.0).abs() < f64::EPSILON);
                assert!((rect.height - 40.0).abs() < f64::EPSILON);
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn test_ink_collects_points_with_style() {
        let mut tm = ToolManager::new();
        tm.current_style = ShapeStyle::new(Color::rgb(1, 2, 3), 12.0);

        tm.begin(Point::new(0.0, 0.0));
        tm.update(Point::new(5.0, 5.0));
        tm.update(Point::new(10.0, 0.0));
        let shape = tm.end(Point::new(15.0, 5.0));

        match shape {
            Some(Shape::Stroke(stroke)) => {
                assert_eq!(stroke.len(), 4);
                assert_eq!(stroke.style.stroke_color, Color::rgb(1, 2, 3));
                assert!((stroke.style.stroke_width - 12.0).abs() < f64::EPSILON);
            }
            other => panic!("expected stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_ellipse_from_drag() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Ellipse);
        tm.begin(Point::new(10.0, 10.0));
        match tm.end(Point::new(0.0, 30.0)) {
            Some(Shape::Ellipse(e)) => {
                assert!((e.center.x - 5.0).abs() < f64::EPSILON);
                assert!((e.center.y - 20.0).abs() < f64::EPSILON);
                assert!((e.radius_x - 5.0).abs() < f64::EPSILON);
                assert!((e.radius_y - 10.0).abs() < f64::EPSILON);
            }
            other => panic!("expected ellipse, got {other:?}"),
        }
    }

    #[test]
    fn test_click_without_drag_makes_no_shape() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        tm.begin(Point::new(5.0, 5.0));
        assert!(tm.end(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_ink_click_makes_dot() {
        let mut tm = ToolManager::new();
        tm.begin(Point::new(5.0, 5.0));
        assert!(matches!(tm.end(Point::new(5.0, 5.0)), Some(Shape::Stroke(s)) if s.len() == 1));
    }

    #[test]
    fn test_cancel_interaction() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);

        tm.begin(Point::new(0.0, 0.0));
        assert!(tm.is_active());

        tm.cancel();
        assert!(!tm.is_active());
        assert!(tm.end(Point::new(10.0, 10.0)).is_none());
    }
}
