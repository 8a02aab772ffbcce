//! Drawing document and canvas state.

use crate::color::Color;
use crate::input::{CaptureTarget, MouseButton, PointerCapture, PointerEvent};
use crate::shapes::{Shape, ShapeStyle};
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Smallest selectable brush thickness.
pub const MIN_THICKNESS: f64 = 1.0;
/// Largest selectable brush thickness.
pub const MAX_THICKNESS: f64 = 50.0;

/// Ink document format version written by `to_json`.
const INK_FORMAT_VERSION: u32 = 1;

/// Ordered shapes, back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(default = "ink_format_version")]
    pub version: u32,
    pub shapes: Vec<Shape>,
}

fn ink_format_version() -> u32 {
    INK_FORMAT_VERSION
}

impl Drawing {
    /// Create a new empty drawing.
    pub fn new() -> Self {
        Self {
            version: INK_FORMAT_VERSION,
            shapes: Vec::new(),
        }
    }

    /// Add a shape on top of everything else.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Union of all shape bounds including stroke width.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .map(Shape::stroke_bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Serialize as an ink document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse an ink document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

/// The drawing surface: document, tools and current drawing attributes.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being drawn.
    pub drawing: Drawing,
    /// Tool state and the style applied to new shapes.
    pub tools: ToolManager,
    /// Surface size in logical pixels.
    viewport_size: Size,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::with_drawing(Drawing::new())
    }

    /// Create a canvas showing an existing drawing.
    pub fn with_drawing(drawing: Drawing) -> Self {
        Self {
            drawing,
            tools: ToolManager::new(),
            viewport_size: Size::ZERO,
        }
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width.max(0.0), height.max(0.0));
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// Drawing color for new strokes and shapes.
    pub fn set_color(&mut self, color: Color) {
        self.tools.current_style.stroke_color = color;
    }

    pub fn color(&self) -> Color {
        self.tools.current_style.stroke_color
    }

    /// Brush thickness for new strokes and shapes, clamped to the slider range.
    pub fn set_thickness(&mut self, thickness: f64) {
        self.tools.current_style.stroke_width = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
    }

    pub fn thickness(&self) -> f64 {
        self.tools.current_style.stroke_width
    }

    pub fn style(&self) -> ShapeStyle {
        self.tools.current_style
    }

    /// Remove every stroke and shape.
    pub fn clear(&mut self) {
        self.tools.cancel();
        self.drawing.clear();
    }

    /// Replace the document, keeping tool and attributes.
    pub fn load(&mut self, drawing: Drawing) {
        self.tools.cancel();
        self.drawing = drawing;
    }

    /// Route a pointer event in canvas coordinates. Returns true if consumed.
    pub fn route_pointer(&mut self, capture: &mut PointerCapture, event: PointerEvent) -> bool {
        let target = CaptureTarget::Canvas;
        if !capture.admits(target) {
            return false;
        }
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                if !capture.acquire(target) {
                    return false;
                }
                self.tools.begin(position);
                true
            }
            PointerEvent::Move { position } if capture.is_captured_by(target) => {
                self.tools.update(position);
                true
            }
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } if capture.release(target) => {
                if let Some(shape) = self.tools.end(position) {
                    log::debug!("Committed shape {}", shape.id());
                    self.drawing.add_shape(shape);
                }
                true
            }
            _ => false,
        }
    }

    /// Abandon the interaction in progress after capture was taken away.
    pub fn capture_lost(&mut self) {
        self.tools.cancel();
    }

    /// Shape being drawn right now, if any.
    pub fn preview(&self) -> Option<Shape> {
        self.tools.preview_shape()
    }
}
