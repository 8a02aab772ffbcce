//! Routing window pointer input to the canvas.
//!
//! Window coordinates are logical pixels with the origin at the top-left of
//! the window. The drawing area starts below the toolbar, so every position is
//! shifted by the canvas origin before it reaches the tools.

use inkwheel_core::{
    Canvas, CaptureTarget, ColorPicker, MouseButton, PointerCapture, PointerEvent,
};
use kurbo::Point;

/// Map a winit mouse button to the core representation.
pub fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Translates window pointer input into canvas pointer events.
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    /// Last cursor position in logical window coordinates.
    cursor: Point,
    /// Top-left of the drawing area in logical window coordinates.
    origin: Point,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn canvas_origin(&self) -> Point {
        self.origin
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Window position to canvas coordinates.
    pub fn to_canvas(&self, window: Point) -> Point {
        window - self.origin.to_vec2()
    }

    /// Whether the canvas should see input right now. Once the canvas owns
    /// capture it keeps receiving events even over the toolbar.
    pub fn canvas_accepts(&self, capture: &PointerCapture, ui_wants_pointer: bool) -> bool {
        capture.is_captured_by(CaptureTarget::Canvas) || !ui_wants_pointer
    }

    /// Cursor moved to `window` (logical). Returns true if the canvas changed.
    pub fn cursor_moved(
        &mut self,
        canvas: &mut Canvas,
        capture: &mut PointerCapture,
        window: Point,
    ) -> bool {
        self.cursor = window;
        if !capture.is_captured_by(CaptureTarget::Canvas) {
            return false;
        }
        let position = self.to_canvas(window);
        canvas.route_pointer(capture, PointerEvent::Move { position })
    }

    /// Button pressed or released at the last cursor position.
    pub fn mouse_input(
        &mut self,
        canvas: &mut Canvas,
        capture: &mut PointerCapture,
        button: MouseButton,
        pressed: bool,
    ) -> bool {
        let position = self.to_canvas(self.cursor);
        if pressed && (position.x < 0.0 || position.y < 0.0) {
            return false;
        }
        let event = if pressed {
            PointerEvent::Down { position, button }
        } else {
            PointerEvent::Up { position, button }
        };
        canvas.route_pointer(capture, event)
    }
}

/// Take capture away from whoever holds it and let that target clean up.
pub fn lose_capture(capture: &mut PointerCapture, canvas: &mut Canvas, picker: &mut ColorPicker) {
    match capture.lose() {
        Some(CaptureTarget::Canvas) => {
            log::debug!("Canvas lost pointer capture");
            canvas.capture_lost();
        }
        Some(target) => {
            log::debug!("{:?} lost pointer capture", target);
            picker.capture_lost(target);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwheel_core::ToolKind;

    fn handler() -> EventHandler {
        let mut handler = EventHandler::new();
        handler.set_canvas_origin(Point::new(0.0, 40.0));
        handler
    }

    #[test]
    fn test_positions_shift_by_origin() {
        let handler = handler();
        assert_eq!(handler.to_canvas(Point::new(10.0, 50.0)), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_drag_draws_line_in_canvas_space() {
        let mut handler = handler();
        let mut canvas = Canvas::new();
        let mut capture = PointerCapture::new();
        canvas.set_tool(ToolKind::Line);

        handler.cursor_moved(&mut canvas, &mut capture, Point::new(10.0, 50.0));
        assert!(handler.mouse_input(&mut canvas, &mut capture, MouseButton::Left, true));
        assert!(capture.is_captured_by(CaptureTarget::Canvas));
        assert!(handler.cursor_moved(&mut canvas, &mut capture, Point::new(30.0, 90.0)));
        assert!(handler.mouse_input(&mut canvas, &mut capture, MouseButton::Left, false));

        assert_eq!(canvas.drawing.len(), 1);
        match &canvas.drawing.shapes()[0] {
            inkwheel_core::shapes::Shape::Line(line) => {
                assert_eq!(line.start, Point::new(10.0, 10.0));
                assert_eq!(line.end, Point::new(30.0, 50.0));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_press_above_canvas_ignored() {
        let mut handler = handler();
        let mut canvas = Canvas::new();
        let mut capture = PointerCapture::new();
        handler.cursor_moved(&mut canvas, &mut capture, Point::new(10.0, 20.0));
        assert!(!handler.mouse_input(&mut canvas, &mut capture, MouseButton::Left, true));
        assert_eq!(capture.owner(), None);
    }

    #[test]
    fn test_canvas_keeps_input_while_captured() {
        let handler = handler();
        let mut capture = PointerCapture::new();
        assert!(handler.canvas_accepts(&capture, false));
        assert!(!handler.canvas_accepts(&capture, true));
        capture.acquire(CaptureTarget::Canvas);
        assert!(handler.canvas_accepts(&capture, true));
    }

    #[test]
    fn test_lose_capture_cancels_canvas_drag() {
        let mut handler = handler();
        let mut canvas = Canvas::new();
        let mut picker = ColorPicker::default();
        let mut capture = PointerCapture::new();
        handler.cursor_moved(&mut canvas, &mut capture, Point::new(10.0, 50.0));
        handler.mouse_input(&mut canvas, &mut capture, MouseButton::Left, true);

        lose_capture(&mut capture, &mut canvas, &mut picker);
        assert_eq!(capture.owner(), None);
        assert!(!canvas.tools.is_active());
        assert!(!handler.mouse_input(&mut canvas, &mut capture, MouseButton::Left, false));
        assert!(canvas.drawing.is_empty());
    }

    #[test]
    fn test_map_button() {
        assert_eq!(map_button(winit::event::MouseButton::Left), Some(MouseButton::Left));
        assert_eq!(map_button(winit::event::MouseButton::Back), None);
    }
}
