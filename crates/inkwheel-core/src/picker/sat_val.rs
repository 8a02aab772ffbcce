//! Saturation/value square control.

use super::hue_wheel::DragState;
use crate::color::{Color, Hsv};
use crate::display::{Brush, DisplayItem, DisplayList, LinearGradient};
use crate::property::{ListenerId, Listeners};
use kurbo::{Point, Rect};

/// Side of the square, in local units.
pub const BOX_SIZE: f64 = 256.0;
pub const MARKER_RADIUS: f64 = 6.0;

/// A square where x selects saturation and y selects value for a fixed hue.
#[derive(Debug)]
pub struct SatValBox {
    hue: f64,
    saturation: f64,
    value: f64,
    selected_color: Color,
    state: DragState,
    display: DisplayList,
    color_changed: Listeners<Color>,
}

impl SatValBox {
    pub fn new() -> Self {
        let mut sat_val = Self {
            hue: 0.0,
            saturation: 1.0,
            value: 1.0,
            selected_color: Color::RED,
            state: DragState::Idle,
            display: DisplayList::new(),
            color_changed: Listeners::new(),
        };
        sat_val.rebuild();
        sat_val
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Opaque color for the current (hue, saturation, value).
    pub fn selected_color(&self) -> Color {
        self.selected_color
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn display(&self) -> &DisplayList {
        &self.display
    }

    /// Build a fresh display list.
    ///
    /// The base runs white to the pure hue left to right, and a transparent to
    /// black overlay runs top to bottom, so every pixel shows the exact HSV
    /// color for its position.
    pub fn render(&self) -> DisplayList {
        let rect = Rect::new(0.0, 0.0, BOX_SIZE, BOX_SIZE);
        let pure = Color::from_hsv(Hsv::new(self.hue, 1.0, 1.0));

        let mut list = DisplayList::new();
        list.push(DisplayItem::FillRect {
            rect,
            brush: Brush::Linear(LinearGradient::new(
                Point::new(0.0, 0.0),
                Point::new(BOX_SIZE, 0.0),
                Color::WHITE,
                pure,
            )),
        });
        list.push(DisplayItem::FillRect {
            rect,
            brush: Brush::Linear(LinearGradient::new(
                Point::new(0.0, 0.0),
                Point::new(0.0, BOX_SIZE),
                Color::BLACK.with_alpha(0),
                Color::BLACK,
            )),
        });
        list.push(DisplayItem::StrokeCircle {
            center: self.marker_position(),
            radius: MARKER_RADIUS,
            width: 2.0,
            color: Color::WHITE,
        });
        list
    }

    pub fn marker_position(&self) -> Point {
        Point::new(self.saturation * BOX_SIZE, (1.0 - self.value) * BOX_SIZE)
    }

    /// (saturation, value) under `point`, or `None` outside the square.
    pub fn sat_val_at(point: Point) -> Option<(f64, f64)> {
        let range = 0.0..=BOX_SIZE;
        if !range.contains(&point.x) || !range.contains(&point.y) {
            return None;
        }
        Some((point.x / BOX_SIZE, 1.0 - point.y / BOX_SIZE))
    }

    /// Primary press. Starts a drag only inside the square.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let Some((s, v)) = Self::sat_val_at(point) else {
            return false;
        };
        self.state = DragState::Dragging;
        self.pick(s, v);
        true
    }

    /// Pointer motion. Returns true if the selection changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if self.state != DragState::Dragging {
            return false;
        }
        match Self::sat_val_at(point) {
            Some((s, v)) => {
                self.pick(s, v);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn capture_lost(&mut self) {
        self.state = DragState::Idle;
    }

    /// New hue from the wheel. Keeps the marker, recomputes the color, and
    /// does not notify.
    pub fn update_hue(&mut self, hue: f64) {
        self.hue = hue;
        self.recompute();
        self.rebuild();
    }

    /// Programmatic selection. Re-derives hue, saturation and value; does not
    /// notify.
    pub fn set_selected_color(&mut self, color: Color) {
        let hsv = color.to_hsv();
        self.hue = hsv.hue;
        self.saturation = hsv.saturation;
        self.value = hsv.value;
        self.selected_color = color.with_alpha(255);
        self.rebuild();
    }

    /// Listen for selections made with the pointer.
    pub fn on_color_changed(&mut self, listener: impl FnMut(&Color) + 'static) -> ListenerId {
        self.color_changed.subscribe(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.color_changed.unsubscribe(id)
    }

    fn pick(&mut self, saturation: f64, value: f64) {
        self.saturation = saturation;
        self.value = value;
        self.recompute();
        self.rebuild();
        self.color_changed.emit(&self.selected_color);
    }

    fn recompute(&mut self) {
        self.selected_color = Color::from_hsv(Hsv::new(self.hue, self.saturation, self.value));
    }

    fn rebuild(&mut self) {
        self.display = self.render();
    }
}

impl Default for SatValBox {
    fn default() -> Self {
        Self::new()
    }
}
