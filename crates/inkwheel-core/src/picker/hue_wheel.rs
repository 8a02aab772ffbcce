//! Hue ring control.

use crate::color::{Color, Hsv};
use crate::display::{Brush, DisplayItem, DisplayList};
use crate::property::{ListenerId, Property};
use kurbo::{Arc, BezPath, Point, Vec2};

/// Side of the square local coordinate space.
pub const SIZE: f64 = 300.0;
/// Ring center in local coordinates.
pub const CENTER: Point = Point::new(150.0, 150.0);
pub const INNER_RADIUS: f64 = 60.0;
pub const OUTER_RADIUS: f64 = 100.0;
/// Marker circle radius.
pub const MARKER_RADIUS: f64 = 6.0;
/// The marker sits halfway across the ring.
pub const MARKER_TRACK_RADIUS: f64 = (INNER_RADIUS + OUTER_RADIUS) / 2.0;
/// Number of colored wedges around the ring.
pub const WEDGE_COUNT: usize = 720;

const WEDGE_SWEEP: f64 = 360.0 / WEDGE_COUNT as f64;
const ARC_TOLERANCE: f64 = 0.1;

/// Pointer interaction state shared by the picker controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

fn coerce_color(value: Option<Color>) -> Color {
    value.unwrap_or(Color::RED)
}

/// A hue ring with a draggable marker and a bindable color property.
#[derive(Debug)]
pub struct HueWheel {
    hue: f64,
    color: Property<Color>,
    state: DragState,
    wedges: Vec<DisplayItem>,
    display: DisplayList,
}

impl HueWheel {
    pub fn new() -> Self {
        let mut wheel = Self {
            hue: 0.0,
            color: Property::new(Color::RED, coerce_color),
            state: DragState::Idle,
            wedges: build_wedges(),
            display: DisplayList::new(),
        };
        wheel.rebuild();
        wheel
    }

    /// Current hue in degrees, `[0, 360)`.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn color(&self) -> Color {
        *self.color.get()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The display list for the current state.
    pub fn display(&self) -> &DisplayList {
        &self.display
    }

    /// Build a fresh display list: the wedge ring plus the hue marker.
    pub fn render(&self) -> DisplayList {
        let mut list = DisplayList::new();
        for wedge in &self.wedges {
            list.push(wedge.clone());
        }
        list.push(DisplayItem::StrokeCircle {
            center: self.marker_position(),
            radius: MARKER_RADIUS,
            width: 2.0,
            color: Color::WHITE,
        });
        list
    }

    /// Marker center for the current hue.
    pub fn marker_position(&self) -> Point {
        CENTER + Vec2::from_angle(self.hue.to_radians()) * MARKER_TRACK_RADIUS
    }

    /// Hue under `point`, or `None` outside the ring.
    pub fn hue_at(point: Point) -> Option<f64> {
        let offset = point - CENTER;
        let distance = offset.hypot();
        if !(INNER_RADIUS..=OUTER_RADIUS).contains(&distance) {
            return None;
        }
        Some(offset.y.atan2(offset.x).to_degrees().rem_euclid(360.0))
    }

    /// Primary press. Starts a drag (and wants capture) only inside the ring.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let Some(hue) = Self::hue_at(point) else {
            return false;
        };
        self.state = DragState::Dragging;
        self.drag_to(hue);
        true
    }

    /// Pointer motion. Returns true if the hue changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if self.state != DragState::Dragging {
            return false;
        }
        match Self::hue_at(point) {
            Some(hue) => {
                self.drag_to(hue);
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

    /// Programmatic color set. Always re-derives the hue and rebuilds; notifies
    /// listeners only when the stored color changed.
    pub fn set_color(&mut self, color: Color) -> bool {
        self.set_color_value(Some(color))
    }

    /// Like `set_color`, with invalid input coerced to red.
    pub fn set_color_value(&mut self, color: Option<Color>) -> bool {
        let color = coerce_color(color);
        self.hue = color.to_hsv().hue;
        self.rebuild();
        self.color.set(color)
    }

    /// Parse a `#RRGGBB` / `#AARRGGBB` string; anything unparsable becomes red.
    pub fn set_color_hex(&mut self, hex: &str) -> bool {
        self.set_color_value(Color::from_hex(hex))
    }

    /// Move the marker to `hue` without touching the color property.
    pub fn align_hue(&mut self, hue: f64) {
        self.hue = hue.rem_euclid(360.0);
        self.rebuild();
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Color) + 'static) -> ListenerId {
        self.color.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.color.unsubscribe(id)
    }

    fn drag_to(&mut self, hue: f64) {
        self.hue = hue;
        self.rebuild();
        self.color.set(Color::from_hsv(Hsv::new(hue, 1.0, 1.0)));
    }

    fn rebuild(&mut self) {
        self.display = self.render();
    }
}

impl Default for HueWheel {
    fn default() -> Self {
        Self::new()
    }
}

fn build_wedges() -> Vec<DisplayItem> {
    (0..WEDGE_COUNT)
        .map(|i| {
            let start = i as f64 * WEDGE_SWEEP;
            DisplayItem::FillPath {
                path: wedge_path(start, WEDGE_SWEEP),
                brush: Brush::Solid(Color::from_hsv(Hsv::new(start, 1.0, 1.0))),
            }
        })
        .collect()
}

/// Closed annular sector from `start` sweeping `sweep` degrees.
fn wedge_path(start: f64, sweep: f64) -> BezPath {
    let start = start.to_radians();
    let sweep = sweep.to_radians();
    let outer = Arc {
        center: CENTER,
        radii: Vec2::new(OUTER_RADIUS, OUTER_RADIUS),
        start_angle: start,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };
    let inner = Arc {
        center: CENTER,
        radii: Vec2::new(INNER_RADIUS, INNER_RADIUS),
        start_angle: start + sweep,
        sweep_angle: -sweep,
        x_rotation: 0.0,
    };

    let mut path = BezPath::new();
    path.move_to(CENTER + Vec2::from_angle(start) * OUTER_RADIUS);
    path.extend(outer.append_iter(ARC_TOLERANCE));
    path.line_to(CENTER + Vec2::from_angle(start + sweep) * INNER_RADIUS);
    path.extend(inner.append_iter(ARC_TOLERANCE));
    path.close_path();
    path
}
