//! Picker control views.
//!
//! A `ControlView` paints one control's display list and reports the pointer
//! activity of this frame as core `PointerEvent`s in the control's local
//! coordinates. Capture and hit testing stay in the core picker.

use egui::{vec2, InputState, Pos2, Response, Sense, Ui};
use inkwheel_core::{DisplayList, Modifiers, PointerEvent};

use crate::display::{paint_display_list, LocalFrame};

/// Convert egui modifier state to the core representation.
pub fn to_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.shift,
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        meta: modifiers.mac_cmd,
    }
}

/// Primary-button activity seen during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PointerSnapshot {
    position: Option<Pos2>,
    pressed: bool,
    released: bool,
    moved: bool,
    over_control: bool,
}

impl PointerSnapshot {
    fn from_input(input: &InputState, over_control: bool) -> Self {
        Self {
            position: input.pointer.latest_pos(),
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
            moved: input.pointer.is_moving(),
            over_control,
        }
    }

    /// Presses only count over the control; moves and releases are always
    /// forwarded so the capture owner sees the end of its drag.
    fn events(self, frame: LocalFrame) -> Vec<PointerEvent> {
        let Some(pos) = self.position else {
            return Vec::new();
        };
        let local = frame.to_local(pos);
        let mut events = Vec::new();
        if self.pressed && self.over_control {
            events.push(PointerEvent::press(local));
        }
        if self.moved && !self.pressed {
            events.push(PointerEvent::Move { position: local });
        }
        if self.released {
            events.push(PointerEvent::release(local));
        }
        events
    }
}

/// A square view of a picker control.
pub struct ControlView<'a> {
    list: &'a DisplayList,
    local_size: f64,
    side: f32,
}

impl<'a> ControlView<'a> {
    /// View of a control whose local space is a `local_size` square.
    pub fn new(list: &'a DisplayList, local_size: f64) -> Self {
        Self {
            list,
            local_size,
            side: local_size as f32,
        }
    }

    /// On-screen side length.
    pub fn side(mut self, side: f32) -> Self {
        self.side = side;
        self
    }

    /// Paint the control and collect this frame's pointer events.
    pub fn show(self, ui: &mut Ui) -> (Response, Vec<PointerEvent>) {
        let (rect, response) = ui.allocate_exact_size(vec2(self.side, self.side), Sense::drag());
        let frame = LocalFrame::fit(rect, self.local_size);

        if ui.is_rect_visible(rect) {
            paint_display_list(&ui.painter_at(rect.expand(8.0)), frame, self.list);
        }

        let over_control = response.contains_pointer();
        let events = ui.input(|input| PointerSnapshot::from_input(input, over_control).events(frame));
        (response, events)
    }
}
