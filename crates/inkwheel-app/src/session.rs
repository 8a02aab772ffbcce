//! Application state shared by the UI pass and window event handling.

use inkwheel_core::{
    Canvas, CaptureTarget, ColorPicker, MouseButton, Notice, Palette, PointerCapture, Settings,
    SettingsStore,
};
use kurbo::Point;

use crate::event_handler::{lose_capture, EventHandler};
use crate::ui::{UiAction, UiState};

/// Work that needs a native dialog or the GPU, finished by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    Save,
    Open,
}

/// Drawing, picker and input state for one window.
pub struct Session {
    pub canvas: Canvas,
    pub picker: ColorPicker,
    pub capture: PointerCapture,
    pub ui_state: UiState,
    pub event_handler: EventHandler,
    store: Box<dyn SettingsStore>,
    deferred: Option<Deferred>,
}

impl Session {
    /// Restore palette and thickness from `store`. `default_thickness` is used
    /// when nothing usable is stored.
    pub fn new(store: Box<dyn SettingsStore>, default_thickness: f64) -> Self {
        let settings = store.load_or(Settings {
            thickness: default_thickness,
            ..Settings::default()
        });

        let picker = ColorPicker::new(Palette::from_saved(settings.palette.as_deref()));
        let mut canvas = Canvas::new();
        canvas.set_thickness(settings.thickness);
        canvas.set_color(picker.active_color());

        Self {
            canvas,
            picker,
            capture: PointerCapture::new(),
            ui_state: UiState::default(),
            event_handler: EventHandler::new(),
            store,
            deferred: None,
        }
    }

    /// Settings describing the current session.
    pub fn settings(&self) -> Settings {
        Settings {
            palette: Some(self.picker.palette().to_vec()),
            thickness: self.canvas.thickness(),
        }
    }

    /// Write settings back to the store.
    pub fn persist(&self) {
        match self.store.save(&self.settings()) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::error!("Failed to save settings: {}", e),
        }
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.ui_state.notice = Some(notice);
    }

    /// Cursor moved to a logical window position.
    pub fn cursor_moved(&mut self, window: Point) -> bool {
        self.event_handler
            .cursor_moved(&mut self.canvas, &mut self.capture, window)
    }

    /// Mouse button changed. `ui_wants_pointer` is true when egui is using
    /// the pointer for its own widgets.
    pub fn mouse_input(&mut self, button: MouseButton, pressed: bool, ui_wants_pointer: bool) -> bool {
        if !self
            .event_handler
            .canvas_accepts(&self.capture, ui_wants_pointer)
        {
            return false;
        }
        self.event_handler
            .mouse_input(&mut self.canvas, &mut self.capture, button, pressed)
    }

    /// The window lost focus mid-drag.
    pub fn lose_capture(&mut self) {
        lose_capture(&mut self.capture, &mut self.canvas, &mut self.picker);
    }

    /// Apply an action, holding on to any work the app has to finish on the
    /// next frame.
    pub fn handle(&mut self, action: UiAction) {
        if let Some(work) = self.apply(action) {
            self.deferred = Some(work);
        }
    }

    pub fn take_deferred(&mut self) -> Option<Deferred> {
        self.deferred.take()
    }

    /// Apply one UI action. Returns work that still needs the app.
    pub fn apply(&mut self, action: UiAction) -> Option<Deferred> {
        match action {
            UiAction::SetTool(tool) => {
                log::debug!("Tool: {}", tool.label());
                self.canvas.set_tool(tool);
            }
            UiAction::SetThickness(thickness) => self.canvas.set_thickness(thickness),
            UiAction::Clear => {
                log::info!("Cleared {} shapes", self.canvas.drawing.len());
                self.canvas.clear();
            }
            UiAction::Save => return Some(Deferred::Save),
            UiAction::Open => return Some(Deferred::Open),
            UiAction::OpenPicker => {
                self.picker.open(self.canvas.color());
                self.ui_state.picker_open = true;
            }
            UiAction::ClosePicker => self.close_picker(),
            UiAction::Dismiss => {
                if self.ui_state.notice.is_some() {
                    self.ui_state.notice = None;
                } else if self.ui_state.picker_open {
                    self.close_picker();
                }
            }
            UiAction::DismissNotice => self.ui_state.notice = None,
            UiAction::PickerPointer(target, event) => {
                if self.picker.route_pointer(&mut self.capture, target, event) {
                    self.sync_color();
                }
            }
            UiAction::SetAlpha(alpha) => {
                self.picker.set_alpha(alpha);
                self.sync_color();
            }
            UiAction::SetAlphaText(text) => {
                self.picker.set_alpha_text(&text);
                self.sync_color();
            }
            UiAction::ClickSwatch(slot, modifiers) => {
                let notice = self.picker.click_swatch(slot, modifiers, self.store.as_ref());
                self.sync_color();
                if let Some(notice) = notice {
                    self.show_notice(notice);
                }
            }
            UiAction::ResetPalette => {
                let notice = self.picker.reset_palette(self.store.as_ref());
                self.show_notice(notice);
            }
        }
        None
    }

    fn close_picker(&mut self) {
        self.ui_state.picker_open = false;
        if matches!(
            self.capture.owner(),
            Some(CaptureTarget::HueWheel | CaptureTarget::SatValBox)
        ) {
            self.lose_capture();
        }
    }

    /// New strokes use the picker's active color.
    fn sync_color(&mut self) {
        self.canvas.set_color(self.picker.active_color());
    }
}
