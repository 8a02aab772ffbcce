//! The color picker: hue wheel, saturation/value box, alpha and palette.
//!
//! Controls report user changes through listeners that push onto a shared
//! signal queue. `ColorPicker` drains that queue after every routed pointer
//! event and applies the synchronization rules, so no listener ever needs a
//! reference back into the picker.

pub mod hue_wheel;
pub mod sat_val;

pub use hue_wheel::{DragState, HueWheel};
pub use sat_val::SatValBox;

use crate::color::Color;
use crate::input::{CaptureTarget, Modifiers, MouseButton, PointerCapture, PointerEvent};
use crate::notice::Notice;
use crate::palette::Palette;
use crate::storage::SettingsStore;
use kurbo::Point;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A change reported by one of the picker controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerSignal {
    HueWheel(Color),
    SatVal(Color),
}

type SignalQueue = Rc<RefCell<VecDeque<PickerSignal>>>;

/// A control that can be dragged with the primary button.
pub trait DragControl {
    /// Press at a local point. Returns true if a drag started.
    fn pointer_down(&mut self, point: Point) -> bool;
    /// Move during a drag. Returns true if the control's value changed.
    fn pointer_move(&mut self, point: Point) -> bool;
    fn pointer_up(&mut self);
    fn capture_lost(&mut self);
}

impl DragControl for HueWheel {
    fn pointer_down(&mut self, point: Point) -> bool {
        HueWheel::pointer_down(self, point)
    }
    fn pointer_move(&mut self, point: Point) -> bool {
        HueWheel::pointer_move(self, point)
    }
    fn pointer_up(&mut self) {
        HueWheel::pointer_up(self)
    }
    fn capture_lost(&mut self) {
        HueWheel::capture_lost(self)
    }
}

impl DragControl for SatValBox {
    fn pointer_down(&mut self, point: Point) -> bool {
        SatValBox::pointer_down(self, point)
    }
    fn pointer_move(&mut self, point: Point) -> bool {
        SatValBox::pointer_move(self, point)
    }
    fn pointer_up(&mut self) {
        SatValBox::pointer_up(self)
    }
    fn capture_lost(&mut self) {
        SatValBox::capture_lost(self)
    }
}

/// Deliver one pointer event to a control, acquiring and releasing capture.
fn drive(
    control: &mut dyn DragControl,
    capture: &mut PointerCapture,
    target: CaptureTarget,
    event: PointerEvent,
) -> bool {
    match event {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
        } => control.pointer_down(position) && capture.acquire(target),
        PointerEvent::Move { position } => {
            capture.is_captured_by(target) && control.pointer_move(position)
        }
        PointerEvent::Up {
            button: MouseButton::Left,
            ..
        } => {
            if capture.release(target) {
                control.pointer_up();
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

/// The composed picker and the active drawing color it produces.
#[derive(Debug)]
pub struct ColorPicker {
    hue_wheel: HueWheel,
    sat_val: SatValBox,
    alpha: u8,
    alpha_text: String,
    preview: Color,
    active: Color,
    palette: Palette,
    signals: SignalQueue,
}

impl ColorPicker {
    pub fn new(palette: Palette) -> Self {
        let signals: SignalQueue = Rc::new(RefCell::new(VecDeque::new()));
        let mut hue_wheel = HueWheel::new();
        let mut sat_val = SatValBox::new();

        let queue = signals.clone();
        hue_wheel.subscribe(move |color| {
            queue.borrow_mut().push_back(PickerSignal::HueWheel(*color));
        });
        let queue = signals.clone();
        sat_val.on_color_changed(move |color| {
            queue.borrow_mut().push_back(PickerSignal::SatVal(*color));
        });

        let mut picker = Self {
            hue_wheel,
            sat_val,
            alpha: 255,
            alpha_text: "255".to_string(),
            preview: Color::BLACK,
            active: Color::BLACK,
            palette,
            signals,
        };
        picker.load_color(Color::BLACK);
        picker
    }

    pub fn hue_wheel(&self) -> &HueWheel {
        &self.hue_wheel
    }

    pub fn sat_val(&self) -> &SatValBox {
        &self.sat_val
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn alpha_text(&self) -> &str {
        &self.alpha_text
    }

    pub fn preview(&self) -> Color {
        self.preview
    }

    /// The drawing color applied to new strokes and shapes.
    pub fn active_color(&self) -> Color {
        self.active
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Initialize every control from the current drawing color.
    pub fn open(&mut self, active: Color) {
        self.load_color(active);
    }

    /// Route a pointer event (in the target control's local coordinates).
    /// Returns true if the event was consumed.
    pub fn route_pointer(
        &mut self,
        capture: &mut PointerCapture,
        target: CaptureTarget,
        event: PointerEvent,
    ) -> bool {
        if !capture.admits(target) {
            return false;
        }
        let handled = match target {
            CaptureTarget::HueWheel => drive(&mut self.hue_wheel, capture, target, event),
            CaptureTarget::SatValBox => drive(&mut self.sat_val, capture, target, event),
            CaptureTarget::Canvas => false,
        };
        self.pump();
        handled
    }

    /// End the drag of whichever picker control lost capture.
    pub fn capture_lost(&mut self, target: CaptureTarget) {
        match target {
            CaptureTarget::HueWheel => self.hue_wheel.capture_lost(),
            CaptureTarget::SatValBox => self.sat_val.capture_lost(),
            CaptureTarget::Canvas => {}
        }
    }

    /// Alpha slider moved.
    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
        self.alpha_text = alpha.to_string();
        self.commit(self.sat_val.selected_color());
    }

    /// Alpha text edited. Integers are clamped to `0..=255`; anything else
    /// leaves the alpha as it was.
    pub fn set_alpha_text(&mut self, text: &str) {
        self.alpha_text = text.to_string();
        if let Ok(value) = text.trim().parse::<i64>() {
            self.set_alpha(value.clamp(0, 255) as u8);
        }
    }

    /// Swatch click. Plain click loads the swatch; shift-click stores the
    /// active color into the slot and persists the palette.
    pub fn click_swatch(
        &mut self,
        slot: usize,
        modifiers: Modifiers,
        store: &dyn SettingsStore,
    ) -> Option<Notice> {
        if modifiers.shift {
            if !self.palette.set(slot, self.active) {
                return None;
            }
            log::info!("Saved {} to palette slot {}", self.active.to_hex(), slot + 1);
            Some(self.persist_palette(store).unwrap_or_else(|| {
                Notice::info("Saved", format!("Color saved to slot {}", slot + 1))
            }))
        } else {
            let color = self.palette.get(slot)?;
            self.load_color(color);
            None
        }
    }

    /// Restore the built-in palette and persist it.
    pub fn reset_palette(&mut self, store: &dyn SettingsStore) -> Notice {
        self.palette.reset();
        log::info!("Palette reset to defaults");
        self.persist_palette(store)
            .unwrap_or_else(|| Notice::info("Reset", "Palette reset to default colors."))
    }

    /// Push `color` into every control without feeding changes back.
    fn load_color(&mut self, color: Color) {
        self.active = color;
        self.preview = color;
        self.alpha = color.a;
        self.alpha_text = color.a.to_string();
        self.hue_wheel.set_color(color.with_alpha(255));
        self.sat_val.set_selected_color(color);
        self.signals.borrow_mut().clear();
    }

    /// Apply queued control changes in order.
    fn pump(&mut self) {
        loop {
            let signal = self.signals.borrow_mut().pop_front();
            let Some(signal) = signal else {
                break;
            };
            match signal {
                PickerSignal::HueWheel(color) => self.apply_hue(color),
                PickerSignal::SatVal(color) => self.commit(color),
            }
        }
    }

    fn apply_hue(&mut self, wheel_color: Color) {
        let hue = wheel_color.to_hsv().hue;
        self.sat_val.update_hue(hue);
        self.hue_wheel.align_hue(hue);
        self.commit(self.sat_val.selected_color());
    }

    fn commit(&mut self, rgb: Color) {
        self.active = rgb.with_alpha(self.alpha);
        self.preview = self.active;
    }

    /// Returns an error notice on failure.
    fn persist_palette(&self, store: &dyn SettingsStore) -> Option<Notice> {
        match store.save_palette(&self.palette.to_vec()) {
            Ok(()) => None,
            Err(e) => {
                log::error!("Failed to save palette: {}", e);
                Some(Notice::error("Error", format!("Failed to save palette: {}", e)))
            }
        }
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeKind;
    use crate::palette::DEFAULT_PALETTE;
    use crate::storage::{
        FileSettingsStore, MemorySettingsStore, Settings, StorageError, StorageResult,
    };
    use kurbo::Vec2;

    struct FailingStore;

    impl SettingsStore for FailingStore {
        fn load(&self) -> StorageResult<Settings> {
            Err(StorageError::Io("disk gone".to_string()))
        }
        fn save(&self, _settings: &Settings) -> StorageResult<()> {
            Err(StorageError::Io("disk gone".to_string()))
        }
    }

    fn wheel_point(degrees: f64) -> Point {
        hue_wheel::CENTER + Vec2::from_angle(degrees.to_radians()) * 80.0
    }

    fn drag_wheel(picker: &mut ColorPicker, capture: &mut PointerCapture, degrees: f64) {
        let p = wheel_point(degrees);
        picker.route_pointer(capture, CaptureTarget::HueWheel, PointerEvent::press(p));
        picker.route_pointer(capture, CaptureTarget::HueWheel, PointerEvent::release(p));
    }

    fn click_box(picker: &mut ColorPicker, capture: &mut PointerCapture, x: f64, y: f64) {
        let p = Point::new(x, y);
        picker.route_pointer(capture, CaptureTarget::SatValBox, PointerEvent::press(p));
        picker.route_pointer(capture, CaptureTarget::SatValBox, PointerEvent::release(p));
    }

    #[test]
    fn test_hue_change_flows_into_box_and_active_color() {
        let mut picker = ColorPicker::default();
        let mut capture = PointerCapture::new();
        click_box(&mut picker, &mut capture, 256.0, 0.0);
        assert_eq!(picker.active_color(), Color::RED);

        drag_wheel(&mut picker, &mut capture, 240.0);
        assert!((picker.sat_val().hue() - 240.0).abs() < 1e-9);
        assert_eq!(picker.active_color(), Color::rgb(0, 0, 255));
        assert_eq!(picker.preview(), picker.active_color());
        assert_eq!(capture.owner(), None);
    }

    #[test]
    fn test_hue_change_keeps_alpha() {
        let mut picker = ColorPicker::default();
        let mut capture = PointerCapture::new();
        picker.set_alpha(90);
        click_box(&mut picker, &mut capture, 256.0, 0.0);
        assert_eq!(picker.active_color(), Color::argb(90, 255, 0, 0));

        drag_wheel(&mut picker, &mut capture, 120.0);
        assert_eq!(picker.active_color(), Color::argb(90, 0, 255, 0));
        assert_eq!(picker.active_color().a, 90);
        assert_eq!(picker.preview(), picker.active_color());
        assert_eq!(picker.alpha_text(), "90");
    }

    #[test]
    fn test_box_change_keeps_alpha() {
        let mut picker = ColorPicker::default();
        let mut capture = PointerCapture::new();
        picker.set_alpha(100);
        click_box(&mut picker, &mut capture, 0.0, 0.0);
        assert_eq!(picker.active_color(), Color::argb(100, 255, 255, 255));
        assert_eq!(picker.preview(), picker.active_color());
    }

    #[test]
    fn test_alpha_text() {
        let mut picker = ColorPicker::default();
        picker.set_alpha_text("300");
        assert_eq!(picker.alpha(), 255);
        assert_eq!(picker.alpha_text(), "255");

        picker.set_alpha_text("-4");
        assert_eq!(picker.alpha(), 0);
        assert_eq!(picker.active_color().a, 0);

        picker.set_alpha_text("abc");
        assert_eq!(picker.alpha(), 0);
        assert_eq!(picker.alpha_text(), "abc");

        picker.set_alpha_text(" 128 ");
        assert_eq!(picker.alpha(), 128);
    }

    #[test]
    fn test_alpha_slider_mirrors_text() {
        let mut picker = ColorPicker::default();
        picker.set_alpha(42);
        assert_eq!(picker.alpha_text(), "42");
        assert_eq!(picker.preview().a, 42);
    }

    #[test]
    fn test_swatch_click_loads_color() {
        let mut picker = ColorPicker::default();
        let store = MemorySettingsStore::new();
        assert!(picker.click_swatch(2, Modifiers::NONE, &store).is_none());
        assert_eq!(picker.active_color(), Color::rgb(0, 0, 255));
        assert!((picker.hue_wheel().hue() - 240.0).abs() < 1e-9);
        assert_eq!(picker.sat_val().selected_color(), Color::rgb(0, 0, 255));
        assert_eq!(picker.alpha_text(), "255");
        // Nothing was written.
        assert!(store.load().is_err());
    }

    #[test]
    fn test_shift_click_saves_and_persists() {
        let mut picker = ColorPicker::default();
        let store = MemorySettingsStore::new();
        picker.set_alpha(10);
        let notice = picker.click_swatch(4, Modifiers::SHIFT, &store).unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert!(notice.message.contains("slot 5"));

        let saved = store.load().unwrap().palette.unwrap();
        assert_eq!(saved[4], Color::argb(10, 0, 0, 0));
        assert_eq!(picker.palette().get(4), Some(Color::argb(10, 0, 0, 0)));
    }

    #[test]
    fn test_reset_restores_defaults_and_persists() {
        let mut picker = ColorPicker::default();
        let store = MemorySettingsStore::new();
        picker.click_swatch(0, Modifiers::SHIFT, &store);
        let notice = picker.reset_palette(&store);
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(picker.palette().colors(), &DEFAULT_PALETTE);
        assert_eq!(store.load().unwrap().palette.unwrap(), DEFAULT_PALETTE.to_vec());
    }

    #[test]
    fn test_palette_saves_over_corrupt_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = FileSettingsStore::new(path);

        let mut picker = ColorPicker::default();
        picker.set_alpha(200);
        let notice = picker.click_swatch(0, Modifiers::SHIFT, &store).unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(
            store.load().unwrap().palette.unwrap()[0],
            Color::argb(200, 0, 0, 0)
        );

        let notice = picker.reset_palette(&store);
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(store.load().unwrap().palette.unwrap(), DEFAULT_PALETTE.to_vec());
    }

    #[test]
    fn test_persist_failure_reports_error() {
        let mut picker = ColorPicker::default();
        let notice = picker.reset_palette(&FailingStore);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("disk gone"));
    }

    #[test]
    fn test_capture_blocks_other_control() {
        let mut picker = ColorPicker::default();
        let mut capture = PointerCapture::new();
        assert!(picker.route_pointer(
            &mut capture,
            CaptureTarget::HueWheel,
            PointerEvent::press(wheel_point(120.0)),
        ));
        let before = picker.active_color();
        assert!(!picker.route_pointer(
            &mut capture,
            CaptureTarget::SatValBox,
            PointerEvent::press(Point::new(0.0, 0.0)),
        ));
        assert_eq!(picker.active_color(), before);

        capture.lose();
        picker.capture_lost(CaptureTarget::HueWheel);
        assert_eq!(picker.hue_wheel().state(), DragState::Idle);
    }

    #[test]
    fn test_open_does_not_feed_back() {
        let mut picker = ColorPicker::default();
        let color = Color::argb(77, 0, 128, 0);
        picker.open(color);
        assert_eq!(picker.active_color(), color);
        assert_eq!(picker.alpha(), 77);
        assert_eq!(picker.sat_val().selected_color(), Color::rgb(0, 128, 0));
    }
}
