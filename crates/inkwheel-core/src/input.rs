//! Pointer events and pointer capture.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Pointer event in the receiving control's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Move { position: Point },
    Up { position: Point, button: MouseButton },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => position,
        }
    }

    /// Primary-button press at `position`.
    pub fn press(position: Point) -> Self {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
        }
    }

    /// Primary-button release at `position`.
    pub fn release(position: Point) -> Self {
        PointerEvent::Up {
            position,
            button: MouseButton::Left,
        }
    }
}

/// Anything that can own the pointer during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureTarget {
    HueWheel,
    SatValBox,
    Canvas,
}

/// The single active drag owner.
///
/// A target acquires capture on primary press and keeps it until release or
/// capture loss. While one target owns capture, events addressed to any other
/// target are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerCapture {
    owner: Option<CaptureTarget>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<CaptureTarget> {
        self.owner
    }

    pub fn is_captured_by(&self, target: CaptureTarget) -> bool {
        self.owner == Some(target)
    }

    /// Claim capture. Fails if another target already holds it.
    pub fn acquire(&mut self, target: CaptureTarget) -> bool {
        match self.owner {
            Some(owner) if owner != target => false,
            _ => {
                self.owner = Some(target);
                true
            }
        }
    }

    /// Release capture held by `target`. Returns true if it was the owner.
    pub fn release(&mut self, target: CaptureTarget) -> bool {
        if self.owner == Some(target) {
            self.owner = None;
            true
        } else {
            false
        }
    }

    /// Drop capture regardless of owner, returning who lost it.
    pub fn lose(&mut self) -> Option<CaptureTarget> {
        self.owner.take()
    }

    /// Whether an event for `target` should be delivered at all.
    pub fn admits(&self, target: CaptureTarget) -> bool {
        self.owner.is_none_or(|owner| owner == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_is_exclusive() {
        let mut capture = PointerCapture::new();
        assert!(capture.acquire(CaptureTarget::HueWheel));
        assert!(!capture.acquire(CaptureTarget::SatValBox));
        assert!(capture.acquire(CaptureTarget::HueWheel));
        assert!(capture.admits(CaptureTarget::HueWheel));
        assert!(!capture.admits(CaptureTarget::Canvas));
    }

    #[test]
    fn test_release_only_by_owner() {
        let mut capture = PointerCapture::new();
        capture.acquire(CaptureTarget::Canvas);
        assert!(!capture.release(CaptureTarget::HueWheel));
        assert!(capture.release(CaptureTarget::Canvas));
        assert_eq!(capture.owner(), None);
        assert!(capture.admits(CaptureTarget::SatValBox));
    }

    #[test]
    fn test_lose() {
        let mut capture = PointerCapture::new();
        capture.acquire(CaptureTarget::SatValBox);
        assert_eq!(capture.lose(), Some(CaptureTarget::SatValBox));
        assert_eq!(capture.lose(), None);
    }

    #[test]
    fn test_event_position() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(PointerEvent::press(p).position(), p);
        assert_eq!(PointerEvent::Move { position: p }.position(), p);
        assert_eq!(PointerEvent::release(p).position(), p);
    }
}
