//! The persisted 10-slot quick-access palette.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Number of palette slots.
pub const PALETTE_SIZE: usize = 10;

/// Built-in palette, in slot order.
pub const DEFAULT_PALETTE: [Color; PALETTE_SIZE] = [
    Color::rgb(255, 0, 0),     // Red
    Color::rgb(0, 128, 0),     // Green
    Color::rgb(0, 0, 255),     // Blue
    Color::rgb(255, 255, 0),   // Yellow
    Color::rgb(128, 0, 128),   // Purple
    Color::rgb(0, 255, 255),   // Cyan
    Color::rgb(255, 0, 255),   // Magenta
    Color::rgb(255, 165, 0),   // Orange
    Color::rgb(165, 42, 42),   // Brown
    Color::rgb(128, 128, 128), // Gray
];

/// Display names for the built-in colors.
pub const DEFAULT_NAMES: [&str; PALETTE_SIZE] = [
    "Red", "Green", "Blue", "Yellow", "Purple", "Cyan", "Magenta", "Orange", "Brown", "Gray",
];

/// Exactly ten colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: [Color; PALETTE_SIZE],
}

impl Palette {
    /// Restore from saved colors, falling back to the defaults when the saved
    /// set is missing or has the wrong size.
    pub fn from_saved(saved: Option<&[Color]>) -> Self {
        match saved.and_then(|colors| <[Color; PALETTE_SIZE]>::try_from(colors).ok()) {
            Some(colors) => Self { colors },
            None => {
                if let Some(colors) = saved {
                    log::warn!(
                        "Saved palette has {} colors, expected {}; using defaults",
                        colors.len(),
                        PALETTE_SIZE
                    );
                }
                Self::default()
            }
        }
    }

    pub fn get(&self, slot: usize) -> Option<Color> {
        self.colors.get(slot).copied()
    }

    /// Overwrite one slot. Returns false for an out-of-range slot.
    pub fn set(&mut self, slot: usize, color: Color) -> bool {
        match self.colors.get_mut(slot) {
            Some(entry) => {
                *entry = color;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.colors = DEFAULT_PALETTE;
    }

    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.colors
    }

    pub fn to_vec(&self) -> Vec<Color> {
        self.colors.to_vec()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_in_order() {
        let palette = Palette::default();
        assert_eq!(palette.get(0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(palette.get(7), Some(Color::rgb(255, 165, 0)));
        assert_eq!(palette.get(9), Some(Color::rgb(128, 128, 128)));
        assert_eq!(palette.get(10), None);
    }

    #[test]
    fn test_from_saved_wrong_size_falls_back() {
        let short = vec![Color::BLACK; 3];
        assert_eq!(Palette::from_saved(Some(&short)), Palette::default());
        assert_eq!(Palette::from_saved(None), Palette::default());
    }

    #[test]
    fn test_from_saved_exact_size() {
        let saved = vec![Color::WHITE; PALETTE_SIZE];
        let palette = Palette::from_saved(Some(&saved));
        assert!(palette.colors().iter().all(|c| *c == Color::WHITE));
    }

    #[test]
    fn test_set_and_reset() {
        let mut palette = Palette::default();
        assert!(palette.set(3, Color::BLACK));
        assert!(!palette.set(PALETTE_SIZE, Color::BLACK));
        assert_eq!(palette.get(3), Some(Color::BLACK));
        palette.reset();
        assert_eq!(palette, Palette::default());
    }
}
