//! Color value type and HSV/RGB conversion.
//!
//! Conversions deliberately truncate toward zero when producing 8-bit
//! channels, so `hsv_to_rgb(h, s, v)` is never brighter than the exact result.

use serde::{Deserialize, Serialize};

/// An ARGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::argb(0, 255, 255, 255);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Create a color from all four channels.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Same RGB channels with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Opaque color for an HSV triple.
    pub fn from_hsv(hsv: Hsv) -> Self {
        let (r, g, b) = hsv_to_rgb(hsv.hue, hsv.saturation, hsv.value);
        Self::rgb(r, g, b)
    }

    /// HSV decomposition of the RGB channels (alpha is ignored).
    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self)
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Format as `#AARRGGBB`, or `#RRGGBB` when opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for peniko::Color {
    fn from(color: Color) -> Self {
        peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        let rgba = color.to_rgba8();
        Self::argb(rgba.a, rgba.r, rgba.g, rgba.b)
    }
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Hsv {
    pub const fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}

/// Six-sector HSV to RGB conversion with truncating 8-bit output.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let sector = h / 60.0;
    let floor = sector.floor();
    let f = sector - floor;
    let hi = (floor as i64).rem_euclid(6);

    // `as u8` truncates and saturates, so out-of-range inputs clamp to 0..=255.
    let v1 = (v * 255.0) as u8;
    let p = (v * (1.0 - s) * 255.0) as u8;
    let q = (v * (1.0 - f * s) * 255.0) as u8;
    let t = (v * (1.0 - (1.0 - f) * s) * 255.0) as u8;

    match hi {
        0 => (v1, t, p),
        1 => (q, v1, p),
        2 => (p, v1, t),
        3 => (p, q, v1),
        4 => (t, p, v1),
        _ => (v1, p, q),
    }
}

/// Max/min channel decomposition. Black and grays report hue 0.
pub fn rgb_to_hsv(color: Color) -> Hsv {
    let r = color.r as f64 / 255.0;
    let g = color.g as f64 / 255.0;
    let b = color.b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if max == 0.0 {
        return Hsv::new(0.0, 0.0, 0.0);
    }
    let delta = max - min;
    let saturation = delta / max;
    if saturation == 0.0 {
        return Hsv::new(0.0, 0.0, max);
    }

    let mut hue = if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if hue < 0.0 {
        hue += 360.0;
    }
    if hue >= 360.0 {
        hue -= 360.0;
    }

    Hsv::new(hue, saturation, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), (0, 0, 255));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), (0, 0, 255));
    }

    #[test]
    fn test_truncation_not_rounding() {
        // 0.5 * 255 = 127.5 truncates to 127
        assert_eq!(hsv_to_rgb(0.0, 0.0, 0.5), (127, 127, 127));
    }

    #[test]
    fn test_black_and_gray() {
        let black = rgb_to_hsv(Color::BLACK);
        assert_eq!(black, Hsv::new(0.0, 0.0, 0.0));

        let gray = rgb_to_hsv(Color::rgb(128, 128, 128));
        assert_eq!(gray.hue, 0.0);
        assert_eq!(gray.saturation, 0.0);
        assert!((gray.value - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_to_hsv_branches() {
        let red = rgb_to_hsv(Color::RED);
        assert!((red.hue - 0.0).abs() < 1e-9);
        let green = rgb_to_hsv(Color::rgb(0, 255, 0));
        assert!((green.hue - 120.0).abs() < 1e-9);
        let blue = rgb_to_hsv(Color::rgb(0, 0, 255));
        assert!((blue.hue - 240.0).abs() < 1e-9);
        let magenta_ish = rgb_to_hsv(Color::rgb(255, 0, 128));
        assert!(magenta_ish.hue > 300.0 && magenta_ish.hue < 360.0);
    }

    #[test]
    fn test_hsv_recovered_within_quantization() {
        for hue in (0..360).step_by(7) {
            for &(s, v) in &[(1.0, 1.0), (0.5, 0.8), (0.25, 0.6), (0.9, 0.3)] {
                let h = hue as f64;
                let (r, g, b) = hsv_to_rgb(h, s, v);
                let back = rgb_to_hsv(Color::rgb(r, g, b));
                let mut dh = (back.hue - h).abs();
                if dh > 180.0 {
                    dh = 360.0 - dh;
                }
                // Hue error grows as chroma shrinks; one step of 255 * v * s.
                let tolerance = 360.0 / (6.0 * 255.0 * v * s) * 6.0;
                assert!(dh <= tolerance, "hue {h} came back as {}", back.hue);
                assert!((back.saturation - s).abs() < 0.05, "s {s} -> {}", back.saturation);
                assert!((back.value - v).abs() < 0.01, "v {v} -> {}", back.value);
            }
        }
    }

    #[test]
    fn test_hex_roundtrip_and_invalid() {
        assert_eq!(Color::from_hex("#FF8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(Color::from_hex("#80FF8000"), Some(Color::argb(128, 255, 128, 0)));
        assert_eq!(Color::from_hex("FF8000"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::rgb(1, 2, 3).to_hex(), "#010203");
        assert_eq!(Color::argb(4, 1, 2, 3).to_hex(), "#04010203");
    }

    #[test]
    fn test_peniko_conversion() {
        let color = Color::argb(200, 10, 20, 30);
        let p: peniko::Color = color.into();
        assert_eq!(Color::from(p), color);
    }
}
