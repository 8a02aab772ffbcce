//! Color swatches, the current-color button and the preview box.

use egui::{vec2, Color32, CornerRadius, CursorIcon, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2};
use inkwheel_core::{Color, Hsv};

use crate::{sizing, theme};

/// Convert a core color (straight alpha) to egui.
pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Check if two colors match (for selection highlighting).
pub fn colors_match(a: Color, b: Color) -> bool {
    a.r == b.r && a.g == b.g && a.b == b.b
}

/// Fully saturated color for a hue in degrees, quantized like the picker wheel.
fn hue_color(hue: f64) -> Color32 {
    to_color32(Color::from_hsv(Hsv::new(hue, 1.0, 1.0)))
}

/// Paint a checkerboard so translucent colors read as translucent.
fn paint_checkerboard(ui: &Ui, rect: Rect, cell: f32) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, CornerRadius::ZERO, theme::CHECKER_LIGHT);
    let cols = (rect.width() / cell).ceil() as usize;
    let rows = (rect.height() / cell).ceil() as usize;
    for row in 0..rows {
        for col in (row % 2..cols).step_by(2) {
            let min = rect.min + vec2(col as f32 * cell, row as f32 * cell);
            painter.rect_filled(
                Rect::from_min_size(min, vec2(cell, cell)),
                CornerRadius::ZERO,
                theme::CHECKER_DARK,
            );
        }
    }
}

/// Style for color swatches.
#[derive(Clone)]
pub struct ColorSwatchStyle {
    /// Size of the swatch
    pub size: Vec2,
    /// Whether to show as circle (true) or rounded rect (false)
    pub circular: bool,
    /// Selection indicator style
    pub selection_style: SelectionStyle,
}

/// How to indicate selection on a color swatch.
#[derive(Clone, Copy, PartialEq)]
pub enum SelectionStyle {
    /// No selection indicator
    None,
    /// Inner offset ring
    InnerRing,
    /// Outer border
    OuterBorder,
}

impl Default for ColorSwatchStyle {
    fn default() -> Self {
        Self {
            size: vec2(sizing::SMALL, sizing::SMALL),
            circular: true,
            selection_style: SelectionStyle::InnerRing,
        }
    }
}

impl ColorSwatchStyle {
    /// Square palette slot.
    pub fn palette() -> Self {
        Self {
            size: vec2(sizing::SWATCH, sizing::SWATCH),
            circular: false,
            selection_style: SelectionStyle::OuterBorder,
        }
    }
}

/// A clickable color swatch.
pub struct ColorSwatch<'a> {
    color: Color,
    tooltip: &'a str,
    selected: bool,
    style: ColorSwatchStyle,
}

impl<'a> ColorSwatch<'a> {
    /// Create a new color swatch.
    pub fn new(color: Color, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
            style: ColorSwatchStyle::default(),
        }
    }

    /// Set whether this swatch is selected.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set the style.
    pub fn style(mut self, style: ColorSwatchStyle) -> Self {
        self.style = style;
        self
    }

    /// Show the swatch and return (clicked, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let (rect, response) = ui.allocate_exact_size(self.style.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let fill = to_color32(self.color);
            let center = rect.center();
            let radius = rect.width().min(rect.height()) / 2.0;

            if self.style.circular {
                ui.painter().circle_filled(center, radius, fill);
                match self.style.selection_style {
                    SelectionStyle::InnerRing if self.selected => {
                        ui.painter().circle_stroke(
                            center,
                            radius - 3.0,
                            Stroke::new(2.0, Color32::from_gray(30)),
                        );
                    }
                    SelectionStyle::OuterBorder if self.selected => {
                        ui.painter()
                            .circle_stroke(center, radius, Stroke::new(2.0, theme::ACCENT));
                    }
                    _ => {}
                }
            } else {
                let corner = CornerRadius::same(sizing::CORNER_RADIUS);
                if self.color.a < 255 {
                    paint_checkerboard(ui, rect, 6.0);
                }
                ui.painter().rect_filled(rect, corner, fill);
                let border = if self.selected && self.style.selection_style != SelectionStyle::None {
                    Stroke::new(2.0, theme::ACCENT)
                } else if response.hovered() {
                    Stroke::new(1.0, Color32::from_gray(120))
                } else {
                    Stroke::new(1.0, theme::BORDER)
                };
                ui.painter().rect_stroke(rect, corner, border, StrokeKind::Inside);
            }
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        (clicked, rect)
    }
}

/// A color swatch ringed by a hue wheel, used as the "current color" button.
pub struct ColorSwatchWithWheel<'a> {
    color: Color,
    tooltip: &'a str,
    size: Vec2,
}

impl<'a> ColorSwatchWithWheel<'a> {
    /// Create a new color swatch with hue wheel.
    pub fn new(color: Color, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            size: vec2(sizing::MEDIUM, sizing::MEDIUM),
        }
    }

    /// Set the size.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Show the swatch and return (clicked, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let center = rect.center();
            let outer_radius = rect.width().min(rect.height()) / 2.0;
            let ring_width = 4.0;
            let inner_radius = outer_radius - ring_width;

            let num_segments = 36;
            for i in 0..num_segments {
                let angle1 = (i as f32 / num_segments as f32) * std::f32::consts::TAU;
                let angle2 = ((i + 1) as f32 / num_segments as f32) * std::f32::consts::TAU;
                let at = |radius: f32, angle: f32| {
                    Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                };

                ui.painter().add(egui::Shape::convex_polygon(
                    vec![
                        at(outer_radius, angle1),
                        at(outer_radius, angle2),
                        at(inner_radius, angle2),
                        at(inner_radius, angle1),
                    ],
                    hue_color(i as f64 * 360.0 / num_segments as f64),
                    Stroke::NONE,
                ));
            }

            ui.painter()
                .circle_filled(center, inner_radius, Color32::WHITE);
            ui.painter()
                .circle_filled(center, inner_radius - 1.5, to_color32(self.color));
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        (clicked, rect)
    }
}

/// Read-only box showing a color over a checkerboard.
pub struct ColorPreview {
    color: Color,
    size: Vec2,
}

impl ColorPreview {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            size: vec2(64.0, 40.0),
        }
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn show(self, ui: &mut Ui) -> Rect {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::hover());
        if ui.is_rect_visible(rect) {
            paint_checkerboard(ui, rect, 8.0);
            ui.painter()
                .rect_filled(rect, CornerRadius::ZERO, to_color32(self.color));
            ui.painter().rect_stroke(
                rect,
                CornerRadius::ZERO,
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Inside,
            );
        }
        response.on_hover_text(self.color.to_hex());
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color32_keeps_straight_alpha() {
        assert_eq!(to_color32(Color::rgb(10, 20, 30)), Color32::from_rgb(10, 20, 30));
        let translucent = to_color32(Color::argb(128, 255, 0, 0));
        assert_eq!(translucent.a(), 128);
        assert_eq!(to_color32(Color::BLACK.with_alpha(0)), Color32::TRANSPARENT);
    }

    #[test]
    fn test_colors_match_ignores_alpha() {
        assert!(colors_match(Color::RED, Color::RED.with_alpha(10)));
        assert!(!colors_match(Color::RED, Color::BLACK));
    }

    #[test]
    fn test_hue_color_matches_core_conversion() {
        assert_eq!(hue_color(0.0), Color32::from_rgb(255, 0, 0));
        assert_eq!(hue_color(120.0), Color32::from_rgb(0, 255, 0));
        assert_eq!(hue_color(240.0), Color32::from_rgb(0, 0, 255));
        for hue in [10.0, 50.0, 170.0, 290.0] {
            let (r, g, b) = inkwheel_core::hsv_to_rgb(hue, 1.0, 1.0);
            assert_eq!(hue_color(hue), Color32::from_rgb(r, g, b));
        }
    }
}
