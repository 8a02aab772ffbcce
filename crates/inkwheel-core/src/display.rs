//! Immediate-mode display lists for picker controls.
//!
//! Controls never keep a retained visual tree. Every state change rebuilds a
//! `DisplayList` from the current model, and the UI layer paints it as-is.

use crate::color::Color;
use kurbo::{BezPath, Point, Rect};

/// A linear gradient between two points in local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    /// Offsets in `[0, 1]` with their colors, sorted by offset.
    pub stops: Vec<(f64, Color)>,
}

impl LinearGradient {
    /// Two-stop gradient.
    pub fn new(start: Point, end: Point, from: Color, to: Color) -> Self {
        Self {
            start,
            end,
            stops: vec![(0.0, from), (1.0, to)],
        }
    }

    /// Color at parameter `t` along the gradient axis, channel-wise lerp.
    pub fn sample(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let Some(first) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first.0 {
            return first.1;
        }
        for pair in self.stops.windows(2) {
            let (o0, c0) = pair[0];
            let (o1, c1) = pair[1];
            if t <= o1 {
                let span = o1 - o0;
                let k = if span > f64::EPSILON { (t - o0) / span } else { 1.0 };
                let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * k).round() as u8;
                return Color::argb(lerp(c0.a, c1.a), lerp(c0.r, c1.r), lerp(c0.g, c1.g), lerp(c0.b, c1.b));
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

/// How a display item is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Solid(Color),
    Linear(LinearGradient),
}

/// A single drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
    /// Fill a closed path.
    FillPath { path: BezPath, brush: Brush },
    /// Fill an axis-aligned rectangle.
    FillRect { rect: Rect, brush: Brush },
    /// Outline a circle.
    StrokeCircle {
        center: Point,
        radius: f64,
        width: f64,
        color: Color,
    },
}

/// Ordered drawing commands, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    items: Vec<DisplayItem>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: DisplayItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Circles drawn as markers (stroke-only circles).
    pub fn markers(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::StrokeCircle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_sample_endpoints_and_middle() {
        let g = LinearGradient::new(Point::ZERO, Point::new(0.0, 1.0), Color::WHITE, Color::BLACK);
        assert_eq!(g.sample(0.0), Color::WHITE);
        assert_eq!(g.sample(1.0), Color::BLACK);
        assert_eq!(g.sample(0.5), Color::rgb(128, 128, 128));
        assert_eq!(g.sample(-3.0), Color::WHITE);
    }

    #[test]
    fn test_markers_filter() {
        let mut list = DisplayList::new();
        list.push(DisplayItem::FillRect {
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            brush: Brush::Solid(Color::RED),
        });
        list.push(DisplayItem::StrokeCircle {
            center: Point::new(3.0, 4.0),
            radius: 6.0,
            width: 2.0,
            color: Color::WHITE,
        });
        let markers: Vec<_> = list.markers().collect();
        assert_eq!(markers, vec![(Point::new(3.0, 4.0), 6.0)]);
    }
}
