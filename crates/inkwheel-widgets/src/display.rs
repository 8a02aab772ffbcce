//! Painting core display lists with the egui painter.
//!
//! Picker controls describe themselves in local units (a 300 unit wheel, a
//! 256 unit square). `LocalFrame` scales that space onto whatever screen rect
//! egui allocated, and gradients become vertex-colored meshes.

use egui::epaint::Mesh;
use egui::{Color32, Painter, Pos2, Rect, Stroke};
use inkwheel_core::{Brush, DisplayItem, DisplayList, LinearGradient};
use kurbo::{BezPath, PathEl, Point};

use crate::colors::to_color32;

/// Flattening tolerance in local units.
const FLATTEN_TOLERANCE: f64 = 0.1;
/// Grid resolution for gradients with more than two stops.
const MULTI_STOP_GRID: usize = 16;

/// Maps a control's local coordinates onto a screen rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    origin: Pos2,
    scale: f32,
}

impl LocalFrame {
    /// Fit a square local space of side `local_size` into `rect`.
    pub fn fit(rect: Rect, local_size: f64) -> Self {
        let side = rect.width().min(rect.height());
        Self {
            origin: rect.min,
            scale: side / local_size as f32,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_screen(&self, point: Point) -> Pos2 {
        Pos2::new(
            self.origin.x + point.x as f32 * self.scale,
            self.origin.y + point.y as f32 * self.scale,
        )
    }

    pub fn to_local(&self, pos: Pos2) -> Point {
        Point::new(
            ((pos.x - self.origin.x) / self.scale) as f64,
            ((pos.y - self.origin.y) / self.scale) as f64,
        )
    }
}

/// Paint every item of `list`, back to front.
pub fn paint_display_list(painter: &Painter, frame: LocalFrame, list: &DisplayList) {
    for item in list.items() {
        match item {
            DisplayItem::FillPath { path, brush } => {
                for polygon in flatten_polygons(path) {
                    painter.add(egui::Shape::mesh(fan_mesh(&polygon, frame, brush)));
                }
            }
            DisplayItem::FillRect { rect, brush } => {
                painter.add(egui::Shape::mesh(rect_mesh(*rect, frame, brush)));
            }
            DisplayItem::StrokeCircle {
                center,
                radius,
                width,
                color,
            } => {
                painter.circle_stroke(
                    frame.to_screen(*center),
                    *radius as f32 * frame.scale,
                    Stroke::new(*width as f32, to_color32(*color)),
                );
            }
        }
    }
}

/// Split a path into flattened closed polygons, one per subpath.
fn flatten_polygons(path: &BezPath) -> Vec<Vec<Point>> {
    let mut polygons = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    kurbo::flatten(path, FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            if current.len() >= 3 {
                polygons.push(std::mem::take(&mut current));
            }
            current.clear();
            current.push(p);
        }
        PathEl::LineTo(p) => current.push(p),
        PathEl::ClosePath => {
            if current.len() >= 3 {
                polygons.push(std::mem::take(&mut current));
            }
            current.clear();
        }
        _ => {}
    });
    if current.len() >= 3 {
        polygons.push(current);
    }
    polygons
}

/// Position along the gradient axis, unclamped.
fn gradient_t(gradient: &LinearGradient, point: Point) -> f64 {
    let axis = gradient.end - gradient.start;
    let len2 = axis.hypot2();
    if len2 <= f64::EPSILON {
        return 0.0;
    }
    (point - gradient.start).dot(axis) / len2
}

fn brush_color(brush: &Brush, point: Point) -> Color32 {
    match brush {
        Brush::Solid(color) => to_color32(*color),
        Brush::Linear(gradient) => to_color32(gradient.sample(gradient_t(gradient, point))),
    }
}

/// Triangle fan over a polygon that is convex or nearly so.
fn fan_mesh(polygon: &[Point], frame: LocalFrame, brush: &Brush) -> Mesh {
    let mut mesh = Mesh::default();
    for &point in polygon {
        mesh.colored_vertex(frame.to_screen(point), brush_color(brush, point));
    }
    for i in 1..polygon.len() as u32 - 1 {
        mesh.add_triangle(0, i, i + 1);
    }
    mesh
}

/// Rectangle mesh. Two-stop gradients interpolate exactly across one quad;
/// anything else is sampled on a grid.
fn rect_mesh(rect: kurbo::Rect, frame: LocalFrame, brush: &Brush) -> Mesh {
    let cells = match brush {
        Brush::Linear(gradient) if gradient.stops.len() > 2 => MULTI_STOP_GRID,
        _ => 1,
    };
    let mut mesh = Mesh::default();
    let step_x = rect.width() / cells as f64;
    let step_y = rect.height() / cells as f64;
    for row in 0..=cells {
        for col in 0..=cells {
            let point = Point::new(rect.x0 + col as f64 * step_x, rect.y0 + row as f64 * step_y);
            mesh.colored_vertex(frame.to_screen(point), brush_color(brush, point));
        }
    }
    let stride = cells as u32 + 1;
    for row in 0..cells as u32 {
        for col in 0..cells as u32 {
            let i = row * stride + col;
            mesh.add_triangle(i, i + 1, i + stride);
            mesh.add_triangle(i + 1, i + stride + 1, i + stride);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;
    use inkwheel_core::Color;

    #[test]
    fn test_local_frame_round_trip() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), vec2(150.0, 150.0));
        let frame = LocalFrame::fit(rect, 300.0);
        assert_eq!(frame.scale(), 0.5);
        assert_eq!(frame.to_screen(Point::new(300.0, 0.0)), Pos2::new(160.0, 20.0));
        assert_eq!(frame.to_local(Pos2::new(85.0, 95.0)), Point::new(150.0, 150.0));
    }

    #[test]
    fn test_flatten_polygons_per_subpath() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        path.close_path();
        path.move_to((20.0, 0.0));
        path.line_to((30.0, 0.0));
        path.line_to((30.0, 10.0));
        path.line_to((20.0, 10.0));
        path.close_path();
        let polygons = flatten_polygons(&path);
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].len(), 3);
        assert_eq!(polygons[1].len(), 4);
    }

    #[test]
    fn test_gradient_rect_corners() {
        let gradient = LinearGradient::new(
            Point::ZERO,
            Point::new(0.0, 100.0),
            Color::BLACK.with_alpha(0),
            Color::BLACK,
        );
        let frame = LocalFrame::fit(Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0)), 100.0);
        let mesh = rect_mesh(
            kurbo::Rect::new(0.0, 0.0, 100.0, 100.0),
            frame,
            &Brush::Linear(gradient),
        );
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.vertices[0].color, Color32::TRANSPARENT);
        assert_eq!(mesh.vertices[3].color, Color32::BLACK);
    }

    #[test]
    fn test_fan_mesh_triangles() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let frame = LocalFrame::fit(Rect::from_min_size(Pos2::ZERO, vec2(1.0, 1.0)), 1.0);
        let mesh = fan_mesh(&square, frame, &Brush::Solid(Color::RED));
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert!(mesh.vertices.iter().all(|v| v.color == Color32::RED));
    }
}
