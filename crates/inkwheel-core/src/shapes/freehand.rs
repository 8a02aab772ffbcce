//! Freehand ink stroke.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand ink stroke (series of points), drawn smoothed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ShapeId,
    /// Points in input order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Stroke {
    /// Create a new empty stroke.
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            style,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style,
        }
    }

    /// Add a point, skipping exact repeats of the last one.
    pub fn add_point(&mut self, point: Point) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Catmull-Rom spline through `points`, as cubic Béziers.
///
/// A single point becomes a zero-length segment so round caps draw a dot.
pub fn smooth_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);
    if points.len() == 1 {
        path.line_to(first);
        return path;
    }

    let tension = 0.5;
    let last = points.len() - 1;
    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        let t1 = (p2 - p0) * tension;
        let t2 = (p3 - p1) * tension;
        path.curve_to(p1 + t1 / 3.0, p2 - t2 / 3.0, p2);
    }
    path
}

impl ShapeTrait for Stroke {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some(&first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(first, first), |rect, p| rect.union_pt(*p))
    }

    fn to_path(&self) -> BezPath {
        smooth_path(&self.points)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_stroke_creation() {
        let stroke = Stroke::new(ShapeStyle::default());
        assert!(stroke.is_empty());
        assert!(stroke.to_path().elements().is_empty());
    }

    #[test]
    fn test_add_points_skips_repeats() {
        let mut stroke = Stroke::new(ShapeStyle::default());
        stroke.add_point(Point::new(0.0, 0.0));
        stroke.add_point(Point::new(0.0, 0.0));
        stroke.add_point(Point::new(10.0, 10.0));
        assert_eq!(stroke.len(), 2);
    }

    #[test]
    fn test_bounds() {
        let stroke = Stroke::from_points(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
            ],
            ShapeStyle::default(),
        );

        let bounds = stroke.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_smooth_path_passes_through_points() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(20.0, 0.0),
        ];
        let path = smooth_path(&points);
        let elements = path.elements();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0], PathEl::MoveTo(points[0]));
        match elements[2] {
            PathEl::CurveTo(_, _, end) => assert_eq!(end, points[2]),
            other => panic!("unexpected element {other:?}"),
        }
    }

    #[test]
    fn test_single_point_is_a_dot() {
        let path = smooth_path(&[Point::new(3.0, 4.0)]);
        assert_eq!(path.elements().len(), 2);
    }
}
