//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use inkwheel_core::canvas::{Canvas, Drawing};
use inkwheel_core::shapes::Shape;
use kurbo::{Affine, Cap, Join, Rect, Size, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel dimensions of a bitmap export of `canvas`.
pub fn export_size(canvas: &Canvas) -> (u32, u32) {
    let size = canvas.viewport_size();
    (size.width.round() as u32, size.height.round() as u32)
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Build a scene for bitmap export: white background and every shape, at
    /// one pixel per canvas unit. The target texture bounds the output.
    pub fn build_export_scene(&mut self, drawing: &Drawing, size: Size) -> Scene {
        self.scene.reset();
        let bounds = Rect::from_origin_size((0.0, 0.0), size);
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, Color::WHITE, None, &bounds);
        for shape in drawing.shapes() {
            self.render_shape(shape, Affine::IDENTITY);
        }
        std::mem::take(&mut self.scene)
    }

    /// Stroke a shape's outline with its style.
    fn render_shape(&mut self, shape: &Shape, transform: Affine) {
        let style = shape.style();
        let stroke = Stroke::new(style.stroke_width)
            .with_caps(Cap::Round)
            .with_join(Join::Round);
        let color: Color = style.stroke_color.into();
        self.scene
            .stroke(&stroke, transform, color, None, &shape.to_path());
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        let transform = ctx.transform();

        for shape in ctx.canvas.drawing.shapes() {
            self.render_shape(shape, transform);
        }

        // Shape being dragged out right now
        if let Some(preview) = ctx.canvas.preview() {
            self.render_shape(&preview, transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwheel_core::shapes::{Line, Rectangle};
    use kurbo::Point;

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_shapes() {
        let mut renderer = VelloRenderer::new();
        let mut canvas = Canvas::new();
        canvas.set_viewport_size(800.0, 600.0);

        let rect = Rectangle::new(Point::new(100.0, 100.0), 200.0, 150.0);
        canvas.drawing.add_shape(Shape::Rectangle(rect));

        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0));
        renderer.build_scene(&ctx);
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_export_scene_has_background_even_when_empty() {
        let mut renderer = VelloRenderer::new();
        let scene = renderer.build_export_scene(&Drawing::new(), Size::new(10.0, 10.0));
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_export_size_rounds_viewport() {
        let mut canvas = Canvas::new();
        canvas.set_viewport_size(640.4, 479.6);
        assert_eq!(export_size(&canvas), (640, 480));

        canvas
            .drawing
            .add_shape(Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0))));
        canvas.set_viewport_size(0.0, 100.0);
        assert_eq!(export_size(&canvas), (0, 100));
    }
}
