//! Native save and open dialogs, and writing drawings to disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use inkwheel_core::export::{
    check_canvas_size, encode_ink, encode_raster, read_ink, write_file,
};
use inkwheel_core::{Canvas, ExportError, ExportFormat, ExportResult, Notice, RasterImage};
use inkwheel_render::export_size;

/// Ask the user where to save. Filters list every export format.
pub fn pick_save_path() -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save Drawing")
        .set_file_name("drawing.png");
    for format in ExportFormat::ALL {
        dialog = dialog.add_filter(format.filter_name(), format.extensions());
    }
    dialog.save_file()
}

/// Ask the user for an ink document to open.
pub fn pick_open_path() -> Option<PathBuf> {
    let format = ExportFormat::Ink;
    rfd::FileDialog::new()
        .set_title("Open Drawing")
        .add_filter(format.filter_name(), format.extensions())
        .pick_file()
}

/// Format implied by the path. Paths without a known extension get `.png`.
fn resolve_format(path: &Path) -> (PathBuf, ExportFormat) {
    match ExportFormat::from_path(path) {
        Some(format) => (path.to_path_buf(), format),
        None => {
            let mut name = OsString::from(path.as_os_str());
            name.push(".png");
            (PathBuf::from(name), ExportFormat::Png)
        }
    }
}

/// Save the drawing to `path` and describe the outcome.
///
/// `rasterize` renders the canvas at the given pixel size and is only called
/// for bitmap formats, after the size has been checked.
pub fn save_drawing<F>(path: &Path, canvas: &Canvas, rasterize: F) -> Notice
where
    F: FnOnce(u32, u32) -> ExportResult<RasterImage>,
{
    let (path, format) = resolve_format(path);
    match write_drawing(&path, format, canvas, rasterize) {
        Ok(()) => {
            log::info!("Saved drawing to {} as {:?}", path.display(), format);
            Notice::info("Success", "Drawing saved successfully!")
        }
        Err(ExportError::EmptyCanvas) => {
            log::warn!("Refusing to export an empty canvas");
            Notice::warning("Warning", "Canvas is empty or has invalid size.")
        }
        Err(e) => {
            log::error!("Failed to save {}: {}", path.display(), e);
            Notice::error("Error", format!("Failed to save: {}", e))
        }
    }
}

fn write_drawing<F>(path: &Path, format: ExportFormat, canvas: &Canvas, rasterize: F) -> ExportResult<()>
where
    F: FnOnce(u32, u32) -> ExportResult<RasterImage>,
{
    let bytes = if format.is_raster() {
        let (width, height) = export_size(canvas);
        check_canvas_size(width, height)?;
        let image = rasterize(width, height)?;
        encode_raster(format, &image)?
    } else {
        encode_ink(&canvas.drawing)?
    };
    write_file(path, &bytes)
}

/// Load an ink document into the canvas. Returns an error notice on failure.
pub fn open_drawing(path: &Path, canvas: &mut Canvas) -> Option<Notice> {
    match read_ink(path) {
        Ok(drawing) => {
            log::info!("Opened {} ({} shapes)", path.display(), drawing.len());
            canvas.load(drawing);
            None
        }
        Err(e) => {
            log::error!("Failed to open {}: {}", path.display(), e);
            Some(Notice::error("Error", format!("Failed to open: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwheel_core::{NoticeKind, PointerCapture, PointerEvent};
    use kurbo::Point;
    use tempfile::tempdir;

    fn white(width: u32, height: u32) -> ExportResult<RasterImage> {
        RasterImage::new(width, height, vec![255; width as usize * height as usize * 4])
    }

    fn canvas_with_stroke() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.set_viewport_size(40.0, 30.0);
        let mut capture = PointerCapture::new();
        canvas.route_pointer(&mut capture, PointerEvent::press(Point::new(1.0, 1.0)));
        canvas.route_pointer(&mut capture, PointerEvent::release(Point::new(20.0, 20.0)));
        canvas
    }

    #[test]
    fn test_png_save_uses_canvas_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let canvas = canvas_with_stroke();
        let mut requested = None;
        let notice = save_drawing(&path, &canvas, |w, h| {
            requested = Some((w, h));
            white(w, h)
        });
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.message, "Drawing saved successfully!");
        assert_eq!(requested, Some((40, 30)));
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn test_zero_size_canvas_warns_without_rendering() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let canvas = Canvas::new();
        let notice = save_drawing(&path, &canvas, |_, _| panic!("must not render"));
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.message, "Canvas is empty or has invalid size.");
        assert!(!path.exists());
    }

    #[test]
    fn test_render_failure_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let canvas = canvas_with_stroke();
        let notice = save_drawing(&path, &canvas, |_, _| {
            Err(ExportError::Render("device lost".to_string()))
        });
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.starts_with("Failed to save: "));
        assert!(notice.message.contains("device lost"));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_extension_defaults_to_png() {
        let (path, format) = resolve_format(Path::new("/tmp/sketch"));
        assert_eq!(format, ExportFormat::Png);
        assert_eq!(path, PathBuf::from("/tmp/sketch.png"));
        let (_, format) = resolve_format(Path::new("a.JPEG"));
        assert_eq!(format, ExportFormat::Jpeg);
    }

    #[test]
    fn test_ink_save_and_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.ink");
        let canvas = canvas_with_stroke();
        let notice = save_drawing(&path, &canvas, |_, _| panic!("ink is not rasterized"));
        assert_eq!(notice.kind, NoticeKind::Info);

        let mut reopened = Canvas::new();
        assert!(open_drawing(&path, &mut reopened).is_none());
        assert_eq!(reopened.drawing, canvas.drawing);
    }

    #[test]
    fn test_open_garbage_reports_error_and_keeps_canvas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.ink");
        std::fs::write(&path, "not json").unwrap();
        let mut canvas = canvas_with_stroke();
        let before = canvas.drawing.clone();
        let notice = open_drawing(&path, &mut canvas).unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(canvas.drawing, before);
    }
}
