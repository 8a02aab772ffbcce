//! Saving drawings as images or ink documents.

use crate::canvas::Drawing;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// JPEG quality used for exports.
pub const JPEG_QUALITY: u8 = 90;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Canvas is empty or has invalid size")]
    EmptyCanvas,
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("Render error: {0}")]
    Render(String),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// File formats a drawing can be saved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Ink,
}

impl ExportFormat {
    /// Save dialog order.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Ink];

    /// Name shown in file dialog filters.
    pub fn filter_name(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG Image",
            ExportFormat::Jpeg => "JPEG Image",
            ExportFormat::Ink => "Ink Document",
        }
    }

    /// File extensions, preferred first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ExportFormat::Png => &["png"],
            ExportFormat::Jpeg => &["jpg", "jpeg"],
            ExportFormat::Ink => &["ink"],
        }
    }

    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }

    /// Whether this format needs a rendered bitmap.
    pub fn is_raster(self) -> bool {
        !matches!(self, ExportFormat::Ink)
    }
}

/// Reject a zero-sized canvas before anything is rendered or encoded.
pub fn check_canvas_size(width: u32, height: u32) -> ExportResult<()> {
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCanvas);
    }
    Ok(())
}

/// Straight-alpha RGBA8 pixels, row-major without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RasterImage {
    /// Wrap a pixel buffer, checking its size against the dimensions.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> ExportResult<Self> {
        check_canvas_size(width, height)?;
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ExportError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// RGB pixels composited over white.
    pub fn to_rgb_over_white(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.rgba.len() / 4 * 3);
        for px in self.rgba.chunks_exact(4) {
            let a = px[3] as u32;
            for &c in &px[..3] {
                rgb.push(((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8);
            }
        }
        rgb
    }
}

/// Encode as PNG.
pub fn encode_png(image: &RasterImage) -> ExportResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| ExportError::Encode(format!("Failed to write PNG header: {}", e)))?;
        writer
            .write_image_data(&image.rgba)
            .map_err(|e| ExportError::Encode(format!("Failed to write PNG data: {}", e)))?;
    }
    Ok(png_data)
}

/// Encode as JPEG. JPEG has no alpha, so pixels are flattened onto white.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> ExportResult<Vec<u8>> {
    let rgb = image.to_rgb_over_white();
    let mut jpeg_data = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg_data, quality)
        .encode(&rgb, image.width, image.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| ExportError::Encode(format!("Failed to encode JPEG: {}", e)))?;
    Ok(jpeg_data)
}

/// Encode a bitmap in a raster format.
pub fn encode_raster(format: ExportFormat, image: &RasterImage) -> ExportResult<Vec<u8>> {
    match format {
        ExportFormat::Png => encode_png(image),
        ExportFormat::Jpeg => encode_jpeg(image, JPEG_QUALITY),
        ExportFormat::Ink => Err(ExportError::Encode(
            "Ink documents are not bitmaps".to_string(),
        )),
    }
}

/// Serialize a drawing as an ink document.
pub fn encode_ink(drawing: &Drawing) -> ExportResult<Vec<u8>> {
    drawing
        .to_json()
        .map(String::into_bytes)
        .map_err(|e| ExportError::Serialization(e.to_string()))
}

/// Read an ink document from disk.
pub fn read_ink(path: &Path) -> ExportResult<Drawing> {
    let json = fs::read_to_string(path)
        .map_err(|e| ExportError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    Drawing::from_json(&json).map_err(|e| {
        ExportError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write encoded bytes to `path`.
pub fn write_file(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    fs::write(path, bytes)
        .map_err(|e| ExportError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
