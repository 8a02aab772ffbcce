//! InkWheel Core Library
//!
//! Platform-agnostic model for the InkWheel drawing app: color math, the HSV
//! picker controls and their synchronization, the palette, settings storage,
//! shapes, tools and export.

pub mod canvas;
pub mod color;
pub mod display;
pub mod export;
pub mod input;
pub mod notice;
pub mod palette;
pub mod picker;
pub mod property;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use canvas::{Canvas, Drawing};
pub use color::{Color, Hsv, hsv_to_rgb, rgb_to_hsv};
pub use display::{Brush, DisplayItem, DisplayList, LinearGradient};
pub use export::{ExportError, ExportFormat, ExportResult, RasterImage};
pub use input::{CaptureTarget, Modifiers, MouseButton, PointerCapture, PointerEvent};
pub use notice::{Notice, NoticeKind};
pub use palette::{PALETTE_SIZE, Palette};
pub use picker::{ColorPicker, HueWheel, SatValBox};
pub use storage::{
    FileSettingsStore, MemorySettingsStore, Settings, SettingsStore, StorageError, StorageResult,
};
pub use tools::{ToolKind, ToolManager};
