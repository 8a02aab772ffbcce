//! egui widgets for the InkWheel toolbar and color picker.
//!
//! - **Buttons**: tool toggles and plain text buttons
//! - **Colors**: palette swatches, the current-color button and the preview
//! - **Display**: painting core display lists with the egui painter
//! - **Picker**: hue wheel and saturation/value views that report pointer events
//! - **Layout**: panel frames, separators and section labels

pub mod buttons;
pub mod colors;
pub mod display;
pub mod layout;
pub mod picker;

pub use buttons::{TextButton, ToggleButton};
pub use colors::{
    colors_match, to_color32, ColorPreview, ColorSwatch, ColorSwatchStyle,
    ColorSwatchWithWheel, SelectionStyle,
};
pub use display::{paint_display_list, LocalFrame};
pub use layout::{panel_frame, section_label, toolbar_frame, vertical_separator};
pub use picker::{to_modifiers, ControlView};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small swatch size
    pub const SMALL: f32 = 20.0;
    /// Medium button size (toolbar buttons)
    pub const MEDIUM: f32 = 28.0;
    /// Palette swatch size
    pub const SWATCH: f32 = 24.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Light checkerboard square behind translucent colors
    pub const CHECKER_LIGHT: Color32 = Color32::from_gray(255);
    /// Dark checkerboard square behind translucent colors
    pub const CHECKER_DARK: Color32 = Color32::from_gray(204);
}
