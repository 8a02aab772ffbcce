//! UI components using egui.
//!
//! The UI only reads application state. Everything the user does comes back
//! as a list of `UiAction`s that the session applies after the pass.

use egui::{Align, Color32, Context, Layout, Pos2, RichText};
use inkwheel_core::canvas::{MAX_THICKNESS, MIN_THICKNESS};
use inkwheel_core::palette::{DEFAULT_NAMES, DEFAULT_PALETTE};
use inkwheel_core::picker::{hue_wheel, sat_val};
use inkwheel_core::{
    Canvas, CaptureTarget, Color, ColorPicker, Modifiers, Notice, NoticeKind, PointerEvent,
    ToolKind,
};
use inkwheel_widgets::{
    colors_match, panel_frame, section_label, theme, to_modifiers, toolbar_frame,
    vertical_separator, ColorPreview, ColorSwatch, ColorSwatchStyle, ColorSwatchWithWheel,
    ControlView, TextButton, ToggleButton,
};

use crate::shortcuts::ShortcutRegistry;

/// On-screen side of the hue wheel and the saturation/value box.
const CONTROL_SIDE: f32 = 220.0;

/// UI state that is not part of the drawing or the picker.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the color picker dialog is open.
    pub picker_open: bool,
    /// Message waiting to be acknowledged.
    pub notice: Option<Notice>,
    /// Bottom edge of the toolbar in logical pixels; the canvas starts here.
    pub canvas_top: f32,
}

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Change the current tool.
    SetTool(ToolKind),
    /// Change the brush thickness.
    SetThickness(f64),
    /// Remove every stroke and shape.
    Clear,
    /// Show the save dialog and write the drawing.
    Save,
    /// Show the open dialog and load an ink document.
    Open,
    /// Open the color picker on the current drawing color.
    OpenPicker,
    ClosePicker,
    /// Close whatever is on top: the notice first, then the picker.
    Dismiss,
    DismissNotice,
    /// Pointer activity over a picker control, in its local coordinates.
    PickerPointer(CaptureTarget, PointerEvent),
    SetAlpha(u8),
    SetAlphaText(String),
    /// Palette slot clicked with the given modifiers.
    ClickSwatch(usize, Modifiers),
    ResetPalette,
}

/// Render all UI and return the triggered actions, in order.
pub fn render_ui(
    ctx: &Context,
    ui_state: &mut UiState,
    canvas: &Canvas,
    picker: &ColorPicker,
) -> Vec<UiAction> {
    let mut actions = Vec::new();

    render_toolbar(ctx, ui_state, canvas, picker, &mut actions);
    if ui_state.picker_open {
        render_picker(ctx, picker, &mut actions);
    }
    if let Some(notice) = &ui_state.notice {
        render_notice(ctx, notice, &mut actions);
    }

    actions
}

/// Render the toolbar strip and remember where the canvas starts.
fn render_toolbar(
    ctx: &Context,
    ui_state: &mut UiState,
    canvas: &Canvas,
    picker: &ColorPicker,
    actions: &mut Vec<UiAction>,
) {
    #[allow(deprecated)]
    let screen_rect = ctx.input(|i| i.content_rect());

    let response = egui::Area::new(egui::Id::new("toolbar"))
        .fixed_pos(Pos2::ZERO)
        .show(ctx, |ui| {
            toolbar_frame().show(ui, |ui| {
                ui.set_width(screen_rect.width() - 24.0);
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 4.0;

                    for tool in ToolKind::ALL {
                        let tooltip =
                            format!("{} ({})", tool.label(), ShortcutRegistry::tool_key(tool));
                        if ToggleButton::new(tool.label(), canvas.tool() == tool)
                            .tooltip(&tooltip)
                            .min_width(64.0)
                            .show(ui)
                        {
                            actions.push(UiAction::SetTool(tool));
                        }
                    }

                    vertical_separator(ui);

                    let (clicked, _) =
                        ColorSwatchWithWheel::new(picker.active_color(), "Color (C)").show(ui);
                    if clicked {
                        actions.push(UiAction::OpenPicker);
                    }

                    vertical_separator(ui);

                    section_label(ui, "Thickness");
                    let mut thickness = canvas.thickness();
                    let slider = egui::Slider::new(&mut thickness, MIN_THICKNESS..=MAX_THICKNESS)
                        .step_by(1.0);
                    if ui.add(slider).changed() {
                        actions.push(UiAction::SetThickness(thickness));
                    }

                    vertical_separator(ui);

                    if TextButton::new("Clear").enabled(!canvas.drawing.is_empty()).show(ui) {
                        actions.push(UiAction::Clear);
                    }
                    if TextButton::new("Save").show(ui) {
                        actions.push(UiAction::Save);
                    }
                    if TextButton::new("Open").show(ui) {
                        actions.push(UiAction::Open);
                    }
                });
            });
        });

    ui_state.canvas_top = response.response.rect.bottom();
}

/// Tooltip for a palette slot: the built-in name while the slot still holds
/// its default, otherwise the hex value.
fn swatch_tooltip(slot: usize, color: Color) -> String {
    let label = match DEFAULT_PALETTE.get(slot) {
        Some(default) if *default == color => DEFAULT_NAMES[slot].to_string(),
        _ => color.to_hex(),
    };
    format!("{}\nShift+click to save the current color here", label)
}

/// Render the color picker dialog.
fn render_picker(ctx: &Context, picker: &ColorPicker, actions: &mut Vec<UiAction>) {
    let modal = egui::Modal::new(egui::Id::new("color_picker"))
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.label(RichText::new("Color Picker").size(16.0).strong());
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    section_label(ui, "Hue");
                    let (_, events) =
                        ControlView::new(picker.hue_wheel().display(), hue_wheel::SIZE)
                            .side(CONTROL_SIDE)
                            .show(ui);
                    actions.extend(
                        events
                            .into_iter()
                            .map(|e| UiAction::PickerPointer(CaptureTarget::HueWheel, e)),
                    );
                });
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    section_label(ui, "Saturation / Value");
                    let (_, events) =
                        ControlView::new(picker.sat_val().display(), sat_val::BOX_SIZE)
                            .side(CONTROL_SIDE)
                            .show(ui);
                    actions.extend(
                        events
                            .into_iter()
                            .map(|e| UiAction::PickerPointer(CaptureTarget::SatValBox, e)),
                    );
                });
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                section_label(ui, "Alpha");
                let mut alpha = picker.alpha();
                if ui.add(egui::Slider::new(&mut alpha, 0..=255).show_value(false)).changed() {
                    actions.push(UiAction::SetAlpha(alpha));
                }
                let mut text = picker.alpha_text().to_string();
                let edit = egui::TextEdit::singleline(&mut text).desired_width(40.0);
                if ui.add(edit).changed() {
                    actions.push(UiAction::SetAlphaText(text));
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                section_label(ui, "Preview");
                ColorPreview::new(picker.preview()).show(ui);
                ui.label(RichText::new(picker.preview().to_hex()).monospace().color(theme::TEXT));
            });

            ui.add_space(8.0);
            section_label(ui, "Palette");
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;
                for (slot, color) in picker.palette().colors().iter().enumerate() {
                    let tooltip = swatch_tooltip(slot, *color);
                    let (clicked, _) = ColorSwatch::new(*color, &tooltip)
                        .style(ColorSwatchStyle::palette())
                        .selected(colors_match(*color, picker.active_color()))
                        .show(ui);
                    if clicked {
                        let modifiers = to_modifiers(ui.input(|i| i.modifiers));
                        actions.push(UiAction::ClickSwatch(slot, modifiers));
                    }
                }
            });

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if TextButton::new("Reset Palette").show(ui) {
                    actions.push(UiAction::ResetPalette);
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if TextButton::new("Close").show(ui) {
                        actions.push(UiAction::ClosePicker);
                    }
                });
            });
        });

    if modal.should_close() {
        actions.push(UiAction::ClosePicker);
    }
}

/// Render a modal message box.
fn render_notice(ctx: &Context, notice: &Notice, actions: &mut Vec<UiAction>) {
    let title_color = match notice.kind {
        NoticeKind::Info => theme::TEXT,
        NoticeKind::Warning => Color32::from_rgb(217, 119, 6),
        NoticeKind::Error => Color32::from_rgb(220, 38, 38),
    };

    let modal = egui::Modal::new(egui::Id::new("notice"))
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.set_width(320.0);
            ui.label(RichText::new(&notice.title).size(15.0).strong().color(title_color));
            ui.add_space(6.0);
            ui.label(RichText::new(&notice.message).color(theme::TEXT));
            ui.add_space(10.0);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                TextButton::new("OK").show(ui)
            })
            .inner
        });

    if modal.inner || modal.should_close() {
        actions.push(UiAction::DismissNotice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_tooltip_names_defaults() {
        assert!(swatch_tooltip(0, Color::rgb(255, 0, 0)).starts_with("Red\n"));
        assert!(swatch_tooltip(9, Color::rgb(128, 128, 128)).starts_with("Gray\n"));
        assert!(swatch_tooltip(0, Color::rgb(1, 2, 3)).starts_with("#010203\n"));
    }
}
