//! Colors, sizes and egui visuals for the dashboard's dark timeline.

use egui::style::WidgetVisuals;
use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Visuals};

// Surfaces
pub const BG_DARK: Color32 = Color32::from_rgb(19, 23, 31);
pub const BG_PANEL: Color32 = Color32::from_rgb(26, 31, 41);
pub const BG_HEADER: Color32 = Color32::from_rgb(32, 38, 50);
pub const BG_FIELD: Color32 = Color32::from_rgb(15, 18, 25);
pub const BG_ROW_EVEN: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 5);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(56, 120, 200, 50);
pub const WEEKEND_SHADE: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 30);
pub const STATUS_BAR_BG: Color32 = Color32::from_rgb(16, 20, 27);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(44, 51, 65);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(96, 165, 250);
pub const GRID_LINE: Color32 = Color32::from_rgb(37, 43, 56);

// Text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 116, 139);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;

pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
pub const TODAY_LINE: Color32 = Color32::from_rgb(239, 68, 68);

/// Fill of the actual-dates bar in dual-track mode.
pub const ACTUAL_BAR: Color32 = Color32::from_rgb(0, 188, 212);
/// Planned bars are faded this much when an actual bar sits under them.
pub const PLANNED_FADE_DUAL: f32 = 0.6;

// Geometry
pub const ROW_HEIGHT: f32 = 30.0;
pub const ROW_GAP: f32 = 2.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const BAR_ROUNDING: f32 = 4.0;
pub const BAR_INSET: f32 = 3.0;
pub const TRACK_GAP: f32 = 2.0;
pub const SIDE_PANEL_WIDTH: f32 = 300.0;
pub const EDITOR_PANEL_WIDTH: f32 = 280.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
/// Seconds a smooth scroll takes to reach its target.
pub const SCROLL_ANIMATION_SECS: f32 = 0.25;

const WIDGET_ROUNDING: f32 = 4.0;

fn proportional(size: f32) -> FontId {
    FontId::new(size, FontFamily::Proportional)
}

/// Month names in the header.
pub fn font_header() -> FontId {
    proportional(12.0)
}

/// Day numbers in the header.
pub fn font_sub() -> FontId {
    proportional(10.5)
}

pub fn font_bar() -> FontId {
    proportional(11.5)
}

pub fn font_small() -> FontId {
    proportional(9.5)
}

pub fn font_menu() -> FontId {
    proportional(13.0)
}

fn paint_widget(widget: &mut WidgetVisuals, fill: Color32, border: Color32, text: Stroke) {
    widget.bg_fill = fill;
    widget.weak_bg_fill = fill;
    widget.bg_stroke = Stroke::new(1.0, border);
    widget.fg_stroke = text;
    widget.rounding = Rounding::same(WIDGET_ROUNDING);
}

/// Install the dashboard visuals on `ctx`.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.faint_bg_color = BG_ROW_EVEN;
    visuals.striped = false;

    let w = &mut visuals.widgets;
    paint_widget(&mut w.noninteractive, BG_PANEL, BORDER_SUBTLE, Stroke::new(1.0, TEXT_SECONDARY));
    paint_widget(
        &mut w.inactive,
        Color32::from_rgb(36, 43, 56),
        BORDER_SUBTLE,
        Stroke::new(1.0, TEXT_PRIMARY),
    );
    paint_widget(
        &mut w.hovered,
        Color32::from_rgb(45, 54, 70),
        ACCENT,
        Stroke::new(1.0, TEXT_PRIMARY),
    );
    paint_widget(
        &mut w.active,
        Color32::from_rgb(52, 63, 82),
        ACCENT,
        Stroke::new(2.0, Color32::WHITE),
    );
    w.open = w.hovered;

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, BORDER_ACCENT);
    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 3.0);
    });
}

/// Register the Phosphor icon font so status glyphs render inline with text.
pub fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}
