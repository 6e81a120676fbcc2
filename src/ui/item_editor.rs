use chrono::NaiveDate;
use egui::{Color32, RichText, Ui};

use crate::model::{ScheduleItem, StatusCode};
use crate::ui::theme;

/// Actions the editor can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Changed,
    Close,
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_DIM)
            .strong(),
    );
}

/// Editable optional date: a picker plus a clear button, or a "Set" button
/// when empty. Returns true if the value changed.
fn optional_date(
    ui: &mut Ui,
    label: &str,
    value: &mut Option<NaiveDate>,
    id_salt: &str,
    fallback: NaiveDate,
) -> bool {
    let mut changed = false;
    field_label(ui, label);
    ui.horizontal(|ui| match value {
        Some(date) => {
            changed |= ui
                .add(egui_extras::DatePickerButton::new(date).id_salt(id_salt))
                .changed();
            if ui
                .small_button(egui_phosphor::regular::X)
                .on_hover_text("Clear date")
                .clicked()
            {
                *value = None;
                changed = true;
            }
        }
        None => {
            ui.label(RichText::new("not set").size(11.0).color(theme::TEXT_DIM));
            if ui.small_button("Set").clicked() {
                *value = Some(fallback);
                changed = true;
            }
        }
    });
    changed
}

/// Render the slide-over editor for one item.
///
/// Edits are applied to `item` in place; the caller decides how to persist
/// them.
pub fn show_item_editor(item: &mut ScheduleItem, today: NaiveDate, ui: &mut Ui) -> EditorAction {
    let mut action = EditorAction::None;
    let mut close = false;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Edit Task")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add(egui::Button::new(egui_phosphor::regular::X).frame(false))
                .on_hover_text("Close")
                .clicked()
            {
                close = true;
            }
        });
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(6.0),
        inner_margin: egui::Margin::same(10.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        field_label(ui, "Name");
        let name_edit = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut item.label)
                .font(egui::FontId::proportional(12.0))
                .text_color(theme::TEXT_PRIMARY),
        );
        if name_edit.changed() {
            action = EditorAction::Changed;
        }

        if let Some(project) = &item.project {
            field_label(ui, "Project");
            ui.label(RichText::new(project).size(11.0).color(theme::TEXT_SECONDARY));
        }

        field_label(ui, "Status");
        let marker = item.status.marker();
        egui::ComboBox::from_id_salt("status_combo")
            .selected_text(
                RichText::new(format!("{} {}", marker.glyph, item.status.label()))
                    .size(11.0)
                    .color(marker.color),
            )
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for status in StatusCode::KNOWN {
                    let m = status.marker();
                    let text = RichText::new(format!("{} {}", m.glyph, status.label())).color(m.color);
                    if ui.selectable_value(&mut item.status, status.clone(), text).changed() {
                        action = EditorAction::Changed;
                    }
                }
            });

        ui.add_space(2.0);
        ui.separator();

        let planned_fallback = item.planned_start.unwrap_or(today);
        let mut changed = false;
        changed |= optional_date(ui, "Planned start", &mut item.planned_start, "dp_planned_start", today);
        changed |= optional_date(ui, "Planned end", &mut item.planned_end, "dp_planned_end", planned_fallback);

        if let (Some(start), Some(end)) = (item.planned_start, item.planned_end) {
            if end < start {
                ui.label(
                    RichText::new(format!(
                        "{} End is before start; the bar is hidden.",
                        egui_phosphor::regular::WARNING
                    ))
                    .size(10.5)
                    .color(Color32::from_rgb(251, 140, 0)),
                );
            }
        } else {
            ui.label(
                RichText::new("Needs both planned dates to appear on the timeline.")
                    .size(10.5)
                    .color(theme::TEXT_DIM),
            );
        }

        ui.add_space(2.0);
        ui.separator();

        let actual_fallback = item.actual_start.unwrap_or(today);
        changed |= optional_date(ui, "Actual start", &mut item.actual_start, "dp_actual_start", today);
        changed |= optional_date(ui, "Actual end", &mut item.actual_end, "dp_actual_end", actual_fallback);

        if changed {
            action = EditorAction::Changed;
        }
    });

    if close {
        EditorAction::Close
    } else {
        action
    }
}
