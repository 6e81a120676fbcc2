use egui::{Color32, RichText, Ui};

use crate::model::{ItemId, ScheduleItem};
use crate::timeline::TimelineLayout;
use crate::ui::theme;

/// Render the left-side item list: plotted items in chart order, then the
/// undated bucket. Clicking a row calls `on_edit`.
pub fn show_item_table(
    layout: &TimelineLayout<'_>,
    selected: Option<&ItemId>,
    ui: &mut Ui,
    mut on_edit: impl FnMut(&ScheduleItem),
) {
    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", layout.item_count()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("item-table-scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            section_header(ui, "SCHEDULED", layout.rows.len());
            for (i, row) in layout.rows.iter().enumerate() {
                if item_row(ui, row.item, i, selected) {
                    on_edit(row.item);
                }
            }

            ui.add_space(8.0);
            section_header(ui, "NOT SCHEDULED", layout.undated.len());
            if layout.undated.is_empty() {
                ui.label(
                    RichText::new("Every task has planned dates.")
                        .size(10.5)
                        .color(theme::TEXT_DIM),
                );
            }
            for (i, item) in layout.undated.iter().enumerate() {
                if item_row(ui, item, i, selected) {
                    on_edit(item);
                }
            }
        });
}

fn section_header(ui: &mut Ui, title: &str, count: usize) {
    ui.add_space(4.0);
    ui.label(
        RichText::new(format!("{}  {}", title, count))
            .size(9.0)
            .color(theme::TEXT_DIM)
            .strong(),
    );
    ui.add_space(2.0);
}

/// One clickable row. Returns true when clicked.
fn item_row(ui: &mut Ui, item: &ScheduleItem, index: usize, selected: Option<&ItemId>) -> bool {
    let is_selected = selected == Some(&item.id);
    let row_bg = if is_selected {
        theme::BG_SELECTED
    } else if index % 2 == 0 {
        theme::BG_PANEL
    } else {
        theme::BG_DARK
    };

    let frame = egui::Frame {
        fill: row_bg,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::symmetric(6.0, 4.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::NONE,
        shadow: egui::epaint::Shadow::NONE,
    };

    let marker = item.status.marker();
    let frame_resp = frame.show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 6.0;
            ui.label(RichText::new(marker.glyph).size(12.0).color(marker.color))
                .on_hover_text(item.status.label());

            ui.vertical(|ui| {
                ui.add(
                    egui::Label::new(RichText::new(&item.label).size(12.0).color(if is_selected {
                        Color32::WHITE
                    } else {
                        theme::TEXT_PRIMARY
                    }))
                    .truncate(),
                );
                let dates = match item.planned() {
                    Some((start, end)) => {
                        format!("{} → {}", start.format("%d/%m"), end.format("%d/%m"))
                    }
                    None => "no planned dates".to_string(),
                };
                let sub = match &item.project {
                    Some(project) => format!("{} · {}", project, dates),
                    None => dates,
                };
                ui.label(RichText::new(sub).size(10.0).color(theme::TEXT_SECONDARY));
            });
        });
    });

    let row_click = ui.interact(
        frame_resp.response.rect,
        egui::Id::new(("item-row", item.id.as_str())),
        egui::Sense::click(),
    );
    ui.add_space(1.0);
    row_click.clicked()
}
