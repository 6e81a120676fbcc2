use dashboard_gantt::ui::theme;
use egui::{Context, RichText, Window};

use super::DashboardApp;

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut DashboardApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 190.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Dashboard Gantt").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Planned and actual task dates");
                ui.label("on a day-by-day timeline.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Header spellings accepted per column, as shown in the help grid.
const COLUMNS: [(&str, &str, bool); 8] = [
    ("Label", "Name, Task, Task Label, Label, Title, Activity", true),
    ("Id", "Id, Task Id, UUID (generated when missing)", false),
    ("Status", "Status, Status Code, State, Stage", false),
    ("Planned start", "Start, Start Date, Planned Start, Begin", false),
    ("Planned end", "End, End Date, Planned End, Due, Finish", false),
    ("Actual start", "Actual Start, Started On", false),
    ("Actual end", "Actual End, Completed On, Finished On", false),
    ("Project", "Project, Project Name", false),
];

const DATE_LAYOUTS: [(&str, &str); 6] = [
    ("YYYY-MM-DD", "2025-06-15, 2025-06-15T08:00:00Z"),
    ("DD/MM/YYYY", "15/06/2025"),
    ("MM/DD/YYYY", "06/15/2025"),
    ("DD-MM-YYYY", "15-06-2025"),
    ("DD.MM.YYYY", "15.06.2025"),
    ("YYYY/MM/DD", "2025/06/15"),
];

/// Render the "CSV Import Format" help dialog.
pub fn show_csv_help_dialog(app: &mut DashboardApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("CSV Import Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([560.0, 460.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);
                ui.label(RichText::new("Delimiters").strong());
                ui.label("Comma, semicolon or tab, detected from the header line.");
                ui.add_space(8.0);

                ui.label(RichText::new("Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_columns")
                    .num_columns(3)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").underline());
                        ui.label(RichText::new("Accepted headers (case-insensitive)").underline());
                        ui.label(RichText::new("Required").underline());
                        ui.end_row();
                        for (name, headers, required) in COLUMNS {
                            ui.label(RichText::new(name).strong());
                            ui.label(headers);
                            ui.label(if required { "yes" } else { "" });
                            ui.end_row();
                        }
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Status values").strong());
                ui.label("pending, in-progress, in-review, done, cancelled. Other values are kept and drawn in grey.");
                ui.add_space(8.0);

                ui.label(RichText::new("Dates").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_dates")
                    .num_columns(2)
                    .spacing([16.0, 2.0])
                    .show(ui, |ui| {
                        for (layout, sample) in DATE_LAYOUTS {
                            ui.label(RichText::new(layout).monospace().size(11.0));
                            ui.label(RichText::new(sample).size(11.0).color(theme::TEXT_DIM));
                            ui.end_row();
                        }
                    });
                ui.label(
                    RichText::new("Day-first is tried before month-first for slashed dates.")
                        .small()
                        .color(theme::TEXT_DIM),
                );
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                for note in [
                    "• Rows without a label are skipped.",
                    "• Rows missing a planned date are listed under Not Scheduled.",
                    "• Unreadable dates are left empty and logged.",
                ] {
                    ui.label(RichText::new(note).small());
                }
                ui.add_space(10.0);

                ui.label(RichText::new("Example (semicolon-delimited)").strong());
                ui.add_space(2.0);
                let example = "Id;Task Label;Status;Planned Start;Planned End;Actual Start;Actual End\n\
                               1;Site survey;done;2025-01-06;2025-01-10;2025-01-06;2025-01-11\n\
                               2;Demolition;in-progress;2025-01-13;2025-01-24;2025-01-14;\n\
                               3;Final walkthrough;pending;;;;";
                egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut example.to_string())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .interactive(false),
                    );
                });
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                should_close = true;
            }
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
