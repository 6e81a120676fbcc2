use dashboard_gantt::timeline::TrackMode;
use dashboard_gantt::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

use super::{DashboardApp, Nav};

/// Render the top menu bar and the timeline navigation buttons.
pub fn show_toolbar(app: &mut DashboardApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open...        Ctrl+O").clicked() {
                app.open_schedule();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save            Ctrl+S").clicked() {
                app.save_schedule();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_schedule_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Tracks").small().weak());
            for mode in [TrackMode::SingleTrack, TrackMode::DualTrack] {
                if ui.radio(app.settings.track_mode == mode, mode.label()).clicked() {
                    app.set_track_mode(mode);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Zoom In").clicked() {
                app.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out").clicked() {
                app.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Config Folder").clicked() {
                app.open_config_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("CSV Format").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        let weeks = app.settings.weeks_per_page.max(1);
        if ui
            .button(icons::ARROW_LEFT)
            .on_hover_text(format!("Back {} weeks", weeks))
            .clicked()
        {
            app.pending_nav = Some(Nav::Weeks(-weeks));
        }
        if ui
            .button(format!("{} Today", icons::CALENDAR_BLANK))
            .on_hover_text("Center on today")
            .clicked()
        {
            app.pending_nav = Some(Nav::Today);
        }
        if ui
            .button(icons::ARROW_RIGHT)
            .on_hover_text(format!("Forward {} weeks", weeks))
            .clicked()
        {
            app.pending_nav = Some(Nav::Weeks(weeks));
        }

        ui.separator();

        let dual = app.settings.track_mode == TrackMode::DualTrack;
        if ui
            .selectable_label(dual, format!("{} Actual dates", icons::ROWS))
            .on_hover_text("Show actual dates under the planned bars")
            .clicked()
        {
            app.set_track_mode(if dual {
                TrackMode::SingleTrack
            } else {
                TrackMode::DualTrack
            });
        }
        if ui.button(icons::MAGNIFYING_GLASS_MINUS).on_hover_text("Zoom out").clicked() {
            app.zoom_out();
        }
        if ui.button(icons::MAGNIFYING_GLASS_PLUS).on_hover_text("Zoom in").clicked() {
            app.zoom_in();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let source = if app.file_path.is_some() { "" } else { " (not saved)" };
            ui.label(
                RichText::new(format!("{}{}", app.schedule.name, source))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
