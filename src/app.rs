use chrono::{Duration, NaiveDate};
use std::path::{Path, PathBuf};

use dashboard_gantt::config::{self, Settings};
use dashboard_gantt::dates::Today;
use dashboard_gantt::io;
use dashboard_gantt::model::{ItemId, Schedule, ScheduleItem, StatusCode};
use dashboard_gantt::timeline::{layout_timeline, TrackMode, ViewportController};
use dashboard_gantt::ui;
use dashboard_gantt::ui::item_editor::EditorAction;

use crate::Args;

mod dialogs;
mod toolbar;

/// Navigation asked for by the toolbar, applied once the chart knows its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Today,
    Weeks(i32),
}

/// Main application state.
pub struct DashboardApp {
    pub schedule: Schedule,
    pub settings: Settings,
    settings_path: PathBuf,
    pub viewport: ViewportController,
    pub file_path: Option<PathBuf>,
    /// Item open in the editor panel.
    pub editing: Option<ItemId>,
    today_source: Today,
    /// Resolved at the start of every frame from `today_source`.
    pub today: NaiveDate,

    // Dialog state
    pub show_about: bool,
    pub show_csv_help: bool,

    pub status_message: String,
    pub pending_nav: Option<Nav>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: Args) -> Self {
        ui::theme::install_fonts(&cc.egui_ctx);
        ui::theme::apply_theme(&cc.egui_ctx);

        let settings_path = config::settings_path();
        let mut settings = Settings::load_or_default(&settings_path);
        if args.dual {
            settings.track_mode = TrackMode::DualTrack;
        }
        let today_source = Today::new(args.today);
        let today = today_source.resolve();

        let mut app = Self {
            schedule: Self::sample_schedule(today),
            settings,
            settings_path,
            viewport: ViewportController::new(),
            file_path: None,
            editing: None,
            today_source,
            today,
            show_about: false,
            show_csv_help: false,
            status_message: "Ready".to_string(),
            pending_nav: None,
        };

        let startup_file = args.file.or_else(|| app.settings.last_file.clone());
        if let Some(path) = startup_file {
            app.load_from(&path);
        }
        app
    }

    /// Demo data shown when no snapshot is opened.
    fn sample_schedule(today: NaiveDate) -> Schedule {
        let day = |offset: i64| today + Duration::days(offset);
        let items = vec![
            ScheduleItem::new("1", "Site survey")
                .with_planned(day(-21), day(-17))
                .with_actual(day(-21), day(-16))
                .with_status(StatusCode::Done),
            ScheduleItem::new("2", "Demolition")
                .with_planned(day(-15), day(-6))
                .with_actual(day(-14), day(-3))
                .with_status(StatusCode::Done),
            ScheduleItem::new("3", "Plumbing rough-in")
                .with_planned(day(-4), day(6))
                .with_actual(day(-2), day(8))
                .with_status(StatusCode::InProgress),
            ScheduleItem::new("4", "Electrical rough-in")
                .with_planned(day(-2), day(9))
                .with_status(StatusCode::InProgress),
            ScheduleItem::new("5", "Inspection")
                .with_planned(day(10), day(11))
                .with_status(StatusCode::InReview),
            ScheduleItem::new("6", "Drywall")
                .with_planned(day(12), day(22))
                .with_status(StatusCode::Pending),
            ScheduleItem::new("7", "Custom cabinetry")
                .with_planned(day(14), day(30))
                .with_status(StatusCode::Cancelled),
            ScheduleItem::new("8", "Painting")
                .with_planned(day(23), day(31))
                .with_status(StatusCode::Pending),
            ScheduleItem::new("9", "Final walkthrough"),
            ScheduleItem::new("10", "Permit renewal").with_status(StatusCode::Other("on-hold".into())),
        ];
        let mut schedule = Schedule::new("Kitchen Remodel", items);
        for item in &mut schedule.items {
            item.project = Some("Kitchen Remodel".to_string());
        }
        schedule
    }

    // --- File operations ---

    fn replace_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
        self.editing = None;
        // A new data set re-centers on today like a fresh mount.
        self.viewport = ViewportController::new();
    }

    fn load_from(&mut self, path: &Path) {
        match io::load_schedule(path) {
            Ok(schedule) => {
                let count = schedule.items.len();
                self.replace_schedule(schedule);
                self.file_path = Some(path.to_path_buf());
                self.settings.last_file = Some(path.to_path_buf());
                self.persist_settings();
                self.status_message = format!("Loaded {} tasks", count);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load schedule");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn open_schedule(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule snapshot", &["json"])
            .pick_file()
        {
            self.load_from(&path);
        }
    }

    pub fn save_schedule(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.write_to(&path),
            None => self.save_schedule_as(),
        }
    }

    pub fn save_schedule_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule snapshot", &["json"])
            .set_file_name(format!("{}.json", self.schedule.name))
            .save_file()
        {
            self.write_to(&path);
            self.file_path = Some(path.clone());
            self.settings.last_file = Some(path);
            self.persist_settings();
        }
    }

    fn write_to(&mut self, path: &Path) {
        match io::save_schedule(&self.schedule, path) {
            Ok(()) => self.status_message = "Snapshot saved".to_string(),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to save schedule");
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    pub fn import_csv(&mut self) {
        if !self.schedule.items.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current schedule. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        else {
            return;
        };

        match io::csv_import::import_csv(&path) {
            Ok((items, skipped)) => {
                let count = items.len();
                self.replace_schedule(Schedule::new(io::file::file_stem(&path), items));
                self.file_path = None;
                self.status_message = if skipped > 0 {
                    format!("Imported {} tasks ({} rows skipped)", count, skipped)
                } else {
                    format!("Imported {} tasks", count)
                };
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "CSV import failed");
                self.status_message = format!("CSV import failed: {}", e);
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.schedule.items.is_empty() {
            self.status_message = "Nothing to export".to_string();
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(format!("{}.csv", self.schedule.name))
            .save_file()
        {
            match io::csv_export::export_csv(&self.schedule.items, &path) {
                Ok(count) => self.status_message = format!("Exported {} tasks to CSV", count),
                Err(e) => self.status_message = format!("CSV export failed: {}", e),
            }
        }
    }

    // --- View ---

    pub fn set_track_mode(&mut self, mode: TrackMode) {
        if self.settings.track_mode != mode {
            tracing::debug!(?mode, "track mode changed");
            self.settings.track_mode = mode;
            self.persist_settings();
        }
    }

    pub fn zoom_in(&mut self) {
        self.settings.zoom_in();
        tracing::debug!(column_width = self.settings.column_width_px, "zoomed in");
        self.persist_settings();
    }

    pub fn zoom_out(&mut self) {
        self.settings.zoom_out();
        tracing::debug!(column_width = self.settings.column_width_px, "zoomed out");
        self.persist_settings();
    }

    pub fn open_config_folder(&mut self) {
        let dir = config::config_dir();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|()| open::that(&dir)) {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot open config folder");
            self.status_message = format!("Cannot open {}: {}", dir.display(), e);
        }
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            tracing::warn!(error = %e, "settings not saved");
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        let dated = self.schedule.items.iter().filter(|i| i.is_dated()).count();
        let undated = self.schedule.items.len() - dated;
        let zoom = self.settings.layout().column_width_px / dashboard_gantt::timeline::DEFAULT_COLUMN_WIDTH;

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::STATUS_BAR_BG)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let info = format!(
                            "{}  ·  Scheduled: {}  ·  Undated: {}  ·  Zoom: {:.0}%",
                            self.settings.track_mode.label(),
                            dated,
                            undated,
                            zoom * 100.0
                        );
                        ui.label(egui::RichText::new(info).size(10.5).color(ui::theme::TEXT_DIM));
                    });
                });
            });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let today = self.today_source.resolve();
        if today != self.today {
            tracing::info!(from = %self.today, to = %today, "date changed");
            self.today = today;
        }
        if self.today_source == Today::Clock {
            // Wake up now and then so an idle window still rolls over at midnight.
            ctx.request_repaint_after(std::time::Duration::from_secs(60));
        }

        let (should_save, should_open) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::S),
                i.modifiers.command && i.key_pressed(egui::Key::O),
            )
        });
        if should_save {
            self.save_schedule();
        }
        if should_open {
            self.open_schedule();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show_toolbar(self, ui);
        });

        self.show_status_bar(ctx);

        // Right panel: editor for the item the user clicked
        let mut editor_action = EditorAction::None;
        if let Some(id) = self.editing.clone() {
            let today = self.today;
            egui::SidePanel::right("editor_panel")
                .default_width(ui::theme::EDITOR_PANEL_WIDTH)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(8.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| match self.schedule.find_mut(&id) {
                    Some(item) => editor_action = ui::item_editor::show_item_editor(item, today, ui),
                    None => editor_action = EditorAction::Close,
                });
        }
        match editor_action {
            EditorAction::Changed => {
                self.schedule.touch();
                self.status_message = "Task updated".to_string();
            }
            EditorAction::Close => self.editing = None,
            EditorAction::None => {}
        }

        let layout = layout_timeline(
            &self.schedule.items,
            self.today,
            self.settings.track_mode,
            &self.settings.layout(),
        );
        let selected = self.editing.as_ref();
        let mut edit_request: Option<ItemId> = None;

        // Left panel: item list
        egui::SidePanel::left("item_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(180.0)
            .max_width(ui::theme::SIDE_PANEL_WIDTH * 2.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui::item_table::show_item_table(&layout, selected, ui, |item| {
                    edit_request = Some(item.id.clone());
                });
            });

        // Central panel: timeline
        let viewport = &mut self.viewport;
        let pending_nav = self.pending_nav.take();
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            match pending_nav {
                Some(Nav::Today) => {
                    if viewport
                        .scroll_to_today(&layout.grid, layout.today, ui.available_width())
                        .is_none()
                    {
                        tracing::debug!(today = %layout.today, "today is outside the visible range");
                    }
                }
                Some(Nav::Weeks(weeks)) => {
                    viewport.scroll_by_weeks(weeks, &layout.grid);
                }
                None => {}
            }

            ui::gantt_chart::show_gantt_chart(&layout, viewport, selected, ui, |item| {
                edit_request = Some(item.id.clone());
            });
        });

        if let Some(id) = edit_request {
            tracing::debug!(id = %id, "edit requested");
            if let Some(item) = self.schedule.find(&id) {
                self.status_message = format!("Editing '{}'", item.label);
            }
            self.editing = Some(id);
        }

        if self.show_about {
            dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            dialogs::show_csv_help_dialog(self, ctx);
        }
    }
}
