#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dashboard_gantt::dates::parse_calendar_date;

mod app;

/// Gantt timeline of planned and actual task dates.
#[derive(Parser, Debug)]
#[command(name = "dashboard-gantt")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Schedule snapshot (JSON) to open instead of the last one used
    pub file: Option<PathBuf>,

    /// Start in dual-track mode (planned and actual bars)
    #[arg(long)]
    pub dual: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_today, env = "GANTT_TODAY")]
    pub today: Option<NaiveDate>,
}

fn parse_today(raw: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got '{}'", raw))
}

/// Logging is filtered by `RUST_LOG`, e.g. `RUST_LOG=dashboard_gantt=debug`.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();
}

fn main() -> eframe::Result<()> {
    init_logging();
    let args = Args::parse();
    tracing::debug!(?args, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Dashboard Gantt"),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard Gantt",
        options,
        Box::new(|cc| Ok(Box::new(app::DashboardApp::new(cc, args)))),
    )
}
