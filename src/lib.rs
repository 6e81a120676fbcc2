//! Gantt timeline for the project-management dashboard.
//!
//! [`timeline`] holds the pure layout engine; [`ui`] paints it with egui.
//! Data arrives already loaded from the task store (or from a snapshot via
//! [`io`]) and is only read by the layout.

pub mod config;
pub mod dates;
pub mod error;
pub mod io;
pub mod model;
pub mod timeline;
pub mod ui;

pub use error::{ScheduleError, ScheduleResult};
