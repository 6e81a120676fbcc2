//! Timeline layout engine.
//!
//! Everything here is pure: given the loaded items, today's date and a
//! [`LayoutConfig`], it computes the visible day range, the day grid, and the
//! pixel placement of every bar. The egui widgets in [`crate::ui`] only paint
//! what this module produces.

pub mod bar;
pub mod grid;
pub mod range;
pub mod tracks;
pub mod viewport;

use serde::{Deserialize, Serialize};

pub use bar::{place_bar, Bar};
pub use grid::{DayGrid, MonthSpan};
pub use range::{resolve_range, VisibleRange};
pub use tracks::{layout_timeline, partition, ItemRow, TimelineLayout};
pub use viewport::{CenteringState, ScrollRequest, ViewportController};

/// Default width of one day column, in pixels.
pub const DEFAULT_COLUMN_WIDTH: f32 = 44.0;
/// Narrowest column zoom-out will produce.
pub const MIN_COLUMN_WIDTH: f32 = 8.0;
/// Widest column zoom-in will produce.
pub const MAX_COLUMN_WIDTH: f32 = 120.0;
/// Days of margin added before the earliest and after the latest date.
pub const DEFAULT_PADDING_DAYS: i64 = 7;
/// Minimum number of days between range start and end.
pub const DEFAULT_MIN_SPAN_DAYS: i64 = 60;

/// Which date pairs are drawn for each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackMode {
    /// Planned dates only.
    #[default]
    SingleTrack,
    /// Planned bar with the actual bar stacked beneath it.
    DualTrack,
}

impl TrackMode {
    pub fn has_actual_track(self) -> bool {
        matches!(self, TrackMode::DualTrack)
    }

    pub fn label(self) -> &'static str {
        match self {
            TrackMode::SingleTrack => "Planned only",
            TrackMode::DualTrack => "Planned + actual",
        }
    }
}

/// Tunables for the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub column_width_px: f32,
    pub padding_days: i64,
    pub min_span_days: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width_px: DEFAULT_COLUMN_WIDTH,
            padding_days: DEFAULT_PADDING_DAYS,
            min_span_days: DEFAULT_MIN_SPAN_DAYS,
        }
    }
}

impl LayoutConfig {
    pub fn with_column_width(mut self, px: f32) -> Self {
        self.column_width_px = px;
        self
    }
}
