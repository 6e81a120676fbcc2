use chrono::NaiveDate;

use super::grid::DayGrid;

/// Whether the one-time "center on today" has happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CenteringState {
    #[default]
    NotCentered,
    Centered,
}

/// A horizontal scroll target for the host's scroll container.
///
/// Offsets are not clamped here; the container clamps to its content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub offset_px: f32,
    pub smooth: bool,
}

/// Horizontal scroll state of the chart.
///
/// All operations are offset arithmetic. The widget that owns the scroll area
/// applies [`ScrollRequest`]s and reports user scrolling back through
/// [`ViewportController::observe_offset`].
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    offset_px: f32,
    centering: CenteringState,
    pending: Option<ScrollRequest>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset_px(&self) -> f32 {
        self.offset_px
    }

    pub fn centering(&self) -> CenteringState {
        self.centering
    }

    /// Record where the scroll container actually is.
    pub fn observe_offset(&mut self, offset_px: f32) {
        self.offset_px = offset_px;
    }

    /// Left edge of today's column, or `None` if today is not on the grid.
    pub fn today_offset_px(grid: &DayGrid, today: NaiveDate) -> Option<f32> {
        grid.contains_index(grid.day_index(today))
            .then(|| grid.date_to_x(today))
    }

    /// Offset that puts the middle of today's column in the middle of a
    /// viewport `viewport_width` pixels wide.
    fn centered_offset(grid: &DayGrid, today: NaiveDate, viewport_width: f32) -> Option<f32> {
        Self::today_offset_px(grid, today).map(|x| {
            (x + grid.column_width() / 2.0 - viewport_width / 2.0).max(0.0)
        })
    }

    fn request(&mut self, offset_px: f32, smooth: bool) -> ScrollRequest {
        let req = ScrollRequest { offset_px, smooth };
        self.offset_px = offset_px;
        self.pending = Some(req);
        req
    }

    /// Center today's column.
    pub fn scroll_to_today(
        &mut self,
        grid: &DayGrid,
        today: NaiveDate,
        viewport_width: f32,
    ) -> Option<ScrollRequest> {
        let target = Self::centered_offset(grid, today, viewport_width)?;
        Some(self.request(target, true))
    }

    /// Shift by `weeks` whole weeks; negative goes back in time.
    pub fn scroll_by_weeks(&mut self, weeks: i32, grid: &DayGrid) -> ScrollRequest {
        let delta = weeks as f32 * 7.0 * grid.column_width();
        self.request(self.offset_px + delta, true)
    }

    /// Center on today the first time this is called with today on the grid.
    /// Every later call returns `None` and leaves the offset alone.
    pub fn initial_center(
        &mut self,
        grid: &DayGrid,
        today: NaiveDate,
        viewport_width: f32,
    ) -> Option<ScrollRequest> {
        if self.centering == CenteringState::Centered {
            return None;
        }
        let target = Self::centered_offset(grid, today, viewport_width)?;
        self.centering = CenteringState::Centered;
        Some(self.request(target, false))
    }

    /// The request the scroll container has not finished applying yet.
    pub fn pending(&self) -> Option<ScrollRequest> {
        self.pending
    }

    pub fn finish_pending(&mut self) {
        self.pending = None;
    }
}
