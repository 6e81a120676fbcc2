use chrono::{Datelike, Duration, Months, NaiveDate};

use super::range::VisibleRange;
use super::MIN_COLUMN_WIDTH;

/// Fixed-width day columns over a [`VisibleRange`].
///
/// Column `i` is the date `start + i` days and occupies
/// `[i * column_width, (i + 1) * column_width)` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayGrid {
    range: VisibleRange,
    day_count: i64,
    column_width: f32,
}

/// A run of columns belonging to one calendar month, for the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    /// First day of the month that the span belongs to.
    pub month: NaiveDate,
    pub first_index: i64,
    pub days: i64,
}

impl MonthSpan {
    pub fn label(&self) -> String {
        self.month.format("%b %Y").to_string()
    }
}

impl DayGrid {
    pub fn new(range: VisibleRange, column_width: f32) -> Self {
        Self {
            range,
            day_count: range.day_count().max(0),
            column_width: column_width.max(MIN_COLUMN_WIDTH),
        }
    }

    pub fn day_count(&self) -> i64 {
        self.day_count
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Column index of `date`. Negative or `>= day_count` when outside.
    pub fn day_index(&self, date: NaiveDate) -> i64 {
        (date - self.range.start).num_days()
    }

    pub fn contains_index(&self, index: i64) -> bool {
        (0..self.day_count).contains(&index)
    }

    /// Left edge of column `index`, in pixels.
    pub fn to_pixel_offset(&self, index: i64) -> f32 {
        index as f32 * self.column_width
    }

    /// Left edge of the column for `date`.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        self.to_pixel_offset(self.day_index(date))
    }

    /// Date of column `index`.
    pub fn date_at(&self, index: i64) -> NaiveDate {
        Duration::try_days(index)
            .and_then(|d| self.range.start.checked_add_signed(d))
            .unwrap_or(if index < 0 { self.range.start } else { self.range.end })
    }

    /// Date of the column that contains pixel `x`.
    pub fn date_at_offset(&self, x: f32) -> NaiveDate {
        self.date_at((x / self.column_width).floor() as i64)
    }

    /// Full canvas width.
    pub fn total_width(&self) -> f32 {
        self.to_pixel_offset(self.day_count)
    }

    /// Columns touched by the pixel span `[left_px, right_px]`, clamped to
    /// the grid. The painter uses this to skip everything off screen.
    pub fn visible_columns(&self, left_px: f32, right_px: f32) -> (i64, i64) {
        let last_index = (self.day_count - 1).max(0);
        let column = |x: f32| self.day_index(self.date_at_offset(x)).clamp(0, last_index);
        (column(left_px), column(right_px.max(left_px)))
    }

    /// Columns `first..=last` with their dates, clamped to the grid.
    pub fn days_between(&self, first: i64, last: i64) -> impl Iterator<Item = (i64, NaiveDate)> + '_ {
        (first.max(0)..=last.min(self.day_count - 1)).map(move |i| (i, self.date_at(i)))
    }

    /// Month segments that overlap columns `first..=last`. Each span keeps
    /// its full extent inside the grid, so a month that starts before
    /// `first` still reports its real first column.
    ///
    /// Steps one month at a time, so the cost follows the number of months
    /// in the window rather than the size of the grid.
    pub fn month_spans_between(&self, first: i64, last: i64) -> Vec<MonthSpan> {
        let last = last.min(self.day_count - 1);
        let mut spans = Vec::new();
        let mut index = first.max(0);
        while index <= last {
            let date = self.date_at(index);
            let month = date.with_day(1).unwrap_or(date);
            let month_last = month
                .checked_add_months(Months::new(1))
                .map_or(i64::MAX, |next| self.day_index(next) - 1)
                .min(self.day_count - 1);
            let first_index = self.day_index(month).max(0);
            spans.push(MonthSpan {
                month,
                first_index,
                days: month_last - first_index + 1,
            });
            index = month_last + 1;
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grid() -> DayGrid {
        DayGrid::new(
            VisibleRange {
                start: ymd(2025, 1, 1),
                end: ymd(2025, 3, 1),
            },
            44.0,
        )
    }

    #[test]
    fn indexes_and_offsets() {
        let g = grid();
        assert_eq!(g.day_count(), 60);
        assert_eq!(g.day_index(ymd(2025, 1, 1)), 0);
        assert_eq!(g.day_index(ymd(2025, 1, 11)), 10);
        assert_eq!(g.day_index(ymd(2024, 12, 30)), -2);
        assert_eq!(g.day_index(ymd(2025, 3, 2)), 60);
        assert_eq!(g.to_pixel_offset(10), 440.0);
        assert_eq!(g.date_to_x(ymd(2025, 1, 3)), 88.0);
        assert_eq!(g.total_width(), 60.0 * 44.0);
        assert!(g.contains_index(59));
        assert!(!g.contains_index(60));
        assert!(!g.contains_index(-1));
    }

    #[test]
    fn pixel_back_to_date() {
        let g = grid();
        assert_eq!(g.date_at_offset(0.0), ymd(2025, 1, 1));
        assert_eq!(g.date_at_offset(43.9), ymd(2025, 1, 1));
        assert_eq!(g.date_at_offset(44.0), ymd(2025, 1, 2));
        assert_eq!(g.date_at_offset(g.date_to_x(ymd(2025, 2, 14)) + 20.0), ymd(2025, 2, 14));
    }

    #[test]
    fn column_width_is_configurable() {
        let range = VisibleRange {
            start: ymd(2025, 1, 1),
            end: ymd(2025, 3, 1),
        };
        let g = DayGrid::new(range, 20.0);
        assert_eq!(g.date_to_x(ymd(2025, 1, 11)), 200.0);
        // Zero or negative widths are lifted to the minimum.
        let g = DayGrid::new(range, 0.0);
        assert_eq!(g.column_width(), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn month_spans_cover_every_column() {
        let g = grid();
        let spans = g.month_spans_between(0, g.day_count() - 1);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].label(), "Jan 2025");
        assert_eq!((spans[0].first_index, spans[0].days), (0, 31));
        assert_eq!((spans[1].first_index, spans[1].days), (31, 28));
        assert_eq!((spans[2].first_index, spans[2].days), (59, 1));
        assert_eq!(spans.iter().map(|s| s.days).sum::<i64>(), g.day_count());
    }

    #[test]
    fn visible_columns_follow_the_pixel_window() {
        let g = grid();
        assert_eq!(g.visible_columns(0.0, 440.0), (0, 10));
        assert_eq!(g.visible_columns(450.0, 880.0), (10, 20));
        // Outside the canvas is clamped to the first and last columns.
        assert_eq!(g.visible_columns(-500.0, 1e9), (0, 59));
        assert_eq!(g.days_between(10, 20).count(), 11);
        assert_eq!(g.days_between(-5, 2).map(|(i, _)| i).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(g.days_between(58, 90).count(), 2);
    }

    #[test]
    fn window_spans_keep_their_real_extent() {
        let g = grid();
        let spans = g.month_spans_between(40, 45);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label(), "Feb 2025");
        assert_eq!((spans[0].first_index, spans[0].days), (31, 28));

        let spans = g.month_spans_between(30, 59);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].first_index, 0);
        assert!(g.month_spans_between(70, 80).is_empty());
    }

    #[test]
    fn huge_grid_windows_stay_small() {
        // A mistyped year stretches the range across centuries.
        let g = DayGrid::new(
            VisibleRange {
                start: ymd(202, 1, 10),
                end: ymd(2025, 3, 1),
            },
            44.0,
        );
        assert!(g.day_count() > 600_000);

        let left = g.date_to_x(ymd(1500, 6, 20));
        let (first, last) = g.visible_columns(left, left + 1280.0);
        assert!(last - first <= 32);
        assert_eq!(g.days_between(first, last).count() as i64, last - first + 1);
        let spans = g.month_spans_between(first, last);
        assert!(!spans.is_empty() && spans.len() <= 3);
        assert_eq!(spans[0].month.year(), 1500);

        let g = DayGrid::new(
            VisibleRange {
                start: NaiveDate::MIN,
                end: NaiveDate::MAX,
            },
            44.0,
        );
        let (first, last) = g.visible_columns(0.0, 1280.0);
        assert_eq!(first, 0);
        assert!(last <= 30);
        assert!(g.month_spans_between(first, last).len() <= 2);
        let (_, last) = g.visible_columns(g.total_width() - 100.0, g.total_width() + 100.0);
        assert_eq!(last, g.day_count() - 1);
        assert_eq!(g.month_spans_between(last, last).len(), 1);
    }
}
