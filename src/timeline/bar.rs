use chrono::NaiveDate;

use super::grid::DayGrid;

/// Horizontal placement of one bar on the day grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub left_px: f32,
    pub width_px: f32,
    /// First and last visible columns, inclusive.
    pub first_index: i64,
    pub last_index: i64,
}

impl Bar {
    pub fn right_px(&self) -> f32 {
        self.left_px + self.width_px
    }

    pub fn days(&self) -> i64 {
        self.last_index - self.first_index + 1
    }
}

/// Place a bar for the inclusive interval `[start, end]`, clamped to the grid.
///
/// Returns `None` when nothing of the interval is visible, which includes
/// inverted intervals (`end < start`).
pub fn place_bar(start: NaiveDate, end: NaiveDate, grid: &DayGrid) -> Option<Bar> {
    let first = grid.day_index(start).max(0);
    let last = grid.day_index(end).min(grid.day_count() - 1);
    if last < first {
        return None;
    }
    Some(Bar {
        left_px: grid.to_pixel_offset(first),
        width_px: grid.to_pixel_offset(last - first + 1),
        first_index: first,
        last_index: last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::VisibleRange;

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
    fn inside_the_range() {
        let bar = place_bar(ymd(2025, 1, 10), ymd(2025, 1, 12), &grid()).unwrap();
        assert_eq!(bar.left_px, 9.0 * 44.0);
        assert_eq!(bar.width_px, 3.0 * 44.0);
        assert_eq!(bar.days(), 3);
        assert_eq!(bar.right_px(), 12.0 * 44.0);
    }

    #[test]
    fn single_day_is_one_column() {
        let bar = place_bar(ymd(2025, 2, 1), ymd(2025, 2, 1), &grid()).unwrap();
        assert_eq!(bar.width_px, 44.0);
    }

    #[test]
    fn clamped_on_both_sides() {
        let g = grid();
        let bar = place_bar(ymd(2024, 12, 1), ymd(2025, 1, 5), &g).unwrap();
        assert_eq!(bar.left_px, 0.0);
        assert_eq!(bar.width_px, 5.0 * 44.0);

        let bar = place_bar(ymd(2025, 2, 27), ymd(2025, 6, 1), &g).unwrap();
        assert_eq!(bar.first_index, 57);
        assert_eq!(bar.last_index, 59);
        assert_eq!(bar.right_px(), g.total_width());

        let bar = place_bar(ymd(2024, 1, 1), ymd(2026, 1, 1), &g).unwrap();
        assert_eq!(bar.left_px, 0.0);
        assert_eq!(bar.width_px, g.total_width());
    }

    #[test]
    fn entirely_outside_is_none() {
        let g = grid();
        assert_eq!(place_bar(ymd(2024, 11, 1), ymd(2024, 12, 31), &g), None);
        assert_eq!(place_bar(ymd(2025, 3, 2), ymd(2025, 4, 1), &g), None);
    }

    #[test]
    fn inverted_interval_is_omitted() {
        assert_eq!(place_bar(ymd(2025, 1, 12), ymd(2025, 1, 10), &grid()), None);
    }

    #[test]
    fn repeated_calls_agree() {
        let g = grid();
        let a = place_bar(ymd(2025, 1, 20), ymd(2025, 2, 3), &g);
        let b = place_bar(ymd(2025, 1, 20), ymd(2025, 2, 3), &g);
        assert_eq!(a, b);
    }
}
