use chrono::{Duration, NaiveDate};

use super::{LayoutConfig, TrackMode};
use crate::model::ScheduleItem;

/// The contiguous, inclusive span of days the grid renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VisibleRange {
    /// Number of day columns (`end - start + 1`).
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Days between start and end.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Shift a date, saturating at chrono's representable bounds.
fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = Duration::try_days(days).and_then(|d| date.checked_add_signed(d));
    match shifted {
        Some(d) => d,
        None if days < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// The date fields that take part in range resolution for a given mode.
fn tracked_dates(item: &ScheduleItem, mode: TrackMode) -> impl Iterator<Item = NaiveDate> {
    let actual = if mode.has_actual_track() {
        [item.actual_start, item.actual_end]
    } else {
        [None, None]
    };
    [item.planned_start, item.planned_end]
        .into_iter()
        .chain(actual)
        .flatten()
}

/// Compute the day range covering every tracked date and today, padded on
/// both sides and widened to the configured minimum span.
pub fn resolve_range(
    items: &[ScheduleItem],
    today: NaiveDate,
    mode: TrackMode,
    config: &LayoutConfig,
) -> VisibleRange {
    let (mut earliest, mut latest) = items
        .iter()
        .flat_map(|item| tracked_dates(item, mode))
        .fold((today, today), |(lo, hi), d| (lo.min(d), hi.max(d)));

    let padding = config.padding_days.max(0);
    earliest = shift(earliest, -padding);
    latest = shift(latest, padding);
    let mut range = VisibleRange {
        start: earliest,
        end: latest,
    };

    let span = range.span_days();
    let min_span = config.min_span_days.max(0);
    if span < min_span {
        // ceil((min_span - span) / 2) on each side
        let grow = (min_span - span + 1) / 2;
        range.start = shift(range.start, -grow);
        range.end = shift(range.end, grow);
    }
    debug_assert!(range.contains(today));
    range
}
