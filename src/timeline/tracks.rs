use chrono::NaiveDate;

use super::bar::{place_bar, Bar};
use super::grid::DayGrid;
use super::range::{resolve_range, VisibleRange};
use super::{LayoutConfig, TrackMode};
use crate::model::{ItemId, ScheduleItem, StatusMarker};

/// One plotted row: an item with a complete planned date pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow<'a> {
    pub item: &'a ScheduleItem,
    pub marker: StatusMarker,
    /// `None` when the planned interval is inverted.
    pub planned: Option<Bar>,
    /// Only populated in dual-track mode with both actual dates present.
    pub actual: Option<Bar>,
}

/// Everything the chart needs to paint one frame.
#[derive(Debug, Clone)]
pub struct TimelineLayout<'a> {
    pub mode: TrackMode,
    pub today: NaiveDate,
    pub range: VisibleRange,
    pub grid: DayGrid,
    /// Dated items, ascending by planned start.
    pub rows: Vec<ItemRow<'a>>,
    /// Items lacking a planned start or end, in input order.
    pub undated: Vec<&'a ScheduleItem>,
}

impl<'a> TimelineLayout<'a> {
    /// Row position of an item in the plotted list.
    pub fn row_of(&self, id: &ItemId) -> Option<usize> {
        self.rows.iter().position(|r| &r.item.id == id)
    }

    pub fn item_count(&self) -> usize {
        self.rows.len() + self.undated.len()
    }
}

/// Split items into (dated, undated).
///
/// Dated items are stable-sorted by planned start, so ties keep input order;
/// undated items keep input order.
pub fn partition(items: &[ScheduleItem]) -> (Vec<&ScheduleItem>, Vec<&ScheduleItem>) {
    let (mut dated, undated): (Vec<&ScheduleItem>, Vec<&ScheduleItem>) =
        items.iter().partition(|item| item.is_dated());
    dated.sort_by_key(|item| item.planned_start);
    (dated, undated)
}

fn row_for<'a>(item: &'a ScheduleItem, mode: TrackMode, grid: &DayGrid) -> ItemRow<'a> {
    let planned = item
        .planned()
        .and_then(|(start, end)| place_bar(start, end, grid));
    let actual = if mode.has_actual_track() {
        item.actual()
            .and_then(|(start, end)| place_bar(start, end, grid))
    } else {
        None
    };
    ItemRow {
        item,
        marker: item.status.marker(),
        planned,
        actual,
    }
}

/// Resolve the range, build the grid and place every bar.
pub fn layout_timeline<'a>(
    items: &'a [ScheduleItem],
    today: NaiveDate,
    mode: TrackMode,
    config: &LayoutConfig,
) -> TimelineLayout<'a> {
    let range = resolve_range(items, today, mode, config);
    let grid = DayGrid::new(range, config.column_width_px);
    let (dated, undated) = partition(items);
    let rows = dated
        .into_iter()
        .map(|item| row_for(item, mode, &grid))
        .collect();

    TimelineLayout {
        mode,
        today,
        range,
        grid,
        rows,
        undated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatusCode;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mixed_items() -> Vec<ScheduleItem> {
        let mut half = ScheduleItem::new("half", "Half planned");
        half.planned_start = Some(ymd(2025, 1, 20));
        let mut end_only = ScheduleItem::new("end", "End only");
        end_only.planned_end = Some(ymd(2025, 1, 25));
        vec![
            ScheduleItem::new("c", "Roofing").with_planned(ymd(2025, 2, 10), ymd(2025, 2, 20)),
            half,
            ScheduleItem::new("a", "Survey").with_planned(ymd(2025, 1, 5), ymd(2025, 1, 8)),
            ScheduleItem::new("none", "Quote follow-up"),
            ScheduleItem::new("b", "Framing").with_planned(ymd(2025, 1, 5), ymd(2025, 1, 30)),
            end_only,
            ScheduleItem::new("d", "Inverted").with_planned(ymd(2025, 1, 12), ymd(2025, 1, 9)),
        ]
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let items = mixed_items();
        let (dated, undated) = partition(&items);
        assert_eq!(dated.len() + undated.len(), items.len());
        for item in &items {
            let in_dated = dated.iter().filter(|d| d.id == item.id).count();
            let in_undated = undated.iter().filter(|u| u.id == item.id).count();
            assert_eq!(in_dated + in_undated, 1, "item {}", item.id);
        }
        assert!(dated.iter().all(|d| d.is_dated()));
        assert!(undated.iter().all(|u| !u.is_dated()));
    }

    #[test]
    fn dated_sorted_stable_and_undated_in_input_order() {
        let items = mixed_items();
        let (dated, undated) = partition(&items);
        let ids: Vec<&str> = dated.iter().map(|i| i.id.as_str()).collect();
        // "a" and "b" share a start and keep their input order.
        assert_eq!(ids, vec!["a", "b", "d", "c"]);
        for pair in dated.windows(2) {
            assert!(pair[0].planned_start <= pair[1].planned_start);
        }
        let ids: Vec<&str> = undated.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["half", "none", "end"]);
    }

    #[test]
    fn scenario_dated_item_gets_a_bar() {
        let items = vec![ScheduleItem::new("1", "One").with_planned(ymd(2025, 1, 10), ymd(2025, 1, 12))];
        let layout = layout_timeline(&items, ymd(2025, 1, 15), TrackMode::SingleTrack, &LayoutConfig::default());
        assert!(layout.range.contains(ymd(2025, 1, 10)));
        assert!(layout.range.contains(ymd(2025, 1, 15)));
        assert_eq!(layout.rows.len(), 1);
        assert!(layout.undated.is_empty());
        let bar = layout.rows[0].planned.expect("planned bar");
        assert_eq!(bar.days(), 3);
        assert_eq!(layout.row_of(&ItemId::new("1")), Some(0));
    }

    #[test]
    fn scenario_missing_planned_end_is_undated() {
        let mut item = ScheduleItem::new("9", "Site visit");
        item.planned_start = Some(ymd(2025, 1, 10));
        let items = vec![item];
        let layout = layout_timeline(&items, ymd(2025, 1, 15), TrackMode::DualTrack, &LayoutConfig::default());
        assert!(layout.rows.is_empty());
        assert_eq!(layout.undated.len(), 1);
        assert_eq!(layout.item_count(), 1);
    }

    #[test]
    fn today_only_item_is_one_column_wide() {
        let today = ymd(2025, 1, 15);
        let items = vec![ScheduleItem::new("t", "Today").with_planned(today, today)];
        let config = LayoutConfig::default().with_column_width(30.0);
        let layout = layout_timeline(&items, today, TrackMode::SingleTrack, &config);
        assert_eq!(layout.rows[0].planned.unwrap().width_px, 30.0);
    }

    #[test]
    fn scenario_dual_track_bars_are_independent() {
        let items = vec![ScheduleItem::new("x", "Excavation")
            .with_planned(ymd(2025, 1, 1), ymd(2025, 1, 5))
            .with_actual(ymd(2025, 1, 2), ymd(2025, 1, 8))];
        let layout = layout_timeline(&items, ymd(2025, 1, 15), TrackMode::DualTrack, &LayoutConfig::default());
        let row = &layout.rows[0];
        let planned = row.planned.unwrap();
        let actual = row.actual.unwrap();
        assert_ne!(planned.left_px, actual.left_px);
        assert_ne!(planned.width_px, actual.width_px);
        assert_eq!(actual.left_px - planned.left_px, 44.0);
        assert_eq!(planned.days(), 5);
        assert_eq!(actual.days(), 7);
        assert!(actual.right_px() <= layout.grid.total_width());
    }

    #[test]
    fn single_track_never_has_actual_bar() {
        let items = vec![ScheduleItem::new("x", "Excavation")
            .with_planned(ymd(2025, 1, 1), ymd(2025, 1, 5))
            .with_actual(ymd(2025, 1, 2), ymd(2025, 1, 8))];
        let layout = layout_timeline(&items, ymd(2025, 1, 15), TrackMode::SingleTrack, &LayoutConfig::default());
        assert_eq!(layout.rows[0].actual, None);
    }

    #[test]
    fn partial_actual_dates_give_no_actual_bar() {
        let mut item = ScheduleItem::new("x", "Excavation").with_planned(ymd(2025, 1, 1), ymd(2025, 1, 5));
        item.actual_start = Some(ymd(2025, 1, 3));
        let items = vec![item];
        let layout = layout_timeline(&items, ymd(2025, 1, 15), TrackMode::DualTrack, &LayoutConfig::default());
        assert!(layout.rows[0].planned.is_some());
        assert_eq!(layout.rows[0].actual, None);
    }

    #[test]
    fn inverted_planned_range_stays_listed_without_bar() {
        let items = mixed_items();
        let layout = layout_timeline(&items, ymd(2025, 1, 15), TrackMode::SingleTrack, &LayoutConfig::default());
        let idx = layout.row_of(&ItemId::new("d")).unwrap();
        assert_eq!(layout.rows[idx].planned, None);
    }

    #[test]
    fn markers_follow_status() {
        let items = vec![
            ScheduleItem::new("1", "Done")
                .with_planned(ymd(2025, 1, 1), ymd(2025, 1, 2))
                .with_status(StatusCode::Done),
            ScheduleItem::new("2", "Odd")
                .with_planned(ymd(2025, 1, 3), ymd(2025, 1, 4))
                .with_status(StatusCode::parse("waiting-on-client")),
        ];
        let layout = layout_timeline(&items, ymd(2025, 1, 15), TrackMode::SingleTrack, &LayoutConfig::default());
        assert_eq!(layout.rows[0].marker, StatusCode::Done.marker());
        assert_eq!(layout.rows[1].marker, StatusMarker::NEUTRAL);
    }

    #[test]
    fn recomputing_yields_the_same_layout() {
        let items = mixed_items();
        let config = LayoutConfig::default();
        let a = layout_timeline(&items, ymd(2025, 1, 15), TrackMode::DualTrack, &config);
        let b = layout_timeline(&items, ymd(2025, 1, 15), TrackMode::DualTrack, &config);
        assert_eq!(a.range, b.range);
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.undated, b.undated);
    }
}
