use chrono::Datelike;
use egui::{Color32, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::model::{ItemId, ScheduleItem};
use crate::timeline::{Bar, DayGrid, ItemRow, TimelineLayout, TrackMode, ViewportController};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// Which of an item's two bars a rect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Track {
    Planned,
    Actual,
}

/// Render the timeline (central panel).
///
/// Clicking a bar calls `on_edit` with its item; the chart never changes
/// schedule data itself. Pending scroll requests on `viewport` are applied
/// here and the resulting scroll position is reported back to it.
pub fn show_gantt_chart(
    layout: &TimelineLayout<'_>,
    viewport: &mut ViewportController,
    selected: Option<&ItemId>,
    ui: &mut Ui,
    mut on_edit: impl FnMut(&ScheduleItem),
) {
    let grid = &layout.grid;
    let selected_row = selected.and_then(|id| layout.row_of(id));
    let available = ui.available_size();
    let chart_width = grid.total_width().max(available.x);
    let chart_height =
        HEADER_HEIGHT + (layout.rows.len() as f32 * (ROW_HEIGHT + ROW_PADDING)) + 40.0;

    viewport.initial_center(grid, layout.today, available.x);
    let scroll_to = pending_scroll_offset(viewport, ui.ctx());

    let mut area = egui::ScrollArea::both()
        .id_salt("gantt-scroll")
        .auto_shrink([false, false]);
    if let Some(x) = scroll_to {
        area = area.horizontal_scroll_offset(x);
    }

    let output = area.show(ui, |ui| {
        let (response, painter) = ui.allocate_painter(
            Vec2::new(chart_width, chart_height.max(available.y)),
            Sense::hover(),
        );
        let origin = response.rect.min;
        let canvas_height = response.rect.height();

        painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

        // Only the columns under the clip rect are painted.
        let clip = ui.clip_rect();
        let columns = grid.visible_columns(clip.left() - origin.x, clip.right() - origin.x);

        draw_weekend_shading(&painter, origin, grid, columns, canvas_height);
        draw_row_backgrounds(&painter, origin, layout, chart_width, selected_row);
        draw_timeline_header(&painter, origin, grid, columns, canvas_height);

        for (i, row) in layout.rows.iter().enumerate() {
            let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING) + ROW_PADDING;
            let is_selected = selected_row == Some(i);

            for (track, rect) in bar_rects(row, layout.mode, origin, y) {
                draw_bar(&painter, row, track, layout.mode, rect, is_selected);

                let bar_response = ui
                    .interact(
                        rect,
                        ui.make_persistent_id(("gantt-bar", row.item.id.as_str(), track)),
                        Sense::click(),
                    )
                    .on_hover_cursor(egui::CursorIcon::PointingHand)
                    .on_hover_ui(|ui| bar_tooltip(ui, row.item));
                if bar_response.clicked() {
                    on_edit(row.item);
                }
            }
        }

        draw_today_line(&painter, origin, layout, canvas_height);
    });

    viewport.observe_offset(output.state.offset.x);
}

/// Offset to force on the scroll area this frame, animating smooth requests.
fn pending_scroll_offset(viewport: &mut ViewportController, ctx: &egui::Context) -> Option<f32> {
    let anim_id = Id::new("gantt-scroll-animation");
    match viewport.pending() {
        Some(req) => {
            let secs = if req.smooth { theme::SCROLL_ANIMATION_SECS } else { 0.0 };
            let x = ctx.animate_value_with_time(anim_id, req.offset_px, secs);
            if (x - req.offset_px).abs() < 0.5 {
                viewport.finish_pending();
            }
            Some(x)
        }
        None => {
            // Keep the animation anchored to wherever the user scrolled to.
            ctx.animate_value_with_time(anim_id, viewport.offset_px(), 0.0);
            None
        }
    }
}

/// Screen rects for the bars of one row. Planned fills the row in
/// single-track mode; in dual-track mode it takes the top half and the actual
/// bar the bottom half.
fn bar_rects(row: &ItemRow<'_>, mode: TrackMode, origin: Pos2, y: f32) -> Vec<(Track, Rect)> {
    let inset = theme::BAR_INSET;
    let to_rect = |bar: &Bar, top: f32, height: f32| {
        Rect::from_min_size(
            Pos2::new(origin.x + bar.left_px, top),
            Vec2::new(bar.width_px, height),
        )
    };

    match mode {
        TrackMode::SingleTrack => row
            .planned
            .iter()
            .map(|bar| (Track::Planned, to_rect(bar, y + inset, ROW_HEIGHT - inset * 2.0)))
            .collect(),
        TrackMode::DualTrack => {
            let half = (ROW_HEIGHT - inset * 2.0 - theme::TRACK_GAP) / 2.0;
            let planned = row
                .planned
                .iter()
                .map(|bar| (Track::Planned, to_rect(bar, y + inset, half)));
            let actual = row.actual.iter().map(|bar| {
                (
                    Track::Actual,
                    to_rect(bar, y + inset + half + theme::TRACK_GAP, half),
                )
            });
            planned.chain(actual).collect()
        }
    }
}

fn draw_row_backgrounds(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout<'_>,
    width: f32,
    selected_row: Option<usize>,
) {
    for i in 0..layout.rows.len() {
        let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
        let row_rect = Rect::from_min_size(
            Pos2::new(origin.x, y),
            Vec2::new(width, ROW_HEIGHT + ROW_PADDING),
        );
        let fill = if selected_row == Some(i) {
            theme::BG_SELECTED
        } else if i % 2 == 0 {
            theme::BG_ROW_EVEN
        } else {
            Color32::TRANSPARENT
        };
        painter.rect_filled(row_rect, 0.0, fill);
        painter.line_segment(
            [
                Pos2::new(origin.x, y + ROW_HEIGHT + ROW_PADDING),
                Pos2::new(origin.x + width, y + ROW_HEIGHT + ROW_PADDING),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_weekend_shading(
    painter: &egui::Painter,
    origin: Pos2,
    grid: &DayGrid,
    (first, last): (i64, i64),
    height: f32,
) {
    let w = grid.column_width();
    for (i, date) in grid.days_between(first, last) {
        if date.weekday().num_days_from_monday() >= 5 {
            let x = origin.x + grid.to_pixel_offset(i);
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, origin.y), Vec2::new(w, height)),
                0.0,
                theme::WEEKEND_SHADE,
            );
        }
    }
}

/// Month names on the top line, day numbers below, grid lines down the canvas.
/// Only columns `first..=last` are drawn.
fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    grid: &DayGrid,
    (first, last): (i64, i64),
    height: f32,
) {
    let width = grid.total_width();
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let show_day_numbers = grid.column_width() >= 18.0;
    for (i, date) in grid.days_between(first, last) {
        let x = origin.x + grid.to_pixel_offset(i);
        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        if show_day_numbers {
            let is_weekend = date.weekday().num_days_from_monday() >= 5;
            painter.text(
                Pos2::new(x + grid.column_width() / 2.0, origin.y + 31.0),
                egui::Align2::CENTER_CENTER,
                date.format("%d").to_string(),
                theme::font_sub(),
                if is_weekend {
                    theme::TEXT_DIM
                } else {
                    theme::TEXT_SECONDARY
                },
            );
        }
    }

    for span in grid.month_spans_between(first, last) {
        let x = origin.x + grid.to_pixel_offset(span.first_index);
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + HEADER_HEIGHT)],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );
        let span_rect = Rect::from_min_size(
            Pos2::new(x, origin.y),
            Vec2::new(grid.to_pixel_offset(span.days), HEADER_HEIGHT / 2.0),
        );
        // Keep the month name on screen while its span is partly scrolled off.
        let label_x = x.max(origin.x + grid.to_pixel_offset(first));
        painter.with_clip_rect(span_rect).text(
            Pos2::new(label_x + 5.0, origin.y + 12.0),
            egui::Align2::LEFT_CENTER,
            span.label(),
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout<'_>,
    height: f32,
) {
    let Some(offset) = ViewportController::today_offset_px(&layout.grid, layout.today) else {
        return;
    };
    let x = origin.x + offset + layout.grid.column_width() / 2.0;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_bar(
    painter: &egui::Painter,
    row: &ItemRow<'_>,
    track: Track,
    mode: TrackMode,
    rect: Rect,
    is_selected: bool,
) {
    let rounding = Rounding::same(theme::BAR_ROUNDING.min(rect.height() / 2.0));
    let fill = match (track, mode) {
        (Track::Actual, _) => theme::ACTUAL_BAR,
        (Track::Planned, TrackMode::DualTrack) => {
            row.marker.color.gamma_multiply(theme::PLANNED_FADE_DUAL)
        }
        (Track::Planned, TrackMode::SingleTrack) => row.marker.color,
    };

    painter.rect_filled(rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(rect, rounding, fill);

    if is_selected {
        painter.rect_stroke(
            rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // The label goes on the planned bar only, clipped to its bounds.
    if track == Track::Planned && rect.width() > 30.0 {
        let text = format!("{} {}", row.marker.glyph, row.item.label);
        let galley = painter.layout_no_wrap(text, theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = rect.top() + (rect.height() - galley.size().y) / 2.0;
        painter
            .with_clip_rect(rect)
            .galley(Pos2::new(rect.left() + 6.0, text_y), galley, Color32::TRANSPARENT);
    }
}

fn bar_tooltip(ui: &mut Ui, item: &ScheduleItem) {
    let fmt = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "—".to_string())
    };
    ui.strong(&item.label);
    if let Some(project) = &item.project {
        ui.label(egui::RichText::new(project).color(theme::TEXT_SECONDARY));
    }
    let marker = item.status.marker();
    ui.label(egui::RichText::new(format!("{} {}", marker.glyph, item.status.label())).color(marker.color));
    ui.label(format!("Planned: {} → {}", fmt(item.planned_start), fmt(item.planned_end)));
    if item.actual_start.is_some() || item.actual_end.is_some() {
        ui.label(format!("Actual: {} → {}", fmt(item.actual_start), fmt(item.actual_end)));
    }
}
