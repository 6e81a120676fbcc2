use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::dates::format_calendar_date;
use crate::error::{ScheduleError, ScheduleResult};
use crate::model::ScheduleItem;

const HEADER: [&str; 8] = [
    "Id",
    "Task Label",
    "Status",
    "Planned Start",
    "Planned End",
    "Actual Start",
    "Actual End",
    "Project",
];

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(format_calendar_date).unwrap_or_default()
}

/// Write items as semicolon-delimited CSV matching the import format.
///
/// Dates are `YYYY-MM-DD`; missing dates are empty cells.
/// Returns the number of items written.
pub fn write_csv<W: Write>(items: &[ScheduleItem], out: W) -> ScheduleResult<usize> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    wtr.write_record(HEADER)?;
    for item in items {
        wtr.write_record([
            item.id.as_str(),
            &item.label,
            item.status.as_str(),
            &date_cell(item.planned_start),
            &date_cell(item.planned_end),
            &date_cell(item.actual_start),
            &date_cell(item.actual_end),
            item.project.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(items.len())
}

/// Export items to a CSV file.
pub fn export_csv(items: &[ScheduleItem], path: &Path) -> ScheduleResult<usize> {
    let file = std::fs::File::create(path).map_err(|e| ScheduleError::io(path, e))?;
    let count = write_csv(items, file)?;
    tracing::info!(path = %path.display(), count, "CSV exported");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_import::import_csv_str;
    use crate::model::StatusCode;

    #[test]
    fn writes_empty_cells_for_missing_dates() {
        let items = vec![
            ScheduleItem::new("1", "Survey")
                .with_planned(
                    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
                )
                .with_status(StatusCode::InReview),
            ScheduleItem::new("2", "Quote"),
        ];
        let mut buf = Vec::new();
        assert_eq!(write_csv(&items, &mut buf).unwrap(), 2);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Id;Task Label;Status;Planned Start;Planned End;Actual Start;Actual End;Project");
        assert_eq!(lines[1], "1;Survey;in-review;2025-01-10;2025-01-12;;;");
        assert_eq!(lines[2], "2;Quote;pending;;;;;");
    }

    #[test]
    fn export_is_readable_by_import() {
        let items = vec![ScheduleItem::new("a1", "Roofing; phase 2")
            .with_planned(
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            )
            .with_actual(
                NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            )];
        let mut buf = Vec::new();
        write_csv(&items, &mut buf).unwrap();
        let (back, skipped) = import_csv_str(&String::from_utf8(buf).unwrap()).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(back, items);
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let count = export_csv(&[ScheduleItem::new("1", "Paint")], &path).unwrap();
        assert_eq!(count, 1);
        assert!(std::fs::read_to_string(&path).unwrap().contains("Paint"));
    }
}
