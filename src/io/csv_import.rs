use std::path::Path;

use chrono::NaiveDate;

use crate::dates::parse_loose_date;
use crate::error::{ScheduleError, ScheduleResult};
use crate::model::{ItemId, ScheduleItem, StatusCode};

/// Columns we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Label,
    Status,
    PlannedStart,
    PlannedEnd,
    ActualStart,
    ActualEnd,
    Project,
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_col(normalized: &str) -> Option<Column> {
    match normalized {
        "id" | "taskid" | "uuid" => Some(Column::Id),

        "name" | "task" | "tasklabel" | "taskname" | "label" | "title" | "activity" => {
            Some(Column::Label)
        }

        "status" | "statuscode" | "state" | "stage" | "estado" => Some(Column::Status),

        "start" | "startdate" | "plannedstart" | "plannedstartdate" | "begin" | "fechainicio" => {
            Some(Column::PlannedStart)
        }

        "end" | "enddate" | "plannedend" | "plannedenddate" | "due" | "duedate" | "finish"
        | "fechafin" => Some(Column::PlannedEnd),

        "actualstart" | "actualstartdate" | "startedon" | "fechainicioreal" => {
            Some(Column::ActualStart)
        }

        "actualend" | "actualenddate" | "completedon" | "finishedon" | "fechafinreal" => {
            Some(Column::ActualEnd)
        }

        "project" | "projectname" | "proyecto" => Some(Column::Project),

        _ => None,
    }
}

/// Parse an optional date cell. Blank is `None`; an unreadable value is also
/// `None` but logged, so the row still imports (as undated if it was a
/// planned date).
fn date_cell(raw: Option<&str>, row: usize, column: &str) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let parsed = parse_loose_date(raw);
    if parsed.is_none() {
        tracing::warn!(row, column, value = raw, "unreadable date, leaving it empty");
    }
    parsed
}

/// Import schedule items from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column headers
/// flexibly. Only a label column is required; every date column is optional
/// and rows with missing dates come through as undated items.
/// Returns `(items, skipped_count)` on success.
pub fn import_csv(path: &Path) -> ScheduleResult<(Vec<ScheduleItem>, usize)> {
    let content = std::fs::read_to_string(path).map_err(|e| ScheduleError::io(path, e))?;
    import_csv_str(&content)
}

/// Same as [`import_csv`] over in-memory text.
pub fn import_csv_str(content: &str) -> ScheduleResult<(Vec<ScheduleItem>, usize)> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    if !col_map.contains(&Some(Column::Label)) {
        return Err(ScheduleError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut items: Vec<ScheduleItem> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping CSV row");
                skipped += 1;
                continue;
            }
        };

        let cell = |wanted: Column| {
            col_map
                .iter()
                .position(|c| *c == Some(wanted))
                .and_then(|idx| record.get(idx))
        };

        let label = match cell(Column::Label).filter(|s| !s.is_empty()) {
            Some(l) => l.to_string(),
            None => {
                tracing::warn!(row, "skipping CSV row without a label");
                skipped += 1;
                continue;
            }
        };

        let id = cell(Column::Id)
            .filter(|s| !s.is_empty())
            .map(ItemId::new)
            .unwrap_or_else(ItemId::generate);

        items.push(ScheduleItem {
            id,
            label,
            status: cell(Column::Status).map_or_else(StatusCode::unset, StatusCode::parse),
            planned_start: date_cell(cell(Column::PlannedStart), row, "planned start"),
            planned_end: date_cell(cell(Column::PlannedEnd), row, "planned end"),
            actual_start: date_cell(cell(Column::ActualStart), row, "actual start"),
            actual_end: date_cell(cell(Column::ActualEnd), row, "actual end"),
            project: cell(Column::Project)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        });
    }

    if items.is_empty() && skipped > 0 {
        return Err(ScheduleError::NoRows { skipped });
    }
    if items.is_empty() {
        return Err(ScheduleError::Empty);
    }

    tracing::info!(items = items.len(), skipped, "CSV imported");
    Ok((items, skipped))
}
