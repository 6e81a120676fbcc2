use std::path::Path;

use crate::error::{ScheduleError, ScheduleResult};
use crate::model::{Schedule, ScheduleItem};

/// Save a schedule snapshot to a JSON file.
pub fn save_schedule(schedule: &Schedule, path: &Path) -> ScheduleResult<()> {
    let json = serde_json::to_string_pretty(schedule)?;
    std::fs::write(path, json).map_err(|e| ScheduleError::io(path, e))?;
    tracing::info!(path = %path.display(), items = schedule.items.len(), "schedule saved");
    Ok(())
}

/// Load a schedule snapshot from a JSON file.
///
/// Accepts either a full snapshot object or a bare array of task rows as
/// exported from the backend; the latter is named after the file.
pub fn load_schedule(path: &Path) -> ScheduleResult<Schedule> {
    let json = std::fs::read_to_string(path).map_err(|e| ScheduleError::io(path, e))?;
    let schedule = match serde_json::from_str::<Schedule>(&json) {
        Ok(schedule) => schedule,
        Err(snapshot_err) => match serde_json::from_str::<Vec<ScheduleItem>>(&json) {
            Ok(items) => Schedule::new(file_stem(path), items),
            Err(_) => return Err(snapshot_err.into()),
        },
    };
    tracing::info!(path = %path.display(), items = schedule.items.len(), "schedule loaded");
    Ok(schedule)
}

/// File name without extensions, for naming imported schedules.
pub fn file_stem(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .and_then(|s| s.split('.').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("Imported Schedule")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn save_and_reload_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.gantt.json");
        let schedule = Schedule::new(
            "Warehouse B",
            vec![
                ScheduleItem::new("1", "Survey").with_planned(
                    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
                ),
                ScheduleItem::new("2", "Quote"),
            ],
        );
        save_schedule(&schedule, &path).unwrap();
        let loaded = load_schedule(&path).unwrap();
        assert_eq!(loaded.name, "Warehouse B");
        assert_eq!(loaded.items, schedule.items);
    }

    #[test]
    fn bare_row_array_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"id": 7, "title": "Paint", "status": "done",
                 "planned_start": "2025-02-01T08:00:00-06:00", "planned_end": "2025-02-03"}]"#,
        )
        .unwrap();
        let loaded = load_schedule(&path).unwrap();
        assert_eq!(loaded.name, "tasks");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].planned_start, NaiveDate::from_ymd_opt(2025, 2, 1));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_schedule(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ScheduleError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn garbage_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"name\": 3}").unwrap();
        assert!(matches!(load_schedule(&path), Err(ScheduleError::Json(_))));
    }
}
