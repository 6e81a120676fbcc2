use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::dates::calendar_date_opt;

/// Opaque identifier of a schedule item, unique within one batch.
///
/// The backend hands out either UUIDs or integers; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id for rows that arrive without one.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ItemId(s),
            Raw::Int(n) => ItemId(n.to_string()),
        })
    }
}

/// Lifecycle label of a task. Only ever used to pick a marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusCode {
    #[default]
    Pending,
    InProgress,
    InReview,
    Done,
    Cancelled,
    /// Anything the backend sends that we don't recognise. Empty when the
    /// row carried no status at all.
    Other(String),
}

impl StatusCode {
    pub const KNOWN: [StatusCode; 5] = [
        StatusCode::Pending,
        StatusCode::InProgress,
        StatusCode::InReview,
        StatusCode::Done,
        StatusCode::Cancelled,
    ];

    /// Status of a row that arrived without one.
    pub fn unset() -> Self {
        StatusCode::Other(String::new())
    }

    /// Map a raw status string to a code. Case, spacing and separators are
    /// ignored; the Spanish labels used by the dashboard's backend are
    /// accepted alongside the English ones.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "pending" | "pendiente" | "todo" | "notstarted" | "new" => StatusCode::Pending,
            "inprogress" | "enprogreso" | "enproceso" | "active" | "started" => {
                StatusCode::InProgress
            }
            "inreview" | "review" | "enrevision" | "enrevisión" => StatusCode::InReview,
            "done" | "completed" | "complete" | "finished" | "completada" | "completado"
            | "terminada" => StatusCode::Done,
            "cancelled" | "canceled" | "cancelada" | "cancelado" => StatusCode::Cancelled,
            _ => StatusCode::Other(raw.trim().to_string()),
        }
    }

    /// Canonical wire form.
    pub fn as_str(&self) -> &str {
        match self {
            StatusCode::Pending => "pending",
            StatusCode::InProgress => "in-progress",
            StatusCode::InReview => "in-review",
            StatusCode::Done => "done",
            StatusCode::Cancelled => "cancelled",
            StatusCode::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusCode::Pending => "Pending",
            StatusCode::InProgress => "In progress",
            StatusCode::InReview => "In review",
            StatusCode::Done => "Done",
            StatusCode::Cancelled => "Cancelled",
            StatusCode::Other(raw) if raw.is_empty() => "No status",
            StatusCode::Other(raw) => raw,
        }
    }

    /// Display marker for this status. Unknown codes get the neutral marker.
    pub fn marker(&self) -> StatusMarker {
        match self {
            StatusCode::Pending => StatusMarker {
                color: Color32::from_rgb(158, 158, 158),
                glyph: egui_phosphor::regular::CIRCLE,
            },
            StatusCode::InProgress => StatusMarker {
                color: Color32::from_rgb(66, 133, 244),
                glyph: egui_phosphor::regular::CIRCLE_HALF,
            },
            StatusCode::InReview => StatusMarker {
                color: Color32::from_rgb(251, 140, 0),
                glyph: egui_phosphor::regular::EYE,
            },
            StatusCode::Done => StatusMarker {
                color: Color32::from_rgb(52, 168, 83),
                glyph: egui_phosphor::regular::CHECK_CIRCLE,
            },
            StatusCode::Cancelled => StatusMarker {
                color: Color32::from_rgb(229, 57, 53),
                glyph: egui_phosphor::regular::X_CIRCLE,
            },
            StatusCode::Other(_) => StatusMarker::NEUTRAL,
        }
    }
}

impl Serialize for StatusCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or_else(StatusCode::unset, StatusCode::parse))
    }
}

/// Color and icon drawn next to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMarker {
    pub color: Color32,
    pub glyph: &'static str,
}

impl StatusMarker {
    pub const NEUTRAL: StatusMarker = StatusMarker {
        color: Color32::from_rgb(120, 124, 138),
        glyph: egui_phosphor::regular::QUESTION,
    };
}

/// One schedulable task row as delivered by the task store.
///
/// Planned dates decide whether the item is plotted at all; actual dates are
/// only drawn in dual-track mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: ItemId,
    #[serde(alias = "name", alias = "title")]
    pub label: String,
    #[serde(default = "StatusCode::unset", alias = "statusCode")]
    pub status: StatusCode,
    #[serde(default, alias = "plannedStart", with = "calendar_date_opt")]
    pub planned_start: Option<NaiveDate>,
    #[serde(default, alias = "plannedEnd", with = "calendar_date_opt")]
    pub planned_end: Option<NaiveDate>,
    #[serde(default, alias = "actualStart", with = "calendar_date_opt")]
    pub actual_start: Option<NaiveDate>,
    #[serde(default, alias = "actualEnd", with = "calendar_date_opt")]
    pub actual_end: Option<NaiveDate>,
    /// Name of the parent project, joined in by the host for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl ScheduleItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            label: label.into(),
            status: StatusCode::default(),
            planned_start: None,
            planned_end: None,
            actual_start: None,
            actual_end: None,
            project: None,
        }
    }

    pub fn with_planned(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.planned_start = Some(start);
        self.planned_end = Some(end);
        self
    }

    pub fn with_actual(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.actual_start = Some(start);
        self.actual_end = Some(end);
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Both planned dates, if the item is dated.
    pub fn planned(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.planned_start.zip(self.planned_end)
    }

    /// Both actual dates, if present.
    pub fn actual(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.actual_start.zip(self.actual_end)
    }

    pub fn is_dated(&self) -> bool {
        self.planned().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_forgiving() {
        assert_eq!(StatusCode::parse("In Progress"), StatusCode::InProgress);
        assert_eq!(StatusCode::parse("in_progress"), StatusCode::InProgress);
        assert_eq!(StatusCode::parse("en-progreso"), StatusCode::InProgress);
        assert_eq!(StatusCode::parse("DONE"), StatusCode::Done);
        assert_eq!(StatusCode::parse("canceled"), StatusCode::Cancelled);
        assert_eq!(StatusCode::parse("  "), StatusCode::unset());
        assert_eq!(
            StatusCode::parse("blocked"),
            StatusCode::Other("blocked".to_string())
        );
    }

    #[test]
    fn unknown_status_gets_neutral_marker() {
        assert_eq!(
            StatusCode::Other("on-hold".into()).marker(),
            StatusMarker::NEUTRAL
        );
        for status in StatusCode::KNOWN {
            assert_ne!(status.marker(), StatusMarker::NEUTRAL);
        }
    }

    #[test]
    fn missing_status_is_neutral_not_pending() {
        for json in [
            r#"{"id": 1, "label": "A"}"#,
            r#"{"id": 2, "label": "B", "status": null}"#,
            r#"{"id": 3, "label": "C", "status": ""}"#,
        ] {
            let item: ScheduleItem = serde_json::from_str(json).unwrap();
            assert_eq!(item.status, StatusCode::unset(), "{json}");
            assert_eq!(item.status.marker(), StatusMarker::NEUTRAL);
            assert_eq!(item.status.label(), "No status");
        }
        assert_ne!(StatusCode::parse("pending").marker(), StatusMarker::NEUTRAL);
    }

    #[test]
    fn deserializes_backend_row() {
        let json = r#"{
            "id": 42,
            "name": "Pour foundation",
            "statusCode": "in-review",
            "plannedStart": "2025-01-10T00:00:00+00:00",
            "plannedEnd": "2025-01-12",
            "actual_start": null,
            "project": "Warehouse B"
        }"#;
        let item: ScheduleItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "42");
        assert_eq!(item.label, "Pour foundation");
        assert_eq!(item.status, StatusCode::InReview);
        assert_eq!(item.planned_start, NaiveDate::from_ymd_opt(2025, 1, 10));
        assert_eq!(item.planned_end, NaiveDate::from_ymd_opt(2025, 1, 12));
        assert_eq!(item.actual(), None);
        assert!(item.is_dated());
        assert_eq!(item.project.as_deref(), Some("Warehouse B"));
    }

    #[test]
    fn half_planned_item_is_undated() {
        let mut item = ScheduleItem::new("a", "Survey");
        item.planned_start = NaiveDate::from_ymd_opt(2025, 1, 1);
        assert!(!item.is_dated());
        assert_eq!(item.planned(), None);
    }
}
