use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{ItemId, ScheduleItem};

/// A batch of schedule items loaded from the task store, plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    #[serde(alias = "tasks")]
    pub items: Vec<ScheduleItem>,
    /// Last change to the batch: the snapshot's own stamp on load, then
    /// bumped by every edit.
    #[serde(default = "Utc::now", alias = "loaded_at")]
    pub modified: DateTime<Utc>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            name: "Untitled Schedule".to_string(),
            items: Vec::new(),
            modified: Utc::now(),
        }
    }
}

impl Schedule {
    pub fn new(name: impl Into<String>, items: Vec<ScheduleItem>) -> Self {
        Self {
            name: name.into(),
            items,
            ..Default::default()
        }
    }

    pub fn find(&self, id: &ItemId) -> Option<&ScheduleItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn find_mut(&mut self, id: &ItemId) -> Option<&mut ScheduleItem> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    /// Mark the batch as modified now.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
