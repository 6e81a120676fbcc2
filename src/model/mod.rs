pub mod item;
pub mod schedule;

pub use item::{ItemId, ScheduleItem, StatusCode, StatusMarker};
pub use schedule::Schedule;
