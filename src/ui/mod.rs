pub mod gantt_chart;
pub mod item_editor;
pub mod item_table;
pub mod theme;
