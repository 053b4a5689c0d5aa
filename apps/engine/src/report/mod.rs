// Render and export payloads: chart specs, the spreadsheet table, the
// positioned document layout. Drawing and file writing stay with the host;
// this module only builds what those targets consume.

pub mod chart;
pub mod document;
pub mod spreadsheet;

/// File-name stem shared by every export, so downloads sort together.
pub const EXPORT_FILE_STEM: &str = "QPWONSpin_Report";
