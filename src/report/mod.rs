//! Dashboard reports and data export.

pub mod dashboard;
pub mod export;
pub mod generator;

pub use dashboard::{DashboardReport, ReportOptions};
pub use export::{export_members, ExportError};
pub use generator::{
    generate_json_report, generate_markdown_report, member_detail, members_table_markdown,
};
