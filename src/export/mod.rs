pub mod workbook;

pub use workbook::{build_workbook, candidates, group_order, project_rows, RosterRow};
