mod dashboard;
mod field_palette;
mod filter_rows;

pub use dashboard::QueryBuilderDashboard;
