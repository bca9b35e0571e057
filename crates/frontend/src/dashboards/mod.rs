pub mod d100_sales_overview;
pub mod d101_query_builder;

pub use d100_sales_overview::ui::SalesOverviewDashboard;
pub use d101_query_builder::ui::QueryBuilderDashboard;
