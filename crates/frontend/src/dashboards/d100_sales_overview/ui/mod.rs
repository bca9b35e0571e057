mod analysis;
mod dashboard;

pub use dashboard::SalesOverviewDashboard;
