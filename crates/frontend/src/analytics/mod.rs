pub mod chart_bridge;
pub mod chart_data;
pub mod client;
pub mod error;
pub mod kpi;
pub mod query_builder;
pub mod result_simulator;
pub mod transport;

pub use client::AnalyticsClient;
pub use error::FetchError;
pub use query_builder::{Area, QueryBuilder};
