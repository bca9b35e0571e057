//! Contracts for the sales analytics API and the advanced query mode.

pub mod dashboard;
pub mod query;
pub mod result;
pub mod saved;

pub use dashboard::*;
pub use query::*;
pub use result::*;
pub use saved::*;
