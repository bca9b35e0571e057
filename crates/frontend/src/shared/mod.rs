pub mod api_utils;
pub mod cache;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod request_guard;
pub mod saved_queries;
