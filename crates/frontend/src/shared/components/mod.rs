pub mod result_table;
pub mod sql_viewer;
pub mod stat_card;
pub mod table;
