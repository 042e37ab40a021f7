pub mod categories;
pub mod config;
pub mod day;
pub mod list;
pub mod month;
pub mod week;
