pub mod config;
pub mod dispatch;
pub mod freshness;
