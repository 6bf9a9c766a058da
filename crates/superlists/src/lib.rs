pub mod config;
pub mod error;
pub mod lists;
pub mod telemetry;
