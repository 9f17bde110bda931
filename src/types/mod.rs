pub mod anomaly;
pub mod breakdown;
pub mod clicks;
pub mod config;
