//! Nginx access log watcher for blue/green deployments
//!
//! Tails the nginx access log, tracks which upstream pool is serving
//! traffic, and raises Slack alerts on unexpected failover or elevated
//! error rates.

pub mod alert;
pub mod config;
pub mod monitoring;
pub mod shutdown;
pub mod utils;
