//! Runtime configuration loaded from the environment

pub mod watcher_config;

pub use watcher_config::{ConfigError, WatcherConfig};
