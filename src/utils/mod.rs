pub mod error;
pub mod logging;

pub use error::{WatcherError, WatcherResult};
pub use logging::init_logging;
