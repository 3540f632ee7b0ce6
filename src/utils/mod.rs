//! Utility modules

pub mod logging;
pub mod path;

pub use logging::{init_logging, LogLevel, LoggingConfig};
