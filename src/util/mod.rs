//! Utility modules for solharvest

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
