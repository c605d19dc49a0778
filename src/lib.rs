// check-cuda Library - Public API

// Re-export error types
pub mod error;
pub use error::{CheckCudaError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Config;
pub use crate::core::runtime::{Accelerator, AcceleratorProperties, AcceleratorRuntime, RuntimeInfo};

// Initialize logging. Records go to stderr so the report on stdout stays intact.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init();
}
