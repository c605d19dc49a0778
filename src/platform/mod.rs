// Platform-specific code module

pub mod nvidia_nvml;

// Re-exports for cleaner imports
pub use nvidia_nvml::{query_driver, DriverGpu, DriverInfo};
