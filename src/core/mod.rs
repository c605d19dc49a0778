// Core business logic module
pub mod config;
pub mod runtime;
pub mod torch_probe;

// Re-exports for convenience
pub use config::Config;
pub use runtime::{Accelerator, AcceleratorProperties, AcceleratorRuntime, RuntimeInfo};
pub use torch_probe::TorchProbe;
