//! Capability-query seam over the numerical runtime.
//!
//! The report only ever needs a handful of accessor values, so the runtime is
//! reduced to one call that either yields a [`RuntimeInfo`] snapshot or fails
//! with [`CheckCudaError::RuntimeNotInstalled`](crate::error::CheckCudaError).

use crate::error::Result;

/// Properties of the selected accelerator, only ever queried when CUDA is available.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceleratorProperties {
    /// CUDA version PyTorch was built against (`torch.version.cuda`)
    pub cuda_version: Option<String>,
    pub cudnn_version: Option<u32>,
    pub device_count: u32,
    pub current_device: u32,
    /// Name of device 0
    pub device_name: String,
    /// Total memory of device 0
    pub total_memory_bytes: u64,
    /// Compute capability of device 0 as (major, minor)
    pub compute_capability: (u32, u32),
}

/// Accelerator availability as reported by the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Accelerator {
    Available(AcceleratorProperties),
    Unavailable {
        /// Configured CUDA build, `None` for CPU-only builds
        cuda_build: Option<String>,
    },
}

impl Accelerator {
    pub fn is_available(&self) -> bool {
        matches!(self, Accelerator::Available(_))
    }
}

/// Snapshot of an acquired runtime
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeInfo {
    /// Runtime version string (`torch.__version__`)
    pub version: String,
    pub accelerator: Accelerator,
}

/// Something that can be asked whether GPU acceleration works
pub trait AcceleratorRuntime {
    /// Acquire the runtime and query it once.
    fn probe(&self) -> Result<RuntimeInfo>;
}
