use crate::error::{CheckCudaError, Result};

#[cfg(feature = "nvml")]
use nvml_wrapper::Nvml;

/// One GPU as the NVIDIA driver sees it
#[derive(Debug, Clone, PartialEq)]
pub struct DriverGpu {
    pub index: u32,
    pub name: String,
    pub memory_total_bytes: Option<u64>,
    pub cuda_compute_capability: Option<(u32, u32)>,
}

/// Driver-level view of the machine, independent of any Python runtime
#[derive(Debug, Clone, PartialEq)]
pub struct DriverInfo {
    pub driver_version: Option<String>,
    /// Highest CUDA version the driver supports as (major, minor)
    pub cuda_driver_version: Option<(u32, u32)>,
    pub gpus: Vec<DriverGpu>,
}

/// Query the NVIDIA driver through NVML (the library behind nvidia-smi)
///
/// # Returns
/// * `Ok(DriverInfo)` - Driver version and every visible GPU
/// * `Err(CheckCudaError)` - If NVML cannot be initialized (no driver, or feature disabled)
#[cfg(feature = "nvml")]
pub fn query_driver() -> Result<DriverInfo> {
    let nvml = Nvml::init().map_err(|e| {
        log::debug!("NVML init failed: {}", e);
        CheckCudaError::nvml_unavailable(e.to_string())
    })?;

    let driver_version = nvml.sys_driver_version().ok();
    let cuda_driver_version = nvml
        .sys_cuda_driver_version()
        .ok()
        .map(split_cuda_version);

    let count = nvml.device_count().map_err(|e| {
        CheckCudaError::nvml_unavailable(format!("failed to count devices: {}", e))
    })?;

    let mut gpus = Vec::with_capacity(count as usize);
    for index in 0..count {
        let device = match nvml.device_by_index(index) {
            Ok(device) => device,
            Err(e) => {
                log::warn!("Skipping NVIDIA device {}: {}", index, e);
                continue;
            }
        };

        gpus.push(DriverGpu {
            index,
            name: device
                .name()
                .unwrap_or_else(|_| "Unknown NVIDIA GPU".to_string()),
            memory_total_bytes: device.memory_info().ok().map(|m| m.total),
            cuda_compute_capability: device
                .cuda_compute_capability()
                .map(|cc| (cc.major as u32, cc.minor as u32))
                .ok(),
        });
    }

    Ok(DriverInfo {
        driver_version,
        cuda_driver_version,
        gpus,
    })
}

/// Fallback when NVML feature is not enabled
#[cfg(not(feature = "nvml"))]
pub fn query_driver() -> Result<DriverInfo> {
    Err(CheckCudaError::nvml_unavailable(
        "feature not enabled, recompile with --features nvml",
    ))
}

/// NVML encodes CUDA versions as 1000 * major + 10 * minor (12020 -> 12.2)
pub fn split_cuda_version(raw: i32) -> (u32, u32) {
    let raw = raw.max(0) as u32;
    (raw / 1000, (raw % 1000) / 10)
}
