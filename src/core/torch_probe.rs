// TorchProbe - asks a Python interpreter's PyTorch install about CUDA
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;

use crate::core::runtime::{Accelerator, AcceleratorProperties, AcceleratorRuntime, RuntimeInfo};
use crate::core::Config;
use crate::error::{CheckCudaError, Result};

/// Python snippet run with `python -c`; prints one marked JSON line
pub const PROBE_SCRIPT: &str = include_str!("probe.py");

/// Prefix of the line carrying the probe's JSON answer
pub const PROBE_MARKER: &str = "CHECK_CUDA_PROBE:";

/// Raw answer of the probe script
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    installed: bool,
    reason: Option<String>,
    version: Option<String>,
    #[serde(default)]
    cuda_available: bool,
    cuda_build: Option<String>,
    cudnn_version: Option<u32>,
    device_count: Option<u32>,
    current_device: Option<u32>,
    device_name: Option<String>,
    total_memory: Option<u64>,
    compute_capability: Option<(u32, u32)>,
}

/// Production runtime: PyTorch as seen by a Python interpreter
pub struct TorchProbe {
    python: Option<PathBuf>,
}

impl TorchProbe {
    pub fn new(config: &Config) -> Self {
        Self {
            python: config.resolve_python(),
        }
    }

    /// Probe a specific interpreter
    pub fn with_interpreter<P: Into<PathBuf>>(python: P) -> Self {
        Self {
            python: Some(python.into()),
        }
    }
}

impl AcceleratorRuntime for TorchProbe {
    fn probe(&self) -> Result<RuntimeInfo> {
        let python = self.python.as_ref().ok_or_else(|| {
            CheckCudaError::runtime_not_installed("no Python interpreter found on PATH")
        })?;

        log::debug!("Probing PyTorch with interpreter {:?}", python);

        let output = Command::new(python)
            .arg("-c")
            .arg(PROBE_SCRIPT)
            .output()
            .map_err(|e| {
                CheckCudaError::runtime_not_installed(format!(
                    "failed to run {:?}: {}",
                    python, e
                ))
            })?;

        log::debug!("Probe exited with {}", output.status);

        let stdout = String::from_utf8_lossy(&output.stdout);
        match find_probe_line(&stdout) {
            Some(line) => decode_probe_output(line),
            None => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(CheckCudaError::probe_failed(format!(
                    "{:?} exited with {} without a probe answer: {}",
                    python,
                    output.status,
                    last_line(&stderr).unwrap_or("no stderr output")
                )))
            }
        }
    }
}

/// Last marked line of the probe's stdout, without the marker
fn find_probe_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .rev()
        .find_map(|line| line.trim_end().strip_prefix(PROBE_MARKER))
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().rev().map(str::trim).find(|line| !line.is_empty())
}

/// Turn the probe's JSON answer into a [`RuntimeInfo`]
pub fn decode_probe_output(json: &str) -> Result<RuntimeInfo> {
    let raw: ProbeOutput = serde_json::from_str(json)?;

    if !raw.installed {
        return Err(CheckCudaError::runtime_not_installed(
            raw.reason.unwrap_or_else(|| "import torch failed".to_string()),
        ));
    }

    let version = require(raw.version, "version")?;

    let accelerator = if raw.cuda_available {
        Accelerator::Available(AcceleratorProperties {
            cuda_version: raw.cuda_build,
            cudnn_version: raw.cudnn_version,
            device_count: require(raw.device_count, "device_count")?,
            current_device: require(raw.current_device, "current_device")?,
            device_name: require(raw.device_name, "device_name")?,
            total_memory_bytes: require(raw.total_memory, "total_memory")?,
            compute_capability: require(raw.compute_capability, "compute_capability")?,
        })
    } else {
        // An empty build string counts as CPU-only, like Python's truthiness
        Accelerator::Unavailable {
            cuda_build: raw.cuda_build.filter(|build| !build.is_empty()),
        }
    };

    Ok(RuntimeInfo {
        version,
        accelerator,
    })
}

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        CheckCudaError::probe_failed(format!("probe answer is missing '{}'", field))
    })
}
