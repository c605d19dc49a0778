use std::io;
use thiserror::Error;

/// Custom error type for check-cuda
#[derive(Error, Debug)]
pub enum CheckCudaError {
    /// The runtime could not be acquired (no interpreter, or `import torch` failed)
    #[error("PyTorch runtime not installed: {0}")]
    RuntimeNotInstalled(String),

    #[error("Runtime probe failed: {0}")]
    ProbeFailed(String),

    #[error("NVML not available ({0})")]
    NvmlUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed probe output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for check-cuda
pub type Result<T> = std::result::Result<T, CheckCudaError>;

impl CheckCudaError {
    /// Create a runtime-not-installed error
    pub fn runtime_not_installed<S: Into<String>>(msg: S) -> Self {
        CheckCudaError::RuntimeNotInstalled(msg.into())
    }

    /// Create a probe failure error
    pub fn probe_failed<S: Into<String>>(msg: S) -> Self {
        CheckCudaError::ProbeFailed(msg.into())
    }

    /// Create an NVML-unavailable error
    pub fn nvml_unavailable<S: Into<String>>(msg: S) -> Self {
        CheckCudaError::NvmlUnavailable(msg.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckCudaError::RuntimeNotInstalled(_) => 1,
            _ => 2,
        }
    }
}
