use std::io::Write;

use crate::core::runtime::AcceleratorRuntime;
use crate::error::{CheckCudaError, Result};
use crate::ui::report::{write_not_installed, write_report};

/// How a check run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// CUDA is usable from the runtime
    Working,
    /// Runtime present but no usable accelerator
    NotWorking,
    /// Runtime could not be acquired
    NotInstalled,
}

impl CheckOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            CheckOutcome::Working | CheckOutcome::NotWorking => 0,
            CheckOutcome::NotInstalled => 1,
        }
    }
}

/// Probe the runtime once and write the status report to `out`.
///
/// A missing runtime is reported as [`CheckOutcome::NotInstalled`]; any other
/// probe failure is returned as an error.
pub fn execute<W: Write>(runtime: &dyn AcceleratorRuntime, out: &mut W) -> Result<CheckOutcome> {
    match runtime.probe() {
        Ok(info) => {
            write_report(out, &info)?;
            if info.accelerator.is_available() {
                Ok(CheckOutcome::Working)
            } else {
                Ok(CheckOutcome::NotWorking)
            }
        }
        Err(CheckCudaError::RuntimeNotInstalled(reason)) => {
            log::debug!("Runtime not acquired: {}", reason);
            write_not_installed(out)?;
            Ok(CheckOutcome::NotInstalled)
        }
        Err(e) => Err(e),
    }
}
