//! Text of the CUDA status report.
//!
//! Every line here is matched verbatim by existing docs and screenshots, so
//! wording, spacing and blank lines must not drift.

use std::io::{self, Write};

use crate::core::runtime::{Accelerator, AcceleratorProperties, RuntimeInfo};
use crate::ui::formatters::{format_capability, format_gib, format_optional, python_bool};

const SEPARATOR_WIDTH: usize = 70;

const INSTALL_COMMAND: &str =
    "pip install torch torchvision --index-url https://download.pytorch.org/whl/cu118";

const FIX_STEPS: &str = "HOW TO FIX:

1. Check if you have NVIDIA GPU:
   Run: nvidia-smi
   You should see your GPU listed

2. Install correct PyTorch version:
   For Python 3.13:
     pip uninstall torch torchvision
     pip install torch torchvision --index-url https://download.pytorch.org/whl/cu118

   For Python 3.8-3.12:
     pip uninstall torch torchvision
     pip install torch torchvision --index-url https://download.pytorch.org/whl/cu121

3. Restart your terminal/IDE and run this script again
";

/// Guidance printed when the runtime cannot be acquired
pub fn write_not_installed<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "ERROR: PyTorch not installed!")?;
    writeln!(out, "Install with: {}", INSTALL_COMMAND)?;
    out.flush()
}

/// Full status report for an acquired runtime
pub fn write_report<W: Write>(out: &mut W, info: &RuntimeInfo) -> io::Result<()> {
    writeln!(out, "CUDA Status Check")?;
    writeln!(out)?;
    writeln!(out, "PyTorch Version: {}", info.version)?;
    writeln!(
        out,
        "CUDA Available: {}",
        python_bool(info.accelerator.is_available())
    )?;

    match &info.accelerator {
        Accelerator::Available(props) => write_working(out, props)?,
        Accelerator::Unavailable { cuda_build } => write_not_working(out, cuda_build.as_deref())?,
    }

    // Report always ends with two blank lines
    writeln!(out)?;
    writeln!(out)?;
    out.flush()
}

fn write_working<W: Write>(out: &mut W, props: &AcceleratorProperties) -> io::Result<()> {
    writeln!(
        out,
        "CUDA Version (PyTorch): {}",
        format_optional(props.cuda_version.as_deref())
    )?;
    writeln!(out, "cuDNN Version: {}", format_optional(props.cudnn_version))?;
    writeln!(out, "GPU Count: {}", props.device_count)?;
    writeln!(out, "Current GPU: {}", props.current_device)?;
    writeln!(out, "GPU Name: {}", props.device_name)?;
    writeln!(out, "GPU Memory: {} GB", format_gib(props.total_memory_bytes))?;
    writeln!(
        out,
        "GPU Compute Capability: {}",
        format_capability(props.compute_capability)
    )?;
    writeln!(out, "RESULT: CUDA is WORKING - You can train on GPU")
}

fn write_not_working<W: Write>(out: &mut W, cuda_build: Option<&str>) -> io::Result<()> {
    writeln!(
        out,
        "PyTorch CUDA Build: {}",
        cuda_build.unwrap_or("CPU-only version")
    )?;
    writeln!(out, "RESULT: CUDA is NOT WORKING - Training will use CPU")?;
    writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    writeln!(out)?;
    writeln!(out, "Expected training speed: VERY SLOW")?;
    write!(out, "{}", FIX_STEPS)
}
