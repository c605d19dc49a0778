use std::io::{self, Write};

use crate::error::Result;
use crate::platform::{query_driver, DriverInfo};
use crate::ui::formatters::format_gib;

/// Print what the NVIDIA driver reports, next to the runtime's view.
///
/// NVML trouble is reported in the section itself; only a failed write is an error.
pub fn execute<W: Write>(out: &mut W) -> Result<()> {
    write_driver_section(out, query_driver())?;
    Ok(())
}

pub fn write_driver_section<W: Write>(out: &mut W, driver: Result<DriverInfo>) -> io::Result<()> {
    let info = match driver {
        Ok(info) => info,
        Err(e) => {
            writeln!(out, "NVIDIA Driver Check: {}", e)?;
            return out.flush();
        }
    };

    writeln!(out, "NVIDIA Driver Check")?;
    writeln!(
        out,
        "Driver Version: {}",
        info.driver_version.as_deref().unwrap_or("unknown")
    )?;
    match info.cuda_driver_version {
        Some((major, minor)) => writeln!(out, "CUDA Driver Version: {}.{}", major, minor)?,
        None => writeln!(out, "CUDA Driver Version: unknown")?,
    }

    if info.gpus.is_empty() {
        writeln!(out, "Driver GPUs: none")?;
    }
    for gpu in &info.gpus {
        let memory = gpu
            .memory_total_bytes
            .map(|bytes| format!("{} GB", format_gib(bytes)))
            .unwrap_or_else(|| "unknown memory".to_string());
        let compute = gpu
            .cuda_compute_capability
            .map(|(major, minor)| format!("{}.{}", major, minor))
            .unwrap_or_else(|| "unknown".to_string());
        writeln!(
            out,
            "Driver GPU {}: {} ({}, compute {})",
            gpu.index, gpu.name, memory, compute
        )?;
    }

    out.flush()
}
