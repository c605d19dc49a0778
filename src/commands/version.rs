use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("check-cuda version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
