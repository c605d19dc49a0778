use std::fmt::Display;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Format a byte count as GiB with one decimal ("16.0")
pub fn format_gib(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / BYTES_PER_GIB)
}

/// Python spelling of a boolean
pub fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Value or Python's `None`
pub fn format_optional<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

/// Compute capability as a Python tuple ("(7, 5)")
pub fn format_capability((major, minor): (u32, u32)) -> String {
    format!("({}, {})", major, minor)
}
