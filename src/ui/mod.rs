// UI and formatting module

pub mod formatters;
pub mod report;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_capability, format_gib, format_optional, python_bool};
pub use report::{write_not_installed, write_report};
