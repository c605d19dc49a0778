// Command handlers module
pub mod check;
pub mod driver;
pub mod version;

// Re-exports for cleaner imports
pub use check::{execute as check, CheckOutcome};
pub use driver::execute as driver;
pub use version::execute as version;
