use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the Python interpreter to probe
pub const PYTHON_ENV_VAR: &str = "CHECK_CUDA_PYTHON";

/// Interpreters looked up on PATH, in order
const DEFAULT_INTERPRETERS: [&str; 2] = ["python3", "python"];

#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Interpreter given on the command line
    pub python: Option<PathBuf>,
    /// Also print the NVML driver view
    pub driver: bool,
}

impl Config {
    pub fn new(python: Option<PathBuf>, driver: bool) -> Self {
        Self { python, driver }
    }

    /// Interpreter to probe: explicit flag, then `CHECK_CUDA_PYTHON`, then PATH.
    ///
    /// Returns `None` when no interpreter can be found at all.
    pub fn resolve_python(&self) -> Option<PathBuf> {
        if let Some(python) = &self.python {
            return Some(locate(python));
        }

        if let Some(python) = env::var_os(PYTHON_ENV_VAR).filter(|v| !v.is_empty()) {
            log::debug!("Using interpreter from {}", PYTHON_ENV_VAR);
            return Some(locate(Path::new(&python)));
        }

        let found = DEFAULT_INTERPRETERS
            .iter()
            .find_map(|name| which::which(name).ok());
        if found.is_none() {
            log::debug!("No Python interpreter found on PATH");
        }
        found
    }
}

/// Bare command names are looked up on PATH, anything with a separator is used as-is
fn locate(python: &Path) -> PathBuf {
    if python.components().count() > 1 {
        return python.to_path_buf();
    }
    which::which(python).unwrap_or_else(|_| python.to_path_buf())
}
