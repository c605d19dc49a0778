use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::io;
use std::path::PathBuf;
use std::process;

// Use modules from the library
use check_cuda::commands::{self, CheckOutcome};
use check_cuda::core::{Config, TorchProbe};

fn main() -> Result<()> {
    check_cuda::init_logging();

    let matches = Command::new("check-cuda")
        .about("Checks whether PyTorch can train on the GPU and explains how to fix it when it cannot")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("python")
                .long("python")
                .value_name("PATH")
                .help("Python interpreter to probe (default: $CHECK_CUDA_PYTHON, then python3/python on PATH)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("driver")
                .long("driver")
                .help("Also report what the NVIDIA driver sees (via NVML)")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    let config = Config::new(
        matches.get_one::<PathBuf>("python").cloned(),
        matches.get_flag("driver"),
    );
    let probe = TorchProbe::new(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match commands::check(&probe, &mut out) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    };

    if config.driver && outcome != CheckOutcome::NotInstalled {
        if let Err(e) = commands::driver(&mut out) {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }

    process::exit(outcome.exit_code());
}
