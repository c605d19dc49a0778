// End-to-end runs of the check-cuda binary against fake Python interpreters
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Mutex;
use tempfile::TempDir;

// Writing an executable while another test forks can fail with ETXTBSY
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

const T4_ANSWER: &str = r#"{"installed": true, "version": "2.1.0+cu118", "cuda_available": true, "cuda_build": "11.8", "cudnn_version": 8700, "device_count": 1, "current_device": 0, "device_name": "Tesla T4", "total_memory": 17179869184, "compute_capability": [7, 5]}"#;

const CPU_ANSWER: &str =
    r#"{"installed": true, "version": "2.1.0+cpu", "cuda_available": false, "cuda_build": null}"#;

const MISSING_ANSWER: &str = r#"{"installed": false, "reason": "No module named torch"}"#;

/// Write a shell script that ignores its arguments and runs `body`
fn fake_python(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("python");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn answering(dir: &TempDir, json: &str) -> PathBuf {
    fake_python(dir, &format!("echo 'CHECK_CUDA_PROBE:{}'", json))
}

fn check_cuda(python: Option<&Path>, env_python: Option<&Path>) -> Output {
    check_cuda_with(python, env_python, &[])
}

fn check_cuda_with(python: Option<&Path>, env_python: Option<&Path>, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_check-cuda"));
    cmd.env_remove("CHECK_CUDA_PYTHON").env_remove("RUST_LOG").args(args);
    if let Some(python) = python {
        cmd.arg("--python").arg(python);
    }
    if let Some(python) = env_python {
        cmd.env("CHECK_CUDA_PYTHON", python);
    }
    cmd.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_torch_missing_exits_one() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = answering(&dir, MISSING_ANSWER);

    let output = check_cuda(Some(&python), None);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("ERROR: PyTorch not installed!"));
}

#[test]
fn test_interpreter_missing_exits_one() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();

    let output = check_cuda(Some(&dir.path().join("no-such-python")), None);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("ERROR: PyTorch not installed!"));
}

#[test]
fn test_gpu_available_exits_zero() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = answering(&dir, T4_ANSWER);

    let output = check_cuda(Some(&python), None);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("CUDA Available: True\n"));
    assert!(text.contains("GPU Name: Tesla T4\n"));
    assert!(text.contains("GPU Memory: 16.0 GB\n"));
    assert!(text.ends_with("RESULT: CUDA is WORKING - You can train on GPU\n\n\n"));
}

#[test]
fn test_cpu_only_exits_zero_and_is_stable() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = answering(&dir, CPU_ANSWER);

    let first = check_cuda(Some(&python), None);
    let second = check_cuda(Some(&python), None);
    let text = stdout(&first);

    assert_eq!(first.status.code(), Some(0));
    assert!(text.contains("PyTorch CUDA Build: CPU-only version\n"));
    assert!(text.contains(&format!("\n{}\n", "=".repeat(70))));
    assert!(text.contains("Expected training speed: VERY SLOW"));
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_interpreter_from_environment() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = answering(&dir, CPU_ANSWER);

    let output = check_cuda(None, Some(&python));

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("PyTorch Version: 2.1.0+cpu\n"));
}

#[test]
fn test_crashing_probe_exits_two() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "echo 'Segmentation fault' >&2\nexit 139");

    let output = check_cuda(Some(&python), None);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Segmentation fault"));
}

#[test]
fn test_noise_before_probe_answer_is_ignored() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = fake_python(
        &dir,
        &format!("echo 'UserWarning: CUDA initialization'\necho 'CHECK_CUDA_PROBE:{}'", T4_ANSWER),
    );

    let output = check_cuda(Some(&python), None);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.starts_with("CUDA Status Check\n"));
    assert!(!text.contains("UserWarning"));
}

#[test]
fn test_version_flag() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let output = Command::new(env!("CARGO_BIN_EXE_check-cuda"))
        .arg("--version")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("check-cuda version "));
}

#[test]
fn test_driver_flag_appends_section_without_changing_exit_code() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = answering(&dir, CPU_ANSWER);

    let plain = check_cuda(Some(&python), None);
    let with_driver = check_cuda_with(Some(&python), None, &["--driver"]);

    assert_eq!(plain.status.code(), Some(0));
    assert_eq!(with_driver.status.code(), Some(0));
    assert!(with_driver.stdout.starts_with(&plain.stdout));

    let tail = String::from_utf8_lossy(&with_driver.stdout[plain.stdout.len()..]).into_owned();
    assert!(tail.starts_with("NVIDIA Driver Check"), "unexpected tail: {:?}", tail);
}

#[test]
fn test_driver_flag_skipped_when_torch_missing() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = answering(&dir, MISSING_ANSWER);

    let output = check_cuda_with(Some(&python), None, &["--driver"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("NVIDIA Driver Check"));
}

#[test]
fn test_local_torch_directory_does_not_shadow_install() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let python = match which::which("python3") {
        Ok(python) => python,
        Err(_) => {
            println!("python3 not found, skipping");
            return;
        }
    };

    let dir = TempDir::new().unwrap();
    let fake_torch = dir.path().join("torch");
    fs::create_dir(&fake_torch).unwrap();
    fs::write(
        fake_torch.join("__init__.py"),
        format!(
            "import sys\nprint('CHECK_CUDA_PROBE:' + {:?})\nsys.exit(0)\n",
            CPU_ANSWER.replace("2.1.0+cpu", "shadowed")
        ),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_check-cuda"))
        .env_remove("CHECK_CUDA_PYTHON")
        .env_remove("RUST_LOG")
        .arg("--python")
        .arg(&python)
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!stdout(&output).contains("shadowed"));
}
