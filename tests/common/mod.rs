//! Common test utilities
#![allow(dead_code)]

use cmdshell::{ArgKind, Argument, Command, Result, Shell};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a cmdshell.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cmdshell.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Create a test config with an empty subdirectory next to it
pub fn create_test_config_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cmdshell.yml");
    let sub_dir = temp_dir.path().join("subdir");

    fs::write(&config_path, content).unwrap();
    fs::create_dir(&sub_dir).unwrap();

    (temp_dir, config_path, sub_dir)
}

/// Build a declaration that is known to be valid
pub fn arg(short: &str, long: &str, kind: ArgKind, multiple: bool, required: bool) -> Argument {
    Argument::new(short, long, kind, multiple, required).unwrap()
}

/// A command named `root` carrying `args` in order
pub fn command_with(args: Vec<Argument>) -> Command {
    let mut cmd = Command::new("root").with_help("root help");
    for a in args {
        cmd.add_argument(a).unwrap();
    }
    cmd
}

/// Dispatch one line and return what the handler wrote
pub fn run_line(shell: &Shell, tokens: &[&str]) -> Result<String> {
    let mut out = Vec::new();
    shell.dispatch(tokens, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}
