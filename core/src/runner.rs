//! # Process Runner Port
//!
//! Boundary between the services and the external commands they drive
//! (`ippfind`, `ping`, `curl`). The collector depends only on this trait,
//! so tests substitute a scripted fake instead of touching the network.

use std::process::Command;

/// Captured result of one external command.
#[derive(Debug, Clone)]
pub struct Exec {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Runs an external command and captures its output.
///
/// `Err` means the process could not be spawned at all; a non-zero exit
/// comes back as `Ok` with `success == false` so call sites decide
/// whether to skip, warn, or abort.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<Exec>;
}

/// Production runner: blocking `std::process::Command` invocation with no
/// timeout. A hung collaborator blocks the whole run; there is exactly one
/// thread of control and no cancellation mechanism.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<Exec> {
        let output = Command::new(program).args(args).output()?;
        Ok(Exec {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}
