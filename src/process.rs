//! Synchronous external process execution.
//!
//! The generator only ever needs one line of output from a short-lived child
//! process. [`ProcessRunner`] captures exactly that plus the exit status, and
//! [`CapturedOutput::first_line`] applies the success rule: diagnostics on
//! stderr are tolerated, an empty stdout is not.

use std::path::Path;
use std::process::{
    Command,
    Stdio,
};

/// Output captured from a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code, `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    /// Everything the process wrote to stdout.
    pub stdout: String,
    /// Everything the process wrote to stderr.
    pub stderr: String,
}

impl CapturedOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// First non-empty line of stdout, trimmed.
    ///
    /// Returns `Err` with a reason when stdout carries nothing. Stderr noise
    /// alone never makes this fail, and neither does a non-zero exit as long
    /// as a line was produced.
    pub fn first_line(&self) -> Result<String, String> {
        let line = self
            .stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty());

        match line {
            Some(line) => Ok(line.to_string()),
            None if self.success() => Err("empty output".to_string()),
            None => {
                let stderr = self.stderr.trim();
                let status = self
                    .status
                    .map_or_else(|| "signal".to_string(), |code| code.to_string());
                if stderr.is_empty() {
                    Err(format!("exit status {} with empty output", status))
                } else {
                    Err(format!("exit status {}: {}", status, stderr))
                }
            }
        }
    }
}

/// Something that can run a program and capture its output.
///
/// The trait keeps the resolver testable without a real `git` installation.
pub trait ProcessRunner {
    /// Run `program` with `args` in `cwd`, blocking until it exits.
    ///
    /// Returns `Err` only when the process could not be started at all.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> std::io::Result<CapturedOutput>;
}

/// Runs real child processes via [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> std::io::Result<CapturedOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;

        Ok(CapturedOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
