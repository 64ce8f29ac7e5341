// SPDX-License-Identifier: Apache-2.0

//! Command execution against the container runtime.

use std::io;
use std::process::Command;

use tracing::{debug, warn};

/// Captured result of one container runtime invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Builds a successful output carrying `stdout`.
    pub fn ok(stdout: impl Into<Vec<u8>>) -> Self {
        CommandOutput {
            status: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Builds a failed output with exit code `code` and `stderr`.
    pub fn failed(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        CommandOutput {
            status: Some(code),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Human-readable reason for a failed invocation.
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr_text();
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.status {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Executes container runtime commands and captures their output.
///
/// `args` excludes the program itself, e.g. `["exec", "mc-bedrock", "cat", "/data/allowlist.json"]`.
/// An `Err` means the runtime could not be invoked at all; a non-zero exit is
/// reported through [`CommandOutput::status`].
pub trait CommandGateway {
    fn run(&self, args: &[String]) -> io::Result<CommandOutput>;
}

impl<G: CommandGateway + ?Sized> CommandGateway for &G {
    fn run(&self, args: &[String]) -> io::Result<CommandOutput> {
        (**self).run(args)
    }
}

/// Gateway backed by the `docker` executable.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new<S: Into<String>>(program: S) -> Self {
        DockerCli {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        DockerCli::new("docker")
    }
}

impl CommandGateway for DockerCli {
    fn run(&self, args: &[String]) -> io::Result<CommandOutput> {
        let command_line = args.join(" ");
        debug!(program = %self.program, command = %command_line, "running container command");

        let out = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| io::Error::new(e.kind(), format!("failed to run {}: {e}", self.program)))?;

        let output = CommandOutput {
            status: out.status.code(),
            stdout: out.stdout,
            stderr: out.stderr,
        };

        for line in output.stdout_text().lines().filter(|l| !l.trim().is_empty()) {
            debug!("  {line}");
        }
        for line in output.stderr_text().lines().filter(|l| !l.trim().is_empty()) {
            warn!("  {line}");
        }
        debug!(command = %command_line, status = ?output.status, "container command finished");

        Ok(output)
    }
}

/// Converts a borrowed argument list into the owned form the gateway takes.
pub(crate) fn argv<const N: usize>(args: [&str; N]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}
