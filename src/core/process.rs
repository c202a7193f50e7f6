//! Running the git binary.
//!
//! [`ProcessRunner`] invokes git with an explicit argument vector (never through
//! a shell) inside the repository root, with `LC_ALL=C` so markers and messages
//! do not depend on the host locale. Every invocation is bounded by a timeout.
//!
//! The [`CommandRunner`] trait is the seam the rest of the core talks to, so the
//! status and publish logic can be driven by a recording fake in tests.

use crate::core::config::PushyConfig;
use crate::core::error::{PushyError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Exit code git uses to signal "nothing was done"; never reported as a failure
pub const NOOP_EXIT_CODE: i32 = 5;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Captured result of one git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Lines written to stdout
    pub lines: Vec<String>,
    /// Lines written to stderr
    pub errors: Vec<String>,
    pub exit_code: i32,
}

impl ProcessOutput {
    pub fn new(lines: Vec<String>, exit_code: i32) -> Self {
        Self {
            lines,
            errors: Vec::new(),
            exit_code,
        }
    }

    /// True when git exited with the no-op sentinel
    pub fn is_noop(&self) -> bool {
        self.exit_code == NOOP_EXIT_CODE
    }

    /// stdout followed by stderr, the way a terminal would show them
    pub fn combined(&self) -> Vec<String> {
        self.lines
            .iter()
            .chain(self.errors.iter())
            .cloned()
            .collect()
    }
}

/// Anything able to run a git command in the repository
pub trait CommandRunner {
    fn execute(&self, args: &[&str]) -> Result<ProcessOutput>;
}

pub struct ProcessRunner {
    bin: String,
    repo_root: PathBuf,
    timeout: Duration,
    logging: bool,
}

impl ProcessRunner {
    pub fn new(bin: impl Into<String>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            repo_root: repo_root.into(),
            timeout: DEFAULT_TIMEOUT,
            logging: false,
        }
    }

    pub fn from_config(config: &PushyConfig, repo_root: &Path) -> Self {
        Self::new(config.git.bin.clone(), repo_root)
            .with_timeout(config.timeout())
            .with_logging(config.logging)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Installed git version, e.g. `2.39.2`, or None when git cannot be run
    pub fn git_version(&self) -> Option<String> {
        let output = self.execute(&["--version"]).ok()?;
        parse_version(output.lines.first()?)
    }

    /// Command line for logs and error messages, with the commit message redacted
    fn describe(&self, args: &[&str]) -> String {
        let mut parts = vec![self.bin.clone()];
        let mut redact_next = false;
        for arg in args {
            if redact_next {
                parts.push("<message>".to_string());
                redact_next = false;
                continue;
            }
            redact_next = matches!(*arg, "-m" | "--message");
            parts.push(arg.to_string());
        }
        parts.join(" ")
    }
}

impl CommandRunner for ProcessRunner {
    fn execute(&self, args: &[&str]) -> Result<ProcessOutput> {
        let command_line = self.describe(args);
        if self.logging {
            log::info!("pushy[command]: {command_line}");
        } else {
            log::debug!("Running {command_line}");
        }

        let mut child = Command::new(&self.bin)
            .args(args)
            .current_dir(&self.repo_root)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PushyError::process_spawn(&command_line, e))?;

        // Drain both pipes while waiting so a chatty command cannot block on a full pipe
        let stdout_reader = read_pipe(child.stdout.take());
        let stderr_reader = read_pipe(child.stderr.take());

        let status = match child.wait_timeout(self.timeout)? {
            Some(status) => status,
            None => {
                if let Err(e) = child.kill() {
                    log::warn!("Failed to kill timed out git process: {e}");
                }
                let _ = child.wait();
                log::error!("{command_line} timed out after {:?}", self.timeout);
                return Err(PushyError::process_timeout(command_line, self.timeout));
            }
        };

        let output = ProcessOutput {
            lines: split_lines(&join_reader(stdout_reader)),
            errors: split_lines(&join_reader(stderr_reader)),
            exit_code: status.code().unwrap_or(-1),
        };

        if self.logging {
            log::info!("pushy[output]: {}", describe_output(args, &output)?);
        }

        match status.code() {
            Some(0) | Some(NOOP_EXIT_CODE) => Ok(output),
            code => Err(PushyError::process(
                command_line,
                code,
                &output.combined(),
            )),
        }
    }
}

/// Captured output for the log; commit output echoes the message, so only its size is shown
fn describe_output(args: &[&str], output: &ProcessOutput) -> Result<String> {
    let captured = output.combined();
    if args.first() == Some(&"commit") {
        return Ok(format!("<{} line(s) of commit output>", captured.len()));
    }
    Ok(serde_json::to_string(&captured)?)
}

fn read_pipe<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(e) = pipe.read_to_end(&mut buf) {
                log::warn!("Failed to read git output: {e}");
            }
            buf
        })
    })
}

fn join_reader(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

fn split_lines(raw: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(raw)
        .lines()
        .map(|line| line.to_string())
        .collect()
}

fn parse_version(line: &str) -> Option<String> {
    line.split_whitespace()
        .find(|token| token.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .map(|token| token.to_string())
}
