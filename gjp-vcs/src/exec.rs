//! Process execution facade.
//!
//! Commands are built as argument vectors — the program name and each
//! argument travel separately to the OS, so nothing is ever interpreted by
//! a shell. Output is captured; echo mode forwards the captured streams to
//! the parent's stdout/stderr after the child exits.

use std::path::PathBuf;
use std::process::Command;

use crate::error::VcsError;

/// A command to run, built from an argument vector.
#[derive(Debug, Clone)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    echo: bool,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            echo: false,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Working directory for the child process.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Forward captured stdout/stderr to the parent's streams after the
    /// child exits.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Rendered command text for logs and error messages.
    pub fn rendered(&self) -> String {
        let mut text = self.program.clone();
        for arg in &self.args {
            text.push(' ');
            if arg.contains(' ') {
                text.push('\'');
                text.push_str(arg);
                text.push('\'');
            } else {
                text.push_str(arg);
            }
        }
        text
    }

    /// Run to completion and fail on a non-zero exit.
    ///
    /// The error carries the rendered command text, the exit status and the
    /// captured stderr.
    pub fn run(&self) -> Result<Output, VcsError> {
        let output = self.run_unchecked()?;
        if !output.success() {
            return Err(VcsError::Command {
                command: self.rendered(),
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }

    /// Run to completion and return captured output regardless of exit
    /// status. The only sanctioned way to tolerate a non-zero exit —
    /// reserved for probing optional state, not general error suppression.
    pub fn run_unchecked(&self) -> Result<Output, VcsError> {
        tracing::debug!("exec: {}", self.rendered());

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        let raw = command.output().map_err(|e| VcsError::Spawn {
            command: self.rendered(),
            source: e,
        })?;

        let output = Output {
            stdout: String::from_utf8_lossy(&raw.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&raw.stderr).into_owned(),
            status: raw.status.code().unwrap_or(-1),
        };

        if self.echo {
            print!("{}", output.stdout);
            eprint!("{}", output.stderr);
        }

        Ok(output)
    }
}

/// Captured output of a finished command.
#[derive(Debug, Clone)]
pub struct Output {
    pub stdout: String,
    pub stderr: String,
    pub status: i32,
}

impl Output {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Trimmed, non-empty stdout lines.
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_captures_stdout() {
        let output = CommandLine::new("git").arg("--version").run().expect("run");
        assert!(output.stdout.contains("git version"));
        assert!(output.success());
    }

    #[test]
    fn run_fails_on_nonzero_exit() {
        let err = CommandLine::new("git")
            .arg("frotz-no-such-subcommand")
            .run()
            .unwrap_err();
        match err {
            VcsError::Command {
                command, status, ..
            } => {
                assert!(command.contains("frotz-no-such-subcommand"));
                assert_ne!(status, 0);
            }
            other => panic!("expected Command error, got {other:?}"),
        }
    }

    #[test]
    fn run_unchecked_tolerates_nonzero_exit() {
        let output = CommandLine::new("git")
            .arg("frotz-no-such-subcommand")
            .run_unchecked()
            .expect("run_unchecked");
        assert!(!output.success());
    }

    #[test]
    fn spawn_failure_names_the_command() {
        let err = CommandLine::new("gjp-no-such-binary-on-path")
            .run()
            .unwrap_err();
        assert!(matches!(err, VcsError::Spawn { .. }));
        assert!(err.to_string().contains("gjp-no-such-binary-on-path"));
    }

    #[test]
    fn rendered_quotes_spaced_arguments() {
        let command = CommandLine::new("git")
            .args(["commit", "-m", "two words"])
            .rendered();
        assert_eq!(command, "git commit -m 'two words'");
    }

    #[test]
    fn stdout_lines_skip_blanks() {
        let output = Output {
            stdout: "a\n\n  b \n".to_string(),
            stderr: String::new(),
            status: 0,
        };
        let lines: Vec<_> = output.stdout_lines().collect();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
