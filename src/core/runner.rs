//! Process execution for every external command gitcli runs.
//!
//! All real work is delegated to the `git` binary found on `PATH`. The
//! [`CommandRunner`] trait is the single seam between handlers and the
//! operating system: [`GitRunner`] spawns real processes in a fixed working
//! directory, and tests substitute a scripted runner that records calls.
//!
//! # Public API
//! - [`CommandRunner`]: Execution trait with git-specific convenience methods
//! - [`GitRunner`]: Subprocess-backed implementation
//! - [`CommandOutput`]: Exit code plus both captured pipes

use crate::core::output::print_error;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Structured result of a captured command. Never an error: spawn failures
/// are reported as exit code `-1` with the spawn error in `stderr`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Both pipes joined, for substring classification.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub trait CommandRunner {
    /// Working directory every command runs in.
    fn workdir(&self) -> &Path;

    /// Run a program with both pipes captured.
    fn execute(&self, program: &str, args: &[&str]) -> CommandOutput;

    /// Run a program attached to the terminal. Returns whether it exited 0.
    fn execute_inherited(&self, program: &str, args: &[&str]) -> bool;

    /// Run `git` and return the structured result. Used by flows that branch
    /// on the exit code and on stderr text.
    fn git_raw(&self, args: &[&str]) -> CommandOutput {
        self.execute("git", args)
    }

    /// Run `git`. With `capture`, returns trimmed stdout on success and prints
    /// the captured stderr on failure. Without `capture`, output goes straight
    /// to the terminal and success yields an empty string.
    fn git(&self, args: &[&str], capture: bool) -> Option<String> {
        if capture {
            let output = self.git_raw(args);
            if output.is_success() {
                Some(output.stdout.trim().to_string())
            } else {
                let message = output.stderr.trim();
                if message.is_empty() {
                    print_error(&format!("Command failed: git {}", args.join(" ")));
                } else {
                    print_error(&format!("Command failed: {message}"));
                }
                None
            }
        } else if self.execute_inherited("git", args) {
            Some(String::new())
        } else {
            None
        }
    }

    /// Run a read-only `git` query. Failures yield `None` without any output.
    fn git_query(&self, args: &[&str]) -> Option<String> {
        let output = self.git_raw(args);
        output
            .is_success()
            .then(|| output.stdout.trim().to_string())
    }

    /// Run `git` purely for display (status, log, diff).
    fn git_show(&self, args: &[&str]) -> bool {
        self.execute_inherited("git", args)
    }
}

/// Runs real subprocesses rooted at a working directory.
pub struct GitRunner {
    workdir: PathBuf,
}

impl GitRunner {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn command(&self, program: &str, args: &[&str]) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(&self.workdir);
        cmd
    }
}

impl CommandRunner for GitRunner {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn execute(&self, program: &str, args: &[&str]) -> CommandOutput {
        log::debug!("exec (captured): {program} {}", args.join(" "));
        match self.command(program, args).stdin(Stdio::null()).output() {
            Ok(output) => CommandOutput {
                code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(e) => {
                log::warn!("failed to spawn {program}: {e}");
                CommandOutput::failure(-1, e.to_string())
            }
        }
    }

    fn execute_inherited(&self, program: &str, args: &[&str]) -> bool {
        log::debug!("exec (terminal): {program} {}", args.join(" "));
        match self.command(program, args).status() {
            Ok(status) => status.success(),
            Err(e) => {
                log::warn!("failed to spawn {program}: {e}");
                false
            }
        }
    }
}

/// Scripted runner for handler tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    /// Responds to command lines (`"git push --force"`) from a script.
    /// Each command line holds a queue; the last response is sticky. Unscripted
    /// commands succeed with empty output.
    pub(crate) struct ScriptedRunner {
        workdir: PathBuf,
        responses: RefCell<HashMap<String, VecDeque<CommandOutput>>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        pub(crate) fn new() -> Self {
            Self::in_dir(std::env::temp_dir())
        }

        pub(crate) fn in_dir(workdir: impl Into<PathBuf>) -> Self {
            Self {
                workdir: workdir.into(),
                responses: RefCell::new(HashMap::new()),
                calls: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn on(self, line: &str, output: CommandOutput) -> Self {
            self.responses
                .borrow_mut()
                .entry(line.to_string())
                .or_default()
                .push_back(output);
            self
        }

        pub(crate) fn ok(self, line: &str, stdout: &str) -> Self {
            self.on(line, CommandOutput::success(stdout))
        }

        pub(crate) fn fail(self, line: &str, stderr: &str) -> Self {
            self.on(line, CommandOutput::failure(1, stderr))
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        pub(crate) fn count(&self, line: &str) -> usize {
            self.calls.borrow().iter().filter(|c| *c == line).count()
        }

        pub(crate) fn ran(&self, line: &str) -> bool {
            self.count(line) > 0
        }

        fn respond(&self, program: &str, args: &[&str]) -> CommandOutput {
            let line = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls.borrow_mut().push(line.clone());
            let mut responses = self.responses.borrow_mut();
            match responses.get_mut(&line) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
                Some(queue) => queue.front().cloned().unwrap_or_default(),
                None => CommandOutput::success(""),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn workdir(&self) -> &Path {
            &self.workdir
        }

        fn execute(&self, program: &str, args: &[&str]) -> CommandOutput {
            self.respond(program, args)
        }

        fn execute_inherited(&self, program: &str, args: &[&str]) -> bool {
            self.respond(program, args).is_success()
        }
    }
}
