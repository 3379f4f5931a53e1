// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running scheduler commands, with an optional on-disk output cache.

use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use std::time::{Duration, SystemTime};
use thiserror::Error;

#[allow(clippy::expect_used)]
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").expect("constant regex pattern is valid")
});

/// Remove terminal escape sequences some scheduler builds emit.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Errors from running an external command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed { program: String, status: String, stderr: String },
}

/// Runs an external program and returns its stdout.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        (**self).run(program, args)
    }
}

/// Runs commands with `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        tracing::debug!(program, ?args, "running command");
        let output = Command::new(program).args(args).output().map_err(|source| {
            CommandError::Spawn { program: program.to_string(), source }
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(CommandError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            tracing::warn!(program, %stderr, "command wrote to stderr");
        }
        Ok(strip_ansi(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Caches another runner's output in `{dir}/{user}-{sha256(command)}`.
///
/// Output younger than `max_age` is served from disk. A zero `max_age`
/// disables the cache. Cache write failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct CachedRunner<R> {
    inner: R,
    dir: PathBuf,
    user: String,
    max_age: Duration,
    ignore_cache: bool,
}

impl<R: CommandRunner> CachedRunner<R> {
    pub fn new(inner: R, dir: impl Into<PathBuf>, user: impl Into<String>, max_age: Duration) -> Self {
        Self { inner, dir: dir.into(), user: user.into(), max_age, ignore_cache: false }
    }

    /// Always re-run the command (the fresh output still refreshes the cache).
    pub fn ignore_cache(mut self, ignore: bool) -> Self {
        self.ignore_cache = ignore;
        self
    }

    pub fn cache_path(&self, program: &str, args: &[&str]) -> PathBuf {
        let mut command = program.to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        let digest = Sha256::digest(command.as_bytes());
        self.dir.join(format!("{}-{:x}", self.user, digest))
    }

    fn read_fresh(&self, path: &Path) -> Option<String> {
        if self.ignore_cache || self.max_age.is_zero() {
            return None;
        }
        let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
        let age = SystemTime::now().duration_since(modified).ok()?;
        if age >= self.max_age {
            return None;
        }
        std::fs::read_to_string(path).ok()
    }

    fn store(&self, path: &Path, output: &str) {
        if self.max_age.is_zero() {
            return;
        }
        let mut tmp_name = path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        if let Err(e) = std::fs::create_dir_all(&self.dir).and_then(|_| {
            std::fs::write(&tmp_path, output.as_bytes())?;
            std::fs::rename(&tmp_path, path)
        }) {
            tracing::warn!(path = %path.display(), error = %e, "failed to cache command output");
        }
    }
}

impl<R: CommandRunner> CommandRunner for CachedRunner<R> {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let path = self.cache_path(program, args);
        if let Some(cached) = self.read_fresh(&path) {
            tracing::debug!(program, path = %path.display(), "using cached command output");
            return Ok(cached);
        }
        let output = self.inner.run(program, args)?;
        self.store(&path, &output);
        Ok(output)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{CommandError, CommandRunner};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Recorded command invocation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RunCall {
        pub program: String,
        pub args: Vec<String>,
    }

    #[derive(Default)]
    struct FakeRunnerState {
        outputs: HashMap<String, Result<String, String>>,
        calls: Vec<RunCall>,
    }

    /// Fake command runner keyed by program name
    #[derive(Clone, Default)]
    pub struct FakeRunner {
        inner: Arc<Mutex<FakeRunnerState>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Return `stdout` whenever `program` runs.
        pub fn with_output(self, program: &str, stdout: &str) -> Self {
            self.inner.lock().outputs.insert(program.to_string(), Ok(stdout.to_string()));
            self
        }

        /// Fail whenever `program` runs.
        pub fn with_failure(self, program: &str, stderr: &str) -> Self {
            self.inner.lock().outputs.insert(program.to_string(), Err(stderr.to_string()));
            self
        }

        /// Get all recorded invocations
        pub fn calls(&self) -> Vec<RunCall> {
            self.inner.lock().calls.clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
            let mut state = self.inner.lock();
            state.calls.push(RunCall {
                program: program.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
            });
            match state.outputs.get(program) {
                Some(Ok(stdout)) => Ok(stdout.clone()),
                Some(Err(stderr)) => Err(CommandError::Failed {
                    program: program.to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: stderr.clone(),
                }),
                None => Err(CommandError::Spawn {
                    program: program.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                }),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRunner, RunCall};

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
