// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test harness: a temp home with fake scheduler commands, and fluent
//! assertions over `cj` runs.

use std::fs::{self, File};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

pub use serial_test::serial;

pub const USER: &str = "alice";
pub const SUFFIX: &str = "bc.ccbr.utoronto.ca";

/// A home directory plus `qstat`/`qdel` stand-ins.
///
/// `qstat -f`, `qstat -u` and plain `qstat` print `qstat-f.txt`,
/// `qstat-u.txt` and `qstat.txt` from the fake bin directory; `qdel`
/// appends its arguments to `qdel.log`.
pub struct Cluster {
    dir: TempDir,
}

impl Cluster {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let cluster = Self { dir };
        fs::create_dir_all(cluster.home().join("pbs-output")).unwrap();
        fs::create_dir_all(cluster.bin()).unwrap();
        for name in ["qstat-f.txt", "qstat-u.txt", "qstat.txt"] {
            fs::write(cluster.bin().join(name), "").unwrap();
        }

        let bin = cluster.bin();
        cluster.script(
            "qstat",
            &format!(
                "case \"$1\" in\n  -f) cat '{b}/qstat-f.txt' ;;\n  -u) cat '{b}/qstat-u.txt' ;;\n  *) cat '{b}/qstat.txt' ;;\nesac\n",
                b = bin.display()
            ),
        );
        cluster.script("qdel", &format!("echo \"$@\" >> '{}/qdel.log'\n", bin.display()));
        cluster
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    fn bin(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    fn script(&self, name: &str, body: &str) {
        let path = self.bin().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// What `qstat -f` prints.
    pub fn live_jobs(&self, jobs: &[(u64, &str, &str)]) -> &Self {
        let text: String = jobs
            .iter()
            .map(|(id, owner, state)| {
                format!(
                    "Job Id: {id}.{SUFFIX}\n    Job_Name = job{id}\n    euser = {owner}\n    job_state = {state}\n    queue = batch\n\n"
                )
            })
            .collect();
        fs::write(self.bin().join("qstat-f.txt"), text).unwrap();
        self
    }

    /// What plain `qstat` prints.
    pub fn queue_listing(&self, text: &str) -> &Self {
        fs::write(self.bin().join("qstat.txt"), text).unwrap();
        self
    }

    /// What `qstat -u` prints.
    pub fn user_listing(&self, text: &str) -> &Self {
        fs::write(self.bin().join("qstat-u.txt"), text).unwrap();
        self
    }

    /// Write a file relative to home.
    pub fn file(&self, path: &str, content: &str) -> &Self {
        let path = self.home().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn output_path(&self, id: u64) -> PathBuf {
        self.home().join("pbs-output").join(format!("{id}.{SUFFIX}.OU"))
    }

    /// A finished job's output file, last modified `days_ago`.
    pub fn finished_job(&self, id: u64, exit: i32, days_ago: u64) -> &Self {
        let path = self.output_path(id);
        fs::write(
            &path,
            format!("==> Run command : python job{id}.py\n==> Exit status : {exit}\n"),
        )
        .unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(days_ago * 86_400);
        File::options().write(true).open(&path).unwrap().set_modified(mtime).unwrap();
        self
    }

    /// Lines `qdel` was called with.
    pub fn deleted(&self) -> Vec<String> {
        fs::read_to_string(self.bin().join("qdel.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.home().join(path)).unwrap()
    }

    pub fn entries(&self, dir: &str) -> Vec<String> {
        match fs::read_dir(self.home().join(dir)) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn cj(&self) -> CliBuilder {
        let mut cmd = assert_cmd::Command::cargo_bin("cj").unwrap();
        cmd.env_clear()
            .env("PATH", std::env::var("PATH").unwrap_or_default())
            .env("CJ_HOME", self.home())
            .env("CJ_USER", USER)
            .env("CJ_QSTAT", self.bin().join("qstat"))
            .env("CJ_QDEL", self.bin().join("qdel"))
            .env("CJ_CACHE_SECS", "0")
            .env("CJ_CACHE_DIR", self.dir.path().join("cache"))
            .env("NO_COLOR", "1")
            .env("COLUMNS", "120");
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input);
        self
    }

    /// Run and expect exit code 0.
    pub fn passes(mut self) -> RunAssert {
        RunAssert::from(self.cmd.assert().success())
    }

    /// Run and expect the given non-zero exit code.
    pub fn fails_with(mut self, code: i32) -> RunAssert {
        RunAssert::from(self.cmd.assert().code(code))
    }
}

pub struct RunAssert {
    stdout: String,
    stderr: String,
}

impl From<assert_cmd::assert::Assert> for RunAssert {
    fn from(assert: assert_cmd::assert::Assert) -> Self {
        let output = assert.get_output();
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl RunAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        assert!(
            self.stdout.contains(expected),
            "stdout missing {expected:?}\nstdout:\n{}\nstderr:\n{}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        assert!(!self.stdout.contains(unexpected), "stdout has {unexpected:?}\n{}", self.stdout);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        assert!(
            self.stderr.contains(expected),
            "stderr missing {expected:?}\nstderr:\n{}",
            self.stderr
        );
        self
    }
}
