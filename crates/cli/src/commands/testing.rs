// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Home directory fixture shared by command tests.

use super::Context;
use crate::config::Config;
use cj_adapters::FakeRunner;
use chrono::{Local, NaiveDateTime, TimeDelta, TimeZone};
use cj_core::test_support::datetime;
use cj_core::FakeClock;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::SystemTime;
use tempfile::TempDir;

pub const USER: &str = "alice";
pub const SUFFIX: &str = "bc.ccbr.utoronto.ca";

/// When commands run.
pub fn now() -> NaiveDateTime {
    datetime(2024, 2, 1, 9, 0)
}

pub struct Home {
    pub dir: TempDir,
    pub config: Config,
    pub runner: FakeRunner,
}

impl Home {
    /// Empty home with a `pbs-output` directory and no scheduler commands.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = Config::for_home(dir.path(), USER);
        fs::create_dir(&config.output_dir).unwrap();
        Self { dir, config, runner: FakeRunner::new() }
    }

    /// `qstat` prints `text` for every invocation.
    pub fn qstat(mut self, text: &str) -> Self {
        self.runner = self.runner.with_output(&self.config.qstat, text);
        self
    }

    pub fn qdel_ok(mut self) -> Self {
        self.runner = self.runner.with_output(&self.config.qdel, "");
        self
    }

    pub fn ctx(&self) -> Context<'_, FakeClock> {
        Context {
            config: &self.config,
            query: &self.runner,
            action: &self.runner,
            clock: FakeClock::at(now()),
        }
    }

    pub fn output(&self, id: u64) -> PathBuf {
        self.config.output_dir.join(format!("{id}.{SUFFIX}.OU"))
    }

    /// Write a finished job's output file, last modified `days_ago` before
    /// [`now`].
    pub fn write_output(&self, id: u64, exit: i32, days_ago: i64) {
        let path = self.output(id);
        fs::write(&path, format!("==> Run command : python job{id}.py\n==> Exit status : {exit}\n"))
            .unwrap();
        let at = now() - TimeDelta::days(days_ago);
        let mtime = SystemTime::from(Local.from_local_datetime(&at).earliest().unwrap());
        File::options().write(true).open(&path).unwrap().set_modified(mtime).unwrap();
    }

    pub fn write_log(&self, text: &str) {
        fs::write(&self.config.log_path, text).unwrap();
    }

    /// Programs run so far, with their arguments.
    pub fn calls(&self) -> Vec<String> {
        self.runner
            .calls()
            .into_iter()
            .map(|call| {
                let mut line = call.program;
                for arg in call.args {
                    line.push(' ');
                    line.push_str(&arg);
                }
                line
            })
            .collect()
    }
}

pub fn qstat_full(jobs: &[(u64, &str, &str)]) -> String {
    jobs.iter()
        .map(|(id, owner, state)| {
            format!(
                "Job Id: {id}.{SUFFIX}\n    Job_Name = job{id}\n    euser = {owner}\n    job_state = {state}\n    queue = batch\n\n"
            )
        })
        .collect()
}
