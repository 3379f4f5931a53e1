// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job selection expressions.
//!
//! An expression is one of, tried in order:
//!
//! | form            | meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `YYYY-MM-DD`    | jobs finished on the given side of midnight |
//! | `N` / `N-M`     | id bound / inclusive id range             |
//! | `N,M,...`       | exactly these ids                         |
//! | `N{h,d,w}`      | like a date, `N` hours/days/weeks ago     |
//!
//! Id tokens may carry the scheduler's host suffix (`123.bc.ccbr`), which
//! is ignored.

use crate::clock::Clock;
use crate::job::{Job, JobId};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use thiserror::Error;

#[allow(clippy::expect_used)]
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)[a-cn-u.]*(?:-(\d+)[a-cn-u.]*)?$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static ID_LIST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:,\d+)+$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static RELATIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([hdw])$").expect("constant regex pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("job id out of range: {0}")]
    InvalidId(String),
    #[error("time delta out of range: {0}")]
    OutOfRange(String),
    #[error("unrecognized filter {0:?}: expected YYYY-MM-DD, N, N-M, N,M,... or N followed by h, d or w")]
    Unrecognized(String),
}

/// Which side of a single bound a filter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `>=` the bound (listing recent jobs)
    Newer,
    /// `<=` the bound (archiving old jobs)
    Older,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Reference time compared against this instant
    Date(NaiveDateTime),
    /// Inclusive id bounds; `None` is unbounded
    Ids { min: Option<JobId>, max: Option<JobId> },
    IdSet(BTreeSet<JobId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    selector: Selector,
    direction: Direction,
}

impl Filter {
    /// Parse a selection expression. Relative deltas resolve against `clock`.
    pub fn parse(arg: &str, direction: Direction, clock: &impl Clock) -> Result<Self, FilterParseError> {
        let arg = arg.trim();
        let selector = if DATE_PATTERN.is_match(arg) {
            let date = NaiveDate::parse_from_str(arg, "%Y-%m-%d")
                .map_err(|_| FilterParseError::InvalidDate(arg.to_string()))?;
            Selector::Date(date.and_time(chrono::NaiveTime::MIN))
        } else if let Some(caps) = ID_PATTERN.captures(arg) {
            let parse_id = |s: &str| {
                s.parse::<u64>().map(JobId).map_err(|_| FilterParseError::InvalidId(arg.to_string()))
            };
            let first = parse_id(&caps[1])?;
            match caps.get(2) {
                Some(second) => {
                    let second = parse_id(second.as_str())?;
                    Selector::Ids { min: Some(first), max: Some(second) }
                }
                None => match direction {
                    Direction::Newer => Selector::Ids { min: Some(first), max: None },
                    Direction::Older => Selector::Ids { min: None, max: Some(first) },
                },
            }
        } else if ID_LIST_PATTERN.is_match(arg) {
            let ids = arg
                .split(',')
                .map(|s| s.parse::<u64>().map(JobId))
                .collect::<Result<BTreeSet<_>, _>>()
                .map_err(|_| FilterParseError::InvalidId(arg.to_string()))?;
            Selector::IdSet(ids)
        } else if let Some(caps) = RELATIVE_PATTERN.captures(arg) {
            let out_of_range = || FilterParseError::OutOfRange(arg.to_string());
            let count: i64 = caps[1].parse().map_err(|_| out_of_range())?;
            let delta = match &caps[2] {
                "h" => TimeDelta::try_hours(count),
                "d" => TimeDelta::try_days(count),
                _ => TimeDelta::try_weeks(count),
            }
            .ok_or_else(out_of_range)?;
            let cutoff = clock.now().checked_sub_signed(delta).ok_or_else(out_of_range)?;
            Selector::Date(cutoff)
        } else {
            return Err(FilterParseError::Unrecognized(arg.to_string()));
        };
        Ok(Self { selector, direction })
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a job is selected.
    ///
    /// Date filters compare the finish time when known. Jobs still in the
    /// live queue without one never match.
    pub fn matches(&self, job: &Job) -> bool {
        match &self.selector {
            Selector::Date(bound) => match (job.reference_time(), self.direction) {
                (Some(t), Direction::Newer) => t >= *bound,
                (Some(t), Direction::Older) => t <= *bound,
                (None, _) => false,
            },
            Selector::Ids { min, max } => {
                min.is_none_or(|min| job.id >= min) && max.is_none_or(|max| job.id <= max)
            }
            Selector::IdSet(ids) => ids.contains(&job.id),
        }
    }

    /// Lazily keep matching jobs from a stream sorted by descending id.
    ///
    /// Id-bounded filters stop pulling once the stream drops below the lower
    /// bound.
    pub fn apply<'a, I>(&'a self, jobs: I) -> impl Iterator<Item = &'a Job> + 'a
    where
        I: IntoIterator<Item = &'a Job>,
        I::IntoIter: 'a,
    {
        let floor = match &self.selector {
            Selector::Ids { min, .. } => *min,
            Selector::IdSet(ids) => ids.first().copied(),
            Selector::Date(_) => None,
        };
        jobs.into_iter()
            .take_while(move |job| floor.is_none_or(|floor| job.id >= floor))
            .filter(move |job| self.matches(job))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
