// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cj-core: job record reconciliation for the cluster jobs (cj) CLI tool

pub mod macros;

pub mod clock;
pub mod fields;
pub mod filter;
pub mod job;
pub mod quantity;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use clock::{Clock, SystemClock};
pub use fields::{merge, JobFields, Source};
pub use filter::{Direction, Filter, FilterParseError, Selector};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{Job, JobId, JobState, QueueState};
pub use quantity::{Memory, QuantityError, Walltime};
pub use store::JobRecordStore;
