// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Archiving finished jobs into compressed bundles

mod archive;
mod bundle;
mod log_rewrite;

pub use archive::{archive, select, ArchiveError, ArchiveLayout, ArchiveReport};
pub use bundle::{bundle_name, member_path, BundleWriter};
pub use log_rewrite::LogRewrite;
