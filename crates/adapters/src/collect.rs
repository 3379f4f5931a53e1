// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::source::SourceAdapter;
use cj_core::JobRecordStore;

/// Fetch every source and merge them into one store.
///
/// Sources are applied in [`cj_core::Source::APPLY_ORDER`] regardless of the order
/// given. An unavailable source is logged and skipped.
pub fn collect_jobs(sources: &[&dyn SourceAdapter], restrict_to_owner: bool) -> JobRecordStore {
    let mut ordered: Vec<&dyn SourceAdapter> = sources.to_vec();
    ordered.sort_by_key(|s| s.source());

    let mut store = JobRecordStore::new();
    for source in ordered {
        match source.fetch(restrict_to_owner) {
            Ok(pairs) => {
                tracing::debug!(source = %source.source(), jobs = pairs.len(), "merged source");
                store.apply(pairs);
            }
            Err(e) => {
                tracing::warn!(source = %source.source(), error = %e, "source unavailable, continuing without it");
            }
        }
    }
    store
}

#[cfg(test)]
#[path = "collect_tests.rs"]
mod tests;
