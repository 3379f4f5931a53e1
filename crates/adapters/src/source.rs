// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The producer seam: each source yields partial fields per job id.

use crate::process::CommandError;
use cj_core::{JobFields, JobId, Source};
use std::path::PathBuf;
use thiserror::Error;

/// A source could not be read. Collection skips it and carries on.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {what}: {detail}")]
    Malformed { what: &'static str, detail: String },
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// A producer of partial job data.
pub trait SourceAdapter {
    fn source(&self) -> Source;

    /// Read the source. With `restrict_to_owner`, only jobs owned by the
    /// configured user are returned (sources that are inherently per-user
    /// ignore the flag).
    fn fetch(&self, restrict_to_owner: bool) -> Result<Vec<(JobId, JobFields)>, SourceError>;
}

impl<S: SourceAdapter + ?Sized> SourceAdapter for &S {
    fn source(&self) -> Source {
        (**self).source()
    }

    fn fetch(&self, restrict_to_owner: bool) -> Result<Vec<(JobId, JobFields)>, SourceError> {
        (**self).fetch(restrict_to_owner)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{SourceAdapter, SourceError};
    use cj_core::{JobFields, JobId, Source};
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FakeSourceState {
        pairs: Vec<(JobId, JobFields)>,
        failure: Option<String>,
        fetches: Vec<bool>,
    }

    /// Fake source returning canned pairs (or a canned failure)
    #[derive(Clone)]
    pub struct FakeSource {
        source: Source,
        inner: Arc<Mutex<FakeSourceState>>,
    }

    impl FakeSource {
        pub fn new(source: Source) -> Self {
            Self {
                source,
                inner: Arc::new(Mutex::new(FakeSourceState {
                    pairs: Vec::new(),
                    failure: None,
                    fetches: Vec::new(),
                })),
            }
        }

        pub fn with_job(self, id: u64, fields: JobFields) -> Self {
            self.inner.lock().pairs.push((JobId(id), fields));
            self
        }

        /// Make every fetch fail as unavailable.
        pub fn failing(self, detail: &str) -> Self {
            self.inner.lock().failure = Some(detail.to_string());
            self
        }

        /// `restrict_to_owner` flag of every fetch so far
        pub fn fetches(&self) -> Vec<bool> {
            self.inner.lock().fetches.clone()
        }
    }

    impl SourceAdapter for FakeSource {
        fn source(&self) -> Source {
            self.source
        }

        fn fetch(&self, restrict_to_owner: bool) -> Result<Vec<(JobId, JobFields)>, SourceError> {
            let mut state = self.inner.lock();
            state.fetches.push(restrict_to_owner);
            match &state.failure {
                Some(detail) => Err(SourceError::Malformed { what: "fake source", detail: detail.clone() }),
                None => Ok(state.pairs.clone()),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSource;
