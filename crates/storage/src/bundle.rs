// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gzip-compressed tar bundles, published atomically.

use chrono::NaiveDateTime;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tar::{Builder, EntryType, Header};
use uuid::Uuid;

/// `<YYYY-MM-DD>_<32 hex digits>.tar.gz`
pub fn bundle_name(now: NaiveDateTime) -> String {
    format!("{}_{}.tar.gz", now.format("%Y-%m-%d"), Uuid::new_v4().simple())
}

/// Member path for `path`: relative to `home` when under it, otherwise the
/// path with its root stripped.
pub fn member_path(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix(home) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path.components().filter(|c| matches!(c, Component::Normal(_))).collect(),
    }
}

/// Writes a bundle under a hidden `.partial` name and renames it into place
/// only once the archive is complete and synced.
pub struct BundleWriter {
    final_path: PathBuf,
    tmp_path: PathBuf,
    builder: Builder<GzEncoder<File>>,
    mtime: u64,
}

impl BundleWriter {
    pub fn create(final_path: PathBuf, mtime: u64) -> io::Result<Self> {
        let file_name = final_path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "bundle path has no file name"))?;
        let mut tmp_name = std::ffi::OsString::from(".");
        tmp_name.push(file_name);
        tmp_name.push(".partial");
        let tmp_path = final_path.with_file_name(tmp_name);

        let file = File::create(&tmp_path)?;
        let builder = Builder::new(GzEncoder::new(file, Compression::default()));
        Ok(Self { final_path, tmp_path, builder, mtime })
    }

    /// Copy a file from disk into the bundle.
    pub fn add_file(&mut self, src: &Path, member: &Path) -> io::Result<()> {
        self.builder.append_path_with_name(src, member)
    }

    /// Add an in-memory member.
    pub fn add_data(&mut self, member: &Path, data: &[u8]) -> io::Result<()> {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(self.mtime);
        self.builder.append_data(&mut header, member, data)
    }

    /// Finish the archive, sync it, and publish it under its final name.
    pub fn finish(self) -> io::Result<PathBuf> {
        let Self { final_path, tmp_path, builder, .. } = self;
        let published = builder
            .into_inner()
            .and_then(|encoder| encoder.finish())
            .and_then(|file| file.sync_all())
            .and_then(|_| fs::rename(&tmp_path, &final_path));
        if let Err(e) = published {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        Ok(final_path)
    }

    /// Drop a half-written bundle.
    pub fn abandon(self) {
        let Self { tmp_path, builder, .. } = self;
        drop(builder);
        let _ = fs::remove_file(&tmp_path);
    }
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
