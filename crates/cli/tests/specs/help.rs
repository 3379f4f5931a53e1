// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and usage errors

use crate::prelude::*;

#[test]
#[serial]
fn help_lists_subcommands() {
    Cluster::new()
        .cj()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("details")
        .stdout_has("archive")
        .stdout_has("delete-all");
}

#[test]
#[serial]
fn details_help_explains_limit() {
    Cluster::new()
        .cj()
        .args(&["details", "--help"])
        .passes()
        .stdout_has("--limit-output")
        .stdout_has("time delta");
}

#[test]
#[serial]
fn version_shows_version() {
    Cluster::new().cj().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
#[serial]
fn unknown_output_format_is_a_usage_error() {
    Cluster::new().cj().args(&["details", "-o", "xml"]).fails_with(2).stderr_has("xml");
}
