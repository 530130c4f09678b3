// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn edit_without_fields_fails() {
    let temp = TempDir::new().unwrap();

    marquee(&temp)
        .args(["edit", "12", "--description", "x"])
        .assert()
        .success();

    marquee(&temp)
        .args(["edit", "12", "--verbose"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn invalid_id_fails() {
    let temp = TempDir::new().unwrap();

    marquee(&temp)
        .args(["delete", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid movie id: 0"));
}

#[test]
fn bad_backend_url_fails() {
    let temp = TempDir::new().unwrap();

    marquee(&temp)
        .env("MARQUEE_BACKEND_URL", "localhost:3000")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http://"));
}

#[test]
fn limit_out_of_range_fails() {
    let temp = TempDir::new().unwrap();

    marquee(&temp)
        .args(["list", "--limit", "500"])
        .assert()
        .failure();
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();

    marquee(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog:"))
        .stdout(predicate::str::contains("watch"));
}
