#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{folio_cmd, write_index};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn live_runs_debounced_queries_from_stdin() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let index = write_index(dir.path());

    folio_cmd(dir.path())
        .args(["live", "--debounce", "10", "--index"])
        .arg(&index)
        .write_stdin("tokio\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Async Rust with Tokio"));

    folio_cmd(dir.path())
        .args(["recent", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tokio\""));
    Ok(())
}

#[test]
fn live_blank_line_clears() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let index = write_index(dir.path());

    folio_cmd(dir.path())
        .args(["live", "--index"])
        .arg(&index)
        .write_stdin("rust\n   \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(cleared)"))
        .stdout(predicate::str::contains("Learning Rust").not());
    Ok(())
}

#[test]
fn live_with_missing_index_stays_inert() -> anyhow::Result<()> {
    let dir = tempdir()?;
    folio_cmd(dir.path())
        .args(["live", "--debounce", "10", "--index"])
        .arg(dir.path().join("missing.json"))
        .write_stdin("rust\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}
