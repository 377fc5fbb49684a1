#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{folio_cmd, write_index};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn recent_json(dir: &std::path::Path) -> anyhow::Result<Vec<String>> {
    let out = folio_cmd(dir)
        .args(["recent", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&out)?;
    Ok(serde_json::from_value(value)?)
}

#[test]
fn recent_handles_empty_state() -> anyhow::Result<()> {
    let dir = tempdir()?;
    folio_cmd(dir.path())
        .arg("recent")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches"));
    Ok(())
}

#[test]
fn searches_are_remembered_most_recent_first() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let index = write_index(dir.path());

    for query in ["rust", "tokio", "iceland", "rust"] {
        folio_cmd(dir.path())
            .args(["search", query, "--index"])
            .arg(&index)
            .assert()
            .success();
    }

    assert_eq!(recent_json(dir.path())?, vec!["rust", "iceland", "tokio"]);

    folio_cmd(dir.path())
        .arg("recent")
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. rust"));
    Ok(())
}

#[test]
fn recent_keeps_five_entries() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let index = write_index(dir.path());

    for query in ["a1", "b22", "c333", "d444", "e555", "f666"] {
        folio_cmd(dir.path())
            .args(["search", query, "--index"])
            .arg(&index)
            .assert()
            .success();
    }

    assert_eq!(
        recent_json(dir.path())?,
        vec!["f666", "e555", "d444", "c333", "b22"]
    );
    Ok(())
}

#[test]
fn recent_clear_empties_the_list() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let index = write_index(dir.path());

    folio_cmd(dir.path())
        .args(["search", "rust", "--index"])
        .arg(&index)
        .assert()
        .success();

    folio_cmd(dir.path())
        .args(["recent", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared recent searches"));

    assert!(recent_json(dir.path())?.is_empty());
    Ok(())
}
