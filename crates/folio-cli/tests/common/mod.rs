#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

#[allow(dead_code)]
pub const INDEX: &str = r#"[
    {"id": "home", "url": "index.html", "title": "Home", "type": "home",
     "description": "Welcome to my portfolio"},
    {"id": "blogs-rust", "url": "blogs/rust.html", "title": "Learning Rust", "type": "blog",
     "category": "Programming", "date": "2024-03-01",
     "content": "Ownership and borrowing make Rust memory safe without a garbage collector."},
    {"id": "blogs-tokio", "url": "blogs/tokio.html", "title": "Async Rust with Tokio", "type": "blog",
     "content": "Tokio is an asynchronous runtime for Rust."},
    {"id": "photos", "url": "photos.html", "title": "Photography", "type": "page",
     "description": "Travel photos from Iceland"}
]"#;

/// Create a configured `folio` command whose data and config directories point at
/// `dir`, with colors disabled.
#[allow(dead_code)]
pub fn folio_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("folio"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("FOLIO_DATA_DIR", dir);
    cmd.env("FOLIO_CONFIG_DIR", dir);
    cmd.env_remove("FOLIO_CONFIG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write the fixture index into `dir` and return its path.
#[allow(dead_code)]
pub fn write_index(dir: &Path) -> PathBuf {
    let path = dir.join("search-index.json");
    std::fs::write(&path, INDEX).expect("write fixture index");
    path
}
