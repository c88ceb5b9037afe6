#![allow(dead_code)]

pub mod http_fixture;

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::{Builder, TempDir};

pub const EXAMPLE_CSV: &str = "Timestamp,Name,Amount,Category\n\
2024-03-10,Coffee,120,Cafe\n\
2024-03-10,Salary,50000,Salary";

/// Writes `body` as a config file in a fresh temp dir so tests never read the
/// developer's own `~/.pocketdash/config.toml`.
pub fn temp_config(body: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix("pocketdash-config").tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, body)?;
    Ok((dir, path))
}

pub fn write_csv(dir: &TempDir, name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, body)?;
    Ok(path)
}

pub fn envelope_value<T: serde::Serialize>(envelope: &T) -> Value {
    serde_json::to_value(envelope).unwrap_or(Value::Null)
}
