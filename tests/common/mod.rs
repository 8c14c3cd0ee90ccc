use assert_cmd::Command;
use filmshelf::storage::SqliteStorage;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn create_temp_storage() -> (SqliteStorage, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("library.db");
    let storage =
        SqliteStorage::new_with_path(db_path).expect("failed to create sqlite storage with path");
    (storage, tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// `filmshelf` binary pointed at a database and config inside `dir`, without colors
#[allow(dead_code)]
pub fn filmshelf_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("filmshelf").expect("binary not built");
    cmd.env("NO_COLOR", "1")
        .env_remove("FILMSHELF_DB")
        .env_remove("FILMSHELF_DEFAULT_SORT")
        .env_remove("FILMSHELF_RECENT_FILMS")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("config.yaml"))
        .arg("--db")
        .arg(dir.join("library.db"));
    cmd
}
