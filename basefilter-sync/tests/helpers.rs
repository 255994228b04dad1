#![cfg(test)]
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[ctor::ctor]
fn init_debug() {
    basefilter_sync::debug::set_debug(true);
}

/// Creates a vault (a directory with `.obsidian/`) holding `files`.
pub fn setup_vault(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join(".obsidian")).unwrap();
    for (name, content) in files {
        write_file(temp_dir.path(), name, content);
    }
    temp_dir
}

pub fn write_file(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

pub fn read_file(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join(name)).unwrap()
}

pub fn assert_file(root: &Path, name: &str, content: &str) {
    assert_eq!(read_file(root, name), content, "unexpected content in {name}");
}

pub fn fenced(content: &str) -> String {
    format!("```base\n{content}```\n")
}
