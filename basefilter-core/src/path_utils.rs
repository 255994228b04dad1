use crate::config::CONFIG_FILE_NAME;
use std::path::{Path, PathBuf};

/// Directory an Obsidian vault keeps its own settings in.
pub const VAULT_MARKER_DIR: &str = ".obsidian";

/// Find the settings file by walking up from a given path
/// First tries the BASEFILTER_CONFIG env var, then walks up the filesystem
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    if let Ok(config) = std::env::var("BASEFILTER_CONFIG") {
        return Some(PathBuf::from(config));
    }

    find_upwards(start_path, |dir| {
        let candidate = dir.join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    })
}

/// Find the vault root: the closest ancestor holding `basefilter.toml` or `.obsidian/`
///
/// Falls back to `start_path` itself (or its parent for a file) when no marker exists.
pub fn find_vault_root(start_path: &Path) -> PathBuf {
    let start_dir = if start_path.is_file() {
        start_path.parent().unwrap_or(start_path)
    } else {
        start_path
    };

    find_upwards(start_dir, |dir| {
        let is_root =
            dir.join(CONFIG_FILE_NAME).is_file() || dir.join(VAULT_MARKER_DIR).is_dir();
        is_root.then(|| dir.to_path_buf())
    })
    .unwrap_or_else(|| start_dir.to_path_buf())
}

fn find_upwards<T>(start_path: &Path, mut probe: impl FnMut(&Path) -> Option<T>) -> Option<T> {
    let mut current = start_path;
    loop {
        if let Some(found) = probe(current) {
            return Some(found);
        }
        // Reached filesystem root without a match
        current = current.parent()?;
    }
}
