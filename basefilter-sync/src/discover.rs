// basefilter-sync/src/discover.rs

use crate::block::Block;
use basefilter_core::basefilter_debug;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!\[\[([^\]|]+\.base)(?:\|[^\]]+)?\]\]$").expect("embed pattern is valid")
});

/// A `![[file.base]]` embed line in a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRef {
    /// Line of the embed, 0-based
    pub line: usize,
    /// Link target as written in the note
    pub file_path: String,
}

/// Recursively discovers all Markdown notes in a directory
///
/// Returns a sorted vector of paths for deterministic processing. Hidden
/// directories such as `.obsidian` and `.git` are skipped.
pub fn discover_markdown_files(source_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    discover_files(source_dir, "md")
}

/// Recursively discovers all files with the given extension in a directory, sorted.
pub fn discover_files(source_dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    discover_files_recursive(source_dir, extension, &mut files)?;
    files.sort();
    Ok(files)
}

fn discover_files_recursive(
    dir: &Path,
    extension: &str,
    files: &mut Vec<PathBuf>,
) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            if !is_hidden(&path) {
                discover_files_recursive(&path, extension, files)?;
            }
        } else if path.extension() == Some(std::ffi::OsStr::new(extension)) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn fence_pattern(language: &str) -> Option<Regex> {
    let pattern = format!(
        r"(?m)^[ \t]*```{}[ \t]*\r?\n((?s:.*?))^[ \t]*```[ \t]*\r?$",
        regex::escape(language)
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            basefilter_debug!("cannot build fence pattern for {:?}: {}", language, e);
            None
        }
    }
}

/// Finds every fenced block tagged with `language` in `text`
///
/// The language is matched literally, so tags such as `c++` work. Fences that
/// are never closed yield no block.
pub fn find_inline_blocks(text: &str, language: &str) -> Vec<Block> {
    let Some(re) = fence_pattern(language) else {
        return Vec::new();
    };

    re.captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let content = caps.get(1)?.as_str().to_string();
            let start_line = count_newlines(&text[..whole.start()]);
            let end_line = start_line + count_newlines(whole.as_str());
            Some(Block::inline(start_line, end_line, content))
        })
        .collect()
}

/// Returns the `.base` path of a line that consists of a single base embed.
///
/// Accepts `![[path.base]]` and `![[path.base|alias]]` with surrounding
/// whitespace. Other file types, plain `[[links]]` and embeds inside larger text
/// are rejected.
pub fn extract_embed(line: &str) -> Option<String> {
    EMBED
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Finds every base embed line in `text`.
pub fn find_embeds(text: &str) -> Vec<EmbedRef> {
    text.split('\n')
        .enumerate()
        .filter_map(|(line, content)| {
            extract_embed(content).map(|file_path| EmbedRef { line, file_path })
        })
        .collect()
}

/// Resolves an embed link to an existing `.base` file
///
/// Tries the link relative to the vault root, then relative to the note's
/// directory, and for bare file names the first `.base` file of that name
/// anywhere in the vault.
pub fn resolve_embed(vault_root: &Path, note_path: &Path, link: &str) -> Option<PathBuf> {
    let from_root = vault_root.join(link);
    if from_root.is_file() {
        return Some(from_root);
    }

    if let Some(note_dir) = note_path.parent() {
        let from_note = note_dir.join(link);
        if from_note.is_file() {
            return Some(from_note);
        }
    }

    if link.contains('/') {
        return None;
    }

    let candidates = match discover_files(vault_root, "base") {
        Ok(files) => files,
        Err(e) => {
            basefilter_debug!("cannot scan {} for {}: {}", vault_root.display(), link, e);
            return None;
        }
    };
    candidates
        .into_iter()
        .find(|path| path.file_name().and_then(|n| n.to_str()) == Some(link))
}

/// Reads the embedded `.base` file into a referenced block.
pub fn load_referenced_block(embed: &EmbedRef, resolved: &Path) -> std::io::Result<Block> {
    let content = fs::read_to_string(resolved)?;
    Ok(Block::referenced(
        embed.line,
        resolved.to_path_buf(),
        content,
    ))
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}
