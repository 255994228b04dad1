// basefilter-sync/src/apply.rs

use crate::block::{Block, BlockKind};
use crate::discover::{find_embeds, find_inline_blocks, load_referenced_block, resolve_embed};
use crate::registry::FilterRegistry;
use crate::writeback::{update_block, write_referenced_block, WriteBackError};
use basefilter_core::{basefilter_debug, splice, Settings};
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of applying a filter value to the inline blocks of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub text: String,
    pub blocks_seen: usize,
    pub blocks_updated: usize,
}

impl DocumentUpdate {
    pub fn changed(&self) -> bool {
        self.blocks_updated > 0
    }
}

/// Outcome of applying a filter value to a note on disk
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoteReport {
    pub blocks_seen: usize,
    pub blocks_updated: usize,
    pub rewritten: bool,
    /// Resolved `.base` files embedded in the note, left for a later pass
    pub referenced: Vec<PathBuf>,
    /// Embed links that did not resolve to a file
    pub unresolved: Vec<String>,
}

/// Blocks found in a note, without changing anything
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoteScan {
    pub inline: Vec<Block>,
    pub referenced: Vec<Block>,
    pub unresolved: Vec<String>,
}

/// Sets `filter_value` on every inline block of `language` in `text`
///
/// Blocks are rewritten from the bottom of the document up so the line markers
/// of blocks not yet visited stay valid.
pub fn apply_to_document(
    text: &str,
    filter_value: &str,
    language: &str,
) -> Result<DocumentUpdate, WriteBackError> {
    let mut buffer = Rope::from_str(text);
    let mut blocks = find_inline_blocks(text, language);
    let blocks_seen = blocks.len();

    let mut blocks_updated = 0;
    for block in blocks.iter_mut().rev() {
        if update_block(&mut buffer, block, filter_value, language)? {
            blocks_updated += 1;
        }
    }

    Ok(DocumentUpdate {
        text: buffer.to_string(),
        blocks_seen,
        blocks_updated,
    })
}

/// Applies `filter_value` to a note's inline blocks and collects its embeds
///
/// The note is rewritten only when a block changed and `dry_run` is off.
/// Embedded `.base` files are resolved but not touched; see
/// [`apply_to_base_file`].
pub fn apply_to_note(
    note: &Path,
    vault_root: &Path,
    filter_value: &str,
    settings: &Settings,
    dry_run: bool,
) -> Result<NoteReport, WriteBackError> {
    let text = fs::read_to_string(note)?;
    let update = apply_to_document(&text, filter_value, &settings.code_fence_language)?;

    let rewritten = update.changed() && !dry_run;
    if rewritten {
        fs::write(note, &update.text)?;
        basefilter_debug!("rewrote {}", note.display());
    }

    let mut report = NoteReport {
        blocks_seen: update.blocks_seen,
        blocks_updated: update.blocks_updated,
        rewritten,
        ..NoteReport::default()
    };

    if settings.target_embeds {
        for embed in find_embeds(&text) {
            match resolve_embed(vault_root, note, &embed.file_path) {
                Some(path) => report.referenced.push(path),
                None => report.unresolved.push(embed.file_path),
            }
        }
    }

    Ok(report)
}

/// Applies `filter_value` to a referenced `.base` file
///
/// Returns whether the file's content changes. With `dry_run` the file is left
/// as it is.
pub fn apply_to_base_file(
    path: &Path,
    filter_value: &str,
    dry_run: bool,
) -> Result<bool, WriteBackError> {
    let content = fs::read_to_string(path)?;

    if dry_run {
        return Ok(splice(&content, filter_value) != content);
    }

    let mut block = Block::referenced(0, path.to_path_buf(), content);
    write_referenced_block(&mut block, filter_value)
}

/// Reads a note and lists its blocks without writing anything.
pub fn scan_note(
    note: &Path,
    vault_root: &Path,
    settings: &Settings,
) -> Result<NoteScan, WriteBackError> {
    let text = fs::read_to_string(note)?;
    let mut scan = NoteScan {
        inline: find_inline_blocks(&text, &settings.code_fence_language),
        ..NoteScan::default()
    };

    if settings.target_embeds {
        for embed in find_embeds(&text) {
            match resolve_embed(vault_root, note, &embed.file_path) {
                Some(path) => scan.referenced.push(load_referenced_block(&embed, &path)?),
                None => scan.unresolved.push(embed.file_path),
            }
        }
    }

    Ok(scan)
}

/// Brings `registry` in line with a fresh scan of `document`
///
/// Slots for blocks that disappeared are destroyed, new blocks get a slot.
/// Returns the keys of the destroyed slots.
pub fn register_scan(registry: &mut FilterRegistry, document: &str, scan: &NoteScan) -> Vec<String> {
    let expected = FilterRegistry::expected_keys(document, scan.inline.len(), scan.referenced.len());
    let removed = registry.reconcile(&expected);

    let inline = scan.inline.iter().enumerate().map(|(i, b)| (BlockKind::Inline, i, b));
    let referenced = scan
        .referenced
        .iter()
        .enumerate()
        .map(|(i, b)| (BlockKind::Referenced, i, b));
    for (kind, index, block) in inline.chain(referenced) {
        registry.register(Block::key(document, kind, index), block.clone());
    }

    removed
}

#[cfg(test)]
mod tests;
