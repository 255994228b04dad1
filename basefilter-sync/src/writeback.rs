// basefilter-sync/src/writeback.rs

use crate::block::{Block, BlockKind};
use crate::discover::find_inline_blocks;
use basefilter_core::{basefilter_debug, splice};
use ropey::Rope;
use std::fs;

/// How far (in lines) a block may have drifted before it counts as a different block.
pub const LINE_DRIFT_TOLERANCE: usize = 3;

/// Errors that can occur while writing a block back
#[derive(Debug)]
pub enum WriteBackError {
    IoError(std::io::Error),
    /// No block of the target language starts near the recorded line any more
    BlockVanished { start_line: usize },
    /// A referenced block without a file to write to
    MissingPath,
}

impl From<std::io::Error> for WriteBackError {
    fn from(err: std::io::Error) -> Self {
        WriteBackError::IoError(err)
    }
}

impl std::fmt::Display for WriteBackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteBackError::IoError(e) => write!(f, "IO error: {}", e),
            WriteBackError::BlockVanished { start_line } => {
                write!(f, "No block found near line {}", start_line + 1)
            }
            WriteBackError::MissingPath => write!(f, "Referenced block has no file path"),
        }
    }
}

impl std::error::Error for WriteBackError {}

/// Re-reads an inline block from the buffer, following it if lines moved
///
/// Prefers the block starting on the recorded line, then the first one within
/// [`LINE_DRIFT_TOLERANCE`] lines. Updates the record's line markers and
/// content and returns the fresh content.
pub fn refresh_inline_block(
    buffer: &Rope,
    block: &mut Block,
    language: &str,
) -> Result<String, WriteBackError> {
    let fresh_blocks = find_inline_blocks(&buffer.to_string(), language);
    let fresh = fresh_blocks
        .iter()
        .find(|b| b.start_line == block.start_line)
        .or_else(|| {
            fresh_blocks
                .iter()
                .find(|b| b.start_line.abs_diff(block.start_line) <= LINE_DRIFT_TOLERANCE)
        })
        .ok_or(WriteBackError::BlockVanished {
            start_line: block.start_line,
        })?;

    block.start_line = fresh.start_line;
    block.end_line = fresh.end_line;
    block.content = fresh.content.clone();
    Ok(fresh.content.clone())
}

/// Replaces the lines between an inline block's fences with `new_content`
///
/// A trailing newline is added when missing so the closing fence stays on its
/// own line. The block's `end_line` is moved to the new closing fence.
pub fn replace_inline_block(buffer: &mut Rope, block: &mut Block, new_content: &str) {
    let mut to_insert = new_content.to_string();
    if !to_insert.ends_with('\n') {
        to_insert.push('\n');
    }

    let last_line = buffer.len_lines();
    let start = buffer.line_to_char((block.start_line + 1).min(last_line));
    let end = buffer.line_to_char(block.end_line.min(last_line)).max(start);
    buffer.remove(start..end);
    buffer.insert(start, &to_insert);

    let inserted_lines = to_insert.matches('\n').count();
    block.end_line = block.start_line + 1 + inserted_lines;
    block.content = to_insert;
}

/// Applies `filter_value` to a block and persists the result
///
/// Inline blocks are re-read from `buffer` and replaced in place; referenced
/// blocks go through [`write_referenced_block`]. Returns `false` when splicing
/// left the content unchanged, in which case nothing is written.
pub fn update_block(
    buffer: &mut Rope,
    block: &mut Block,
    filter_value: &str,
    language: &str,
) -> Result<bool, WriteBackError> {
    if block.kind == BlockKind::Referenced {
        return write_referenced_block(block, filter_value);
    }

    let current = refresh_inline_block(buffer, block, language)?;
    let new_content = splice(&current, filter_value);
    if new_content != current {
        replace_inline_block(buffer, block, &new_content);
        basefilter_debug!(
            "rewrote inline block at lines {}..={}",
            block.start_line,
            block.end_line
        );
    }

    block.filter_value = filter_value.to_string();
    Ok(new_content != current)
}

/// Applies `filter_value` to a referenced block and overwrites its `.base` file
///
/// Returns `false`, without writing, when the content is unchanged.
pub fn write_referenced_block(
    block: &mut Block,
    filter_value: &str,
) -> Result<bool, WriteBackError> {
    let new_content = splice(&block.content, filter_value);
    let changed = new_content != block.content;

    if changed {
        let path = block.path.as_ref().ok_or(WriteBackError::MissingPath)?;
        fs::write(path, &new_content)?;
        basefilter_debug!("rewrote {}", path.display());
        block.content = new_content;
    }

    block.filter_value = filter_value.to_string();
    Ok(changed)
}
