// basefilter-sync/src/block.rs

use std::fmt;
use std::path::PathBuf;

/// Where a base block lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// A fenced block inside the note itself
    Inline,
    /// A `.base` file pulled into the note with `![[file.base]]`
    Referenced,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Inline => write!(f, "inline"),
            BlockKind::Referenced => write!(f, "embed"),
        }
    }
}

/// A base block discovered in a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Line of the opening fence (or of the embed), 0-based
    pub start_line: usize,
    /// Line of the closing fence (equal to `start_line` for embeds), 0-based
    pub end_line: usize,
    /// Text between the fences, or the whole referenced file
    pub content: String,
    /// Current name filter, as extracted from `content`
    pub filter_value: String,
    /// Referenced file, for embeds
    pub path: Option<PathBuf>,
}

impl Block {
    /// Builds an inline block record, extracting its current filter value.
    pub fn inline(start_line: usize, end_line: usize, content: String) -> Self {
        let filter_value = basefilter_core::extract_filter_value(&content);
        Self {
            kind: BlockKind::Inline,
            start_line,
            end_line,
            content,
            filter_value,
            path: None,
        }
    }

    /// Builds a referenced block record for the embed on `line`.
    pub fn referenced(line: usize, path: PathBuf, content: String) -> Self {
        let filter_value = basefilter_core::extract_filter_value(&content);
        Self {
            kind: BlockKind::Referenced,
            start_line: line,
            end_line: line,
            content,
            filter_value,
            path: Some(path),
        }
    }

    /// Stable identity of the `index`-th block of its kind in `document`.
    pub fn key(document: &str, kind: BlockKind, index: usize) -> String {
        format!("{}-{}-{}", document, kind, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_extracts_filter_value() {
        let block = Block::inline(
            2,
            6,
            "filters:\n  and:\n    - file.name.contains(\"Ann\")\n".to_string(),
        );
        assert_eq!(block.kind, BlockKind::Inline);
        assert_eq!(block.filter_value, "Ann");
        assert!(block.path.is_none());
    }

    #[test]
    fn test_referenced_spans_one_line() {
        let block = Block::referenced(4, PathBuf::from("People.base"), String::new());
        assert_eq!(block.start_line, 4);
        assert_eq!(block.end_line, 4);
        assert_eq!(block.filter_value, "");
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            Block::key("notes/a.md", BlockKind::Inline, 0),
            "notes/a.md-inline-0"
        );
        assert_eq!(
            Block::key("notes/a.md", BlockKind::Referenced, 2),
            "notes/a.md-embed-2"
        );
    }
}
