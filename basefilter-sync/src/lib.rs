// basefilter-sync/src/lib.rs

pub mod apply;
pub mod block;
pub mod discover;
pub mod registry;
pub mod settings;
pub mod writeback;

// Re-export core's debug switch and macro
pub use basefilter_core::basefilter_debug;
pub use basefilter_core::debug;

pub use apply::{
    apply_to_base_file, apply_to_document, apply_to_note, register_scan, scan_note,
    DocumentUpdate, NoteReport, NoteScan,
};
pub use block::{Block, BlockKind};
pub use discover::{
    discover_markdown_files, extract_embed, find_embeds, find_inline_blocks,
    load_referenced_block, resolve_embed, EmbedRef,
};
pub use registry::{FilterRegistry, FilterSlot};
pub use settings::SettingsStore;
pub use writeback::{
    refresh_inline_block, replace_inline_block, update_block, write_referenced_block,
    WriteBackError, LINE_DRIFT_TOLERANCE,
};
