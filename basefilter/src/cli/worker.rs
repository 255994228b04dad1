use super::args::Args;
use super::logs::{vlog, vlog_if};
use basefilter_core::Settings;
use basefilter_sync::{
    apply_to_base_file, apply_to_note, register_scan, scan_note, FilterRegistry, FilterSlot,
};
use std::path::{Path, PathBuf};

/// Enum to represent the result of processing a single file
#[derive(Debug)]
pub enum ProcessResult {
    /// A note whose inline blocks were given the filter value
    Applied {
        blocks_seen: usize,
        blocks_updated: usize,
        changed: bool,
        referenced: Vec<PathBuf>,
        unresolved: Vec<String>,
    },
    /// A referenced `.base` file given the filter value
    Referenced { changed: bool },
    /// A note whose blocks were listed
    Listed { lines: Vec<String>, unresolved: Vec<String> },
    Error(String),
}

/// Name of a note relative to the vault, used in block identity keys
pub fn document_name(note: &Path, vault_root: &Path) -> String {
    note.strip_prefix(vault_root)
        .unwrap_or(note)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Apply the filter value to one note (called by worker threads)
pub fn apply(
    note: &Path,
    args: &Args,
    filter_value: &str,
    settings: &Settings,
    vault_root: &Path,
) -> ProcessResult {
    vlog!(args, {"Processing: {}", note.display()});

    let report = match apply_to_note(note, vault_root, filter_value, settings, args.dry_run) {
        Ok(report) => report,
        Err(e) => {
            let error_msg = format!("Failed to update {}: {}", note.display(), e);
            vlog!(args, {"  Warning: {}", error_msg});
            return ProcessResult::Error(error_msg);
        }
    };

    let changed = report.blocks_updated > 0;
    vlog_if!(args, changed && args.dry_run, {"  Would rewrite {} block(s)", report.blocks_updated});
    vlog_if!(args, report.rewritten, {"  Rewrote {} block(s)", report.blocks_updated});
    for link in &report.unresolved {
        vlog!(args, {"  Unresolved embed: {}", link});
    }

    ProcessResult::Applied {
        blocks_seen: report.blocks_seen,
        blocks_updated: report.blocks_updated,
        changed,
        referenced: report.referenced,
        unresolved: report.unresolved,
    }
}

/// Apply the filter value to each referenced `.base` file, once per file
pub fn apply_referenced<'a>(
    files: impl IntoIterator<Item = &'a PathBuf>,
    args: &Args,
    filter_value: &str,
) -> Vec<ProcessResult> {
    files
        .into_iter()
        .map(|path| match apply_to_base_file(path, filter_value, args.dry_run) {
            Ok(changed) => {
                vlog_if!(args, changed, {
                    "{} {}",
                    if args.dry_run { "Would rewrite:" } else { "Rewrote:" },
                    path.display()
                });
                ProcessResult::Referenced { changed }
            }
            Err(e) => ProcessResult::Error(format!("Failed to update {}: {}", path.display(), e)),
        })
        .collect()
}

/// List the blocks of one note with their current filter (called by worker threads)
pub fn show(note: &Path, args: &Args, settings: &Settings, vault_root: &Path) -> ProcessResult {
    vlog!(args, {"Scanning: {}", note.display()});

    let scan = match scan_note(note, vault_root, settings) {
        Ok(scan) => scan,
        Err(e) => return ProcessResult::Error(format!("Failed to read {}: {}", note.display(), e)),
    };

    let document = document_name(note, vault_root);
    let mut registry = FilterRegistry::new();
    register_scan(&mut registry, &document, &scan);

    let lines = registry
        .iter()
        .map(|(key, slot)| describe_slot(key, slot, vault_root))
        .collect();

    ProcessResult::Listed {
        lines,
        unresolved: scan.unresolved,
    }
}

fn describe_slot(key: &str, slot: &FilterSlot, vault_root: &Path) -> String {
    let value = if slot.value.is_empty() {
        "(none)".to_string()
    } else {
        format!("{:?}", slot.value)
    };
    match &slot.block.path {
        Some(path) => format!("{key}: {value} [{}]", document_name(path, vault_root)),
        None => format!("{key}: {value} [line {}]", slot.block.start_line + 1),
    }
}
