//! Aggregation and reporting for `basefilter` CLI.

use super::args::{Args, Mode};
use super::worker::ProcessResult;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Aggregated results of a CLI run.
#[derive(Debug, Default)]
pub(crate) struct AggregatedResults {
    pub documents_processed: usize,
    pub blocks_seen: usize,
    pub blocks_updated: usize,
    pub files_rewritten: usize,
    pub errors: Vec<String>,
    /// Referenced `.base` files, each listed once however many notes embed it
    pub referenced: BTreeSet<PathBuf>,
    pub unresolved: Vec<String>,
    pub listing: Vec<String>,
}

impl AggregatedResults {
    /// Fold a batch of `ProcessResult` into the counts.
    pub(crate) fn absorb(&mut self, results: Vec<ProcessResult>) {
        for result in results {
            match result {
                ProcessResult::Applied {
                    blocks_seen,
                    blocks_updated,
                    changed,
                    referenced,
                    unresolved,
                } => {
                    self.documents_processed += 1;
                    self.blocks_seen += blocks_seen;
                    self.blocks_updated += blocks_updated;
                    if changed {
                        self.files_rewritten += 1;
                    }
                    self.referenced.extend(referenced);
                    self.unresolved.extend(unresolved);
                }
                ProcessResult::Referenced { changed } => {
                    self.blocks_seen += 1;
                    if changed {
                        self.blocks_updated += 1;
                        self.files_rewritten += 1;
                    }
                }
                ProcessResult::Listed { lines, unresolved } => {
                    self.documents_processed += 1;
                    self.blocks_seen += lines.len();
                    self.listing.extend(lines);
                    self.unresolved.extend(unresolved);
                }
                ProcessResult::Error(e) => {
                    self.errors.push(e);
                }
            }
        }
    }
}

/// Aggregate a vector of `ProcessResult` into counts.
pub(crate) fn aggregate_results(results: Vec<ProcessResult>) -> AggregatedResults {
    let mut agg = AggregatedResults::default();
    agg.absorb(results);
    agg
}

/// Print a CLI summary report based on aggregated results.
pub(crate) fn print_summary(agg: &AggregatedResults, args: &Args, mode: &Mode) {
    eprintln!();
    match mode {
        Mode::Show => {
            eprintln!("=== Show Summary ===");
            eprintln!("Scanned {} document(s)", agg.documents_processed);
            eprintln!("Found {} block(s)", agg.blocks_seen);
        }
        Mode::Set(_) if args.dry_run => {
            eprintln!("=== Dry Run Summary ===");
            eprintln!("Would process {} document(s)", agg.documents_processed);
            eprintln!("Would update {} of {} block(s)", agg.blocks_updated, agg.blocks_seen);
            eprintln!("Would rewrite {} file(s)", agg.files_rewritten);
        }
        Mode::Set(value) => {
            if value.is_empty() {
                eprintln!("=== Clear Summary ===");
            } else {
                eprintln!("=== Filter Summary ===");
            }
            eprintln!("Processed {} document(s)", agg.documents_processed);
            eprintln!("Updated {} of {} block(s)", agg.blocks_updated, agg.blocks_seen);
            eprintln!("Rewrote {} file(s)", agg.files_rewritten);
        }
    }

    if !agg.unresolved.is_empty() {
        eprintln!("Unresolved embeds: {}", agg.unresolved.len());
    }

    if !agg.errors.is_empty() {
        eprintln!();
        eprintln!("Errors: {}", agg.errors.len());
        if !args.verbose {
            eprintln!("Run with --verbose to see details");
        } else {
            for error in &agg.errors {
                eprintln!("  - {}", error);
            }
        }
    }

    if args.dry_run && !args.verbose {
        eprintln!();
        eprintln!("Dry run complete. Use -v to see detailed changes.");
    }
}
