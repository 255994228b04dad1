//! basefilter: keep the name filter of base query blocks in sync
//!
//! Command-line interface for setting, clearing and listing the
//! `file.name.contains(...)` filter of base blocks in Markdown notes.
//!
//! The tool discovers every Markdown note under a source directory, rewrites the
//! fenced base blocks inside each note in parallel, then rewrites every `.base`
//! file embedded by those notes exactly once.
#![allow(clippy::multiple_crate_versions)]

#[cfg(feature = "cli")]
#[path = "cli/args.rs"]
mod args;
#[cfg(feature = "cli")]
#[path = "cli/logs.rs"]
mod logs;
#[cfg(feature = "cli")]
#[path = "cli/orchestrate.rs"]
mod orchestrate;
#[cfg(feature = "cli")]
#[path = "cli/report.rs"]
mod report;
#[cfg(feature = "cli")]
#[path = "cli/worker.rs"]
mod worker;

/// Command-line interface for syncing name filters.
#[cfg(feature = "cli")]
pub mod inner {
    use crate::args::{print_usage, Args, Mode};
    use crate::logs::vlog;
    use crate::orchestrate::process_all;
    use crate::report::{aggregate_results, print_summary};
    use crate::worker::{apply, apply_referenced, show};
    use basefilter_core::config::{load_settings, load_settings_from};
    use basefilter_core::path_utils::find_vault_root;
    use basefilter_sync::{discover_markdown_files, SettingsStore};
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Entry point for the `basefilter` command-line interface.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if:
    /// - command-line argument parsing fails,
    /// - the source path cannot be resolved,
    /// - or the source directory cannot be read.
    ///
    /// The process exits with a non-zero status on invalid arguments or settings.
    pub fn main() -> io::Result<()> {
        let args: Args = facet_args::from_std_args()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{e}")))?;

        if args.help {
            print_usage();
            std::process::exit(0);
        }

        let mode = match args.mode() {
            Ok(mode) => mode,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!("Run with --help for usage");
                std::process::exit(1);
            }
        };

        if !Path::new(&args.source).exists() {
            eprintln!("Error: Source path does not exist: {}", args.source);
            std::process::exit(1);
        }
        let source_path = fs::canonicalize(&args.source)?;

        let loaded = match &args.config {
            Some(config) => load_settings(Path::new(config)),
            None => load_settings_from(&source_path),
        };
        let mut store = match loaded {
            Ok(settings) => SettingsStore::new(settings),
            Err(e) => {
                eprintln!("Error: Failed to read settings: {}", e);
                std::process::exit(1);
            }
        };

        if args.lang.as_deref() == Some("") {
            eprintln!("Error: --lang must not be empty");
            std::process::exit(1);
        }
        let settings = store.update(|s| {
            if let Some(lang) = &args.lang {
                s.code_fence_language = lang.clone();
            }
            if args.no_embeds {
                s.target_embeds = false;
            }
        });

        let vault_root = find_vault_root(&source_path);
        let notes = if source_path.is_file() {
            vec![source_path.clone()]
        } else {
            discover_markdown_files(&source_path)?
        };

        vlog!(args, {"Source: {}", source_path.display()});
        vlog!(args, {"Vault root: {}", vault_root.display()});
        vlog!(args, {"Code fence language: {}", settings.code_fence_language});
        vlog!(args, {"Follow embeds: {}", settings.target_embeds});
        vlog!(args, {"Found {} note(s)", notes.len()});

        let agg = match &mode {
            Mode::Show => {
                let agg = aggregate_results(process_all(&notes, |note| {
                    show(note, &args, &settings, &vault_root)
                }));
                for line in &agg.listing {
                    println!("{}", line);
                }
                agg
            }
            Mode::Set(value) => {
                let mut agg = aggregate_results(process_all(&notes, |note| {
                    apply(note, &args, value, &settings, &vault_root)
                }));
                let referenced = apply_referenced(&agg.referenced, &args, value);
                agg.absorb(referenced);
                agg
            }
        };

        print_summary(&agg, &args, &mode);

        Ok(())
    }
}

/// Hint replacement CLI for when the cli module is used without building the cli feature.
#[cfg(not(feature = "cli"))]
pub mod inner {
    /// Provide a hint to the user that they did not build this crate with the cli feature.
    pub fn main() {
        eprintln!("Please build with the cli feature to run the CLI");
        eprintln!("Example: cargo install basefilter --features cli");
        std::process::exit(1);
    }
}

pub use inner::main;
