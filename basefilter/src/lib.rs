#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # basefilter
//!
//! Keeps the name filter of base query blocks in sync with a search value.
//!
//! A base block is a small YAML-like query, either fenced inside a Markdown note
//! or stored in a `.base` file embedded into the note. Its `filters: and:` list
//! may carry one `file.name.contains("...")` clause; [`splice`] sets, replaces or
//! removes that clause without touching anything else in the block.
//!
//! ```
//! use basefilter::splice;
//!
//! let block = "filters:\n  and:\n    - file.inFolder(\"People\")\n";
//! let filtered = splice(block, "Adam");
//! assert!(filtered.ends_with("    - file.name.contains(\"Adam\")\n"));
//! assert_eq!(splice(&filtered, ""), block);
//! ```
//!
//! The [`sync`] module finds blocks in notes and writes spliced blocks back.

pub use basefilter_core::{
    extract_filter_value, splice, ConfigError, Settings, AND_HEADER, FILTERS_HEADER,
    NAME_FILTER_MARKER, VIEWS_HEADER,
};

/// Settings file loading and lookup.
pub mod config {
    pub use basefilter_core::config::{load_settings, load_settings_from, parse_settings};
    pub use basefilter_core::path_utils::{find_config_file, find_vault_root};
}

/// Block discovery, write-back and per-block filter state.
pub mod sync {
    pub use basefilter_sync::*;
}
