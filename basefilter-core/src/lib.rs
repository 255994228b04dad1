//! basefilter-core: splicing the name filter of base query blocks
//!
//! The [`splice`] function is the whole of the clause-maintenance logic; the other
//! modules carry the settings file and debug output shared by the other crates.

pub mod config;
pub mod debug;
pub mod path_utils;

mod extract;
pub use extract::extract_filter_value;

mod splice;
pub use splice::{splice, AND_HEADER, FILTERS_HEADER, NAME_FILTER_MARKER, VIEWS_HEADER};

pub use config::{ConfigError, Settings};
