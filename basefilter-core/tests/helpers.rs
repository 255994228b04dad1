// basefilter-core/tests/helpers.rs
#![cfg(test)]
#![allow(dead_code)]

use basefilter_core::{extract_filter_value, splice};

#[ctor::ctor]
fn init_debug() {
    basefilter_core::debug::set_debug(true);
}

/// Applies each value in turn, as successive edits of a search box would.
pub fn type_values(content: &str, values: &[&str]) -> String {
    values
        .iter()
        .fold(content.to_string(), |current, value| splice(&current, value))
}

/// Checks the properties every spliced result must hold.
pub fn assert_well_formed(content: &str, value: &str) {
    let spliced = splice(content, value);

    assert_eq!(splice(&spliced, value), spliced, "not a fixed point for {value:?}");
    let expected = value.replace("\r\n", " ").replace(['\r', '\n'], " ");
    assert_eq!(extract_filter_value(&spliced), expected);
    assert!(!splice(&spliced, "").contains("file.name.contains"));
    assert!(spliced.matches("file.name.contains").count() <= 1);

    if let (Some(clause), Some(views)) = (spliced.find("file.name.contains"), spliced.find("views:")) {
        assert!(clause < views, "clause landed after views:\n{spliced}");
    }
}
