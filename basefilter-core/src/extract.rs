use regex::Regex;
use std::sync::LazyLock;

static NAME_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"file\.name\.contains\(["']([^"']*)["']\)"#).expect("name filter pattern is valid")
});

/// Returns the value of the first `file.name.contains("...")` clause in `content`.
///
/// Single and double quotes are both accepted. Returns an empty string when the
/// content carries no name filter.
pub fn extract_filter_value(content: &str) -> String {
    NAME_FILTER
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().to_string())
        .unwrap_or_default()
}
