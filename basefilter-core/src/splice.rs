//! Idempotent splicing of the name-filter clause into a base query block.
//!
//! The block is treated as a plain sequence of lines. Structure is recognised by
//! trimmed-line matching only (`filters:`, `and:`, `views:`, `- ` list items), so
//! partial and hand-edited blocks pass through without being rejected.

use crate::basefilter_debug;

/// Header line of the filter group.
pub const FILTERS_HEADER: &str = "filters:";
/// Header line of the conjunction list inside the filter group.
pub const AND_HEADER: &str = "and:";
/// Header line of the display section.
pub const VIEWS_HEADER: &str = "views:";
/// Text identifying a name-filter clause line.
pub const NAME_FILTER_MARKER: &str = "file.name.contains";

const DEFAULT_INDENT: &str = "    ";
const NESTED_INDENT: &str = "  ";

/// Sets the name filter of a base block to `filter_value`.
///
/// Every existing `file.name.contains(...)` line is dropped first, then a single
/// clause is appended to the end of the `and:` list. An empty `filter_value`
/// removes the clause, and with it the whole `filters:` group when no other
/// clause is left under `and:`.
///
/// Line breaks in `filter_value` (`\r\n`, `\r` or `\n`) are each replaced by a
/// single space, so the clause always stays on one line.
///
/// The function is total and idempotent: `splice(&splice(c, v), v) == splice(c, v)`.
///
/// # Examples
///
/// ```
/// use basefilter_core::splice;
///
/// let block = "views:\n  - type: table\n";
/// let filtered = splice(block, "Adam");
/// assert_eq!(
///     filtered,
///     "filters:\n  and:\n    - file.name.contains(\"Adam\")\nviews:\n  - type: table\n"
/// );
/// assert_eq!(splice(&filtered, ""), block);
/// ```
pub fn splice(content: &str, filter_value: &str) -> String {
    let (mut lines, removed_indent) = strip_name_filters(content);

    if filter_value.is_empty() {
        remove_empty_group(&mut lines);
    } else {
        let eol = if content.contains("\r\n") { "\r" } else { "" };
        let indent = clause_indent(&lines).or(removed_indent).unwrap_or(DEFAULT_INDENT);
        let value = single_line(filter_value);
        let clause = format!("{indent}- {NAME_FILTER_MARKER}(\"{value}\"){eol}");
        insert_clause(&mut lines, clause, eol);
    }

    lines.join("\n")
}

/// Splits `content` into lines without the name-filter clauses.
///
/// Also returns the indentation of the first dropped clause, if any.
fn strip_name_filters(content: &str) -> (Vec<String>, Option<&str>) {
    let mut removed_indent = None;
    let mut lines = Vec::new();
    let mut removed_last = false;

    for line in content.split('\n') {
        removed_last = line.contains(NAME_FILTER_MARKER);
        if removed_last {
            if removed_indent.is_none() {
                removed_indent = Some(leading_whitespace(line));
            }
        } else {
            lines.push(line.to_string());
        }
    }

    // The line before a dropped final clause becomes the final line
    if removed_last {
        if let Some(last) = lines.last_mut() {
            if last.ends_with('\r') {
                last.pop();
            }
        }
    }

    (lines, removed_indent)
}

fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

fn remove_empty_group(lines: &mut Vec<String>) {
    let Some(and_index) = find_header(lines, AND_HEADER) else {
        return;
    };

    let list = scan_list(lines, and_index);
    if list.last_item.is_some() {
        basefilter_debug!("other filters remain under `and:`, keeping the group");
        return;
    }

    match find_header(lines, FILTERS_HEADER) {
        Some(filters_index) if filters_index <= and_index => {
            basefilter_debug!(
                "removing empty filter group (lines {}..{})",
                filters_index,
                list.end
            );
            lines.drain(filters_index..list.end);
        }
        _ => {}
    }
}

fn insert_clause(lines: &mut Vec<String>, mut clause: String, eol: &str) {
    let and_index = match find_header(lines, AND_HEADER) {
        Some(index) => index,
        None => synthesize_group(lines, eol),
    };

    let list = scan_list(lines, and_index);
    let at = list.last_item.unwrap_or(and_index) + 1;

    // Appending after an unterminated final line: that line takes the line ending
    if at == lines.len() && !eol.is_empty() {
        if let Some(previous) = lines.last_mut() {
            if !previous.ends_with('\r') {
                previous.push('\r');
            }
        }
        clause.pop();
    }
    lines.insert(at, clause);
}

/// Inserts whatever part of the `filters:` / `and:` pair is missing.
///
/// Returns the index of the `and:` header.
fn synthesize_group(lines: &mut Vec<String>, eol: &str) -> usize {
    if let Some(filters_index) = find_header(lines, FILTERS_HEADER) {
        let filters_indent = leading_whitespace(&lines[filters_index]);
        let and_line = format!("{filters_indent}{NESTED_INDENT}{AND_HEADER}{eol}");
        lines.insert(filters_index + 1, and_line);
        return filters_index + 1;
    }

    let at = find_header(lines, VIEWS_HEADER)
        .or_else(|| lines.iter().position(|line| !is_blank(line)))
        .unwrap_or(0);
    lines.insert(at, format!("{FILTERS_HEADER}{eol}"));
    lines.insert(at + 1, format!("{NESTED_INDENT}{AND_HEADER}{eol}"));
    at + 1
}

/// Extent of the list that follows an `and:` header.
struct ListScan {
    /// Index of the last list item under the header.
    last_item: Option<usize>,
    /// One past the last blank or list-item line that follows the header.
    end: usize,
}

/// Walks the blank and list-item lines directly after `header_index`.
fn scan_list(lines: &[String], header_index: usize) -> ListScan {
    let mut scan = ListScan {
        last_item: None,
        end: header_index + 1,
    };

    for (index, line) in lines.iter().enumerate().skip(header_index + 1) {
        if is_list_item(line) {
            scan.last_item = Some(index);
        } else if !is_blank(line) {
            break;
        }
        scan.end = index + 1;
    }

    scan
}

/// Indentation of the first remaining `- file.` clause.
fn clause_indent(lines: &[String]) -> Option<&str> {
    lines
        .iter()
        .find(|line| line.trim_start().starts_with("- file."))
        .map(|line| leading_whitespace(line))
}

fn find_header(lines: &[String], header: &str) -> Option<usize> {
    lines.iter().position(|line| line.trim() == header)
}

fn is_list_item(line: &str) -> bool {
    line.trim_start().starts_with("- ")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}
