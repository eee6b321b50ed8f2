//! Shared utility helpers.

use convert_case::{Case, Casing};

/// Case-insensitive substring search without allocating an uppercase copy.
#[inline]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle_bytes = needle.as_bytes();
    let haystack_bytes = haystack.as_bytes();
    if needle_bytes.len() > haystack_bytes.len() {
        return false;
    }
    haystack_bytes
        .windows(needle_bytes.len())
        .any(|window| window.eq_ignore_ascii_case(needle_bytes))
}

/// Convert a raw snake/kebab-case name into an UpperCamel identifier.
///
/// `t_test` becomes `TTest`, `task_status` becomes `TaskStatus`. Digits and
/// non-ASCII text pass through unchanged.
pub fn to_pascal_case(name: &str) -> String {
    name.to_case(Case::UpperCamel)
}

/// Build a collision-safe package identifier for a table.
///
/// Go package names must be lower case without separators, and two tables
/// may share a name, so the table id is appended. The sign of a negative id
/// is dropped.
pub fn package_ident(table_name: &str, table_id: i64) -> String {
    let stripped: String = table_name
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect();
    format!("{}{}", stripped.to_lowercase(), table_id.unsigned_abs())
}
