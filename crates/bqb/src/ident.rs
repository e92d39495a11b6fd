//! Identifier allow-lists and placeholder scanning.
//!
//! Table and column names cannot be bound as parameters, so the only guard
//! for them is a character allow-list:
//!
//! - tables: `[A-Za-z0-9-_.]+` (dataset-qualified names such as `proj.ds.tbl`)
//! - columns: `[A-Za-z0-9_]+`
//!
//! Placeholders are `@name` tokens where `name` matches `[A-Za-z0-9_]+`.

use regex::Regex;
use std::sync::OnceLock;

fn table_name_re() -> &'static Regex {
    static TABLE_RE: OnceLock<Regex> = OnceLock::new();
    TABLE_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9\-_.]+$").expect("invalid built-in table name regex")
    })
}

fn column_name_re() -> &'static Regex {
    static COLUMN_RE: OnceLock<Regex> = OnceLock::new();
    COLUMN_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_]+$").expect("invalid built-in column name regex")
    })
}

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"@([A-Za-z0-9_]+)").expect("invalid built-in placeholder regex")
    })
}

/// Returns `true` if `name` is an acceptable table name.
pub fn is_table_name(name: &str) -> bool {
    table_name_re().is_match(name)
}

/// Returns `true` if `name` is an acceptable bare column name.
///
/// Select/group/order entries are free-form expressions and are not checked
/// against this when rendering.
pub fn is_column_name(name: &str) -> bool {
    column_name_re().is_match(name)
}

/// Return `name` unchanged if it is an acceptable table name.
pub fn sanitize_table_name(name: &str) -> Option<&str> {
    is_table_name(name).then_some(name)
}

/// Return `name` unchanged if it is an acceptable bare column name.
pub fn sanitize_column_name(name: &str) -> Option<&str> {
    is_column_name(name).then_some(name)
}

/// Extract every `@name` placeholder in `sql`, in order of appearance.
///
/// Repeated placeholders are returned once per occurrence.
pub fn extract_param_names(sql: &str) -> Vec<&str> {
    placeholder_re()
        .captures_iter(sql)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_name_accepts_simple() {
        assert_eq!(sanitize_column_name("my_column"), Some("my_column"));
        assert!(is_column_name("col1"));
    }

    #[test]
    fn column_name_rejects_injection() {
        assert_eq!(sanitize_column_name("; DROP TABLE my_table"), None);
        assert!(!is_column_name("a.b"));
        assert!(!is_column_name(""));
    }

    #[test]
    fn table_name_accepts_simple_and_qualified() {
        assert_eq!(sanitize_table_name("my_table"), Some("my_table"));
        assert!(is_table_name("my-project.analytics.events_2024"));
    }

    #[test]
    fn table_name_rejects_injection() {
        assert_eq!(sanitize_table_name("; DROP TABLE my_table"), None);
        assert!(!is_table_name("my table"));
        assert!(!is_table_name("`quoted`"));
        assert!(!is_table_name(""));
    }

    #[test]
    fn extracts_placeholders_in_order() {
        let names = extract_param_names("WHERE a = @a AND b IN UNNEST(@b_list) AND c = @a");
        assert_eq!(names, vec!["a", "b_list", "a"]);
    }

    #[test]
    fn extract_ignores_bare_marker() {
        assert!(extract_param_names("SELECT '@' AS at, x").is_empty());
        assert_eq!(extract_param_names("email = 'x@y'"), vec!["y"]);
    }
}
