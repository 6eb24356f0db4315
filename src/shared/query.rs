//! Helpers for turning optional query-string filters into SQL bind values.

/// Trimmed value of an optional filter, `None` when absent or blank
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// ILIKE pattern matching `value` anywhere, with LIKE wildcards escaped
pub fn contains_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Optional blank-aware filter converted straight into an ILIKE pattern
pub fn contains_filter(value: &Option<String>) -> Option<String> {
    non_blank(value).map(|v| contains_pattern(&v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&None), None);
        assert_eq!(non_blank(&Some("   ".to_string())), None);
        assert_eq!(non_blank(&Some(" AD ".to_string())), Some("AD".to_string()));
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("MRI"), "%MRI%");
        assert_eq!(contains_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }

    #[test]
    fn test_contains_filter() {
        assert_eq!(contains_filter(&Some("pet".to_string())), Some("%pet%".to_string()));
        assert_eq!(contains_filter(&Some(String::new())), None);
    }
}
