/// Truncate a string to a maximum length
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect::<String>() + "..."
    }
}

/// Collapse whitespace runs (including newlines) into single spaces so a
/// payload can be shown on one console line.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("abcdefgh", 4), "abcd...");
    }

    #[test]
    fn test_single_line_collapses_newlines() {
        assert_eq!(single_line("a\n  b\tc"), "a b c");
    }
}
