const ELLIPSIS: &str = "...";

/// Collapses every run of whitespace to a single space and trims both ends.
pub fn to_normalized_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `text` to `max_length` characters and appends `"..."` when it is longer.
///
/// Trailing whitespace left by the cut is removed before the ellipsis, so the
/// result is at most `max_length + 3` characters. Shorter text is returned as is.
pub fn to_truncated_text(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", text[..cut].trim_end()),
    }
}

#[cfg(test)]
mod tests {
    use super::{to_normalized_text, to_truncated_text};

    #[test]
    fn normalizes_mixed_whitespace() {
        assert_eq!(to_normalized_text("Hello   World\n  "), "Hello World");
        assert_eq!(to_normalized_text("\t\tHi  there"), "Hi there");
        assert_eq!(to_normalized_text("   "), "");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(to_truncated_text("Hello World", 8), "Hello Wo...");
        assert_eq!(to_truncated_text("Hello World", 6), "Hello...");
        assert_eq!(to_truncated_text("héllo wörld", 4), "héll...");
    }

    #[test]
    fn exact_length_is_not_truncated() {
        assert_eq!(to_truncated_text("Hi", 5), "Hi");
        assert_eq!(to_truncated_text("Hello", 5), "Hello");
    }

    #[test]
    fn zero_limit_keeps_only_ellipsis() {
        assert_eq!(to_truncated_text("abc", 0), "...");
        assert_eq!(to_truncated_text("", 0), "");
    }
}
