// src/util/text.rs

/// Truncate `text` to at most `max_chars` characters, appending an
/// ellipsis when something was cut. A zero limit yields an empty string.
///
/// Operates on characters, not bytes, so multi-byte titles never get
/// split mid-codepoint.
///
/// # Examples
///
/// ```
/// use notemark::util::text::truncate;
///
/// assert_eq!(truncate("Shopping list", 20), "Shopping list");
/// assert_eq!(truncate("A very long note title", 10), "A very lo…");
/// ```
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(max_chars - 1).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_short_text_when_truncating_then_returns_text_unchanged() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
    }

    #[test]
    fn given_text_at_limit_when_truncating_then_returns_text_unchanged() {
        assert_eq!(truncate("Groceries", 9), "Groceries");
    }

    #[test]
    fn given_long_text_when_truncating_then_cuts_and_appends_ellipsis() {
        assert_eq!(truncate("A very long note title", 10), "A very lo…");
    }

    #[test]
    fn given_multibyte_text_when_truncating_then_counts_characters_not_bytes() {
        assert_eq!(truncate("Überlegungen zum Ausflug", 5), "Über…");
    }

    #[test]
    fn given_zero_limit_when_truncating_then_returns_empty_string() {
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn given_limit_of_one_when_truncating_then_ellipsis_fills_the_budget() {
        assert_eq!(truncate("anything", 1), "…");
    }

    #[test]
    fn given_empty_text_when_truncating_then_returns_empty_string() {
        assert_eq!(truncate("", 10), "");
    }
}
