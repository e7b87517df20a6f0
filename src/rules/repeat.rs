//! Repeat rule - detects a character repeated three or more times in a row.

/// Checks for any single character repeated 3+ times consecutively.
pub fn repeated_char_rule(pwd: &str) -> Option<String> {
    let mut run = 1;
    let mut prev: Option<char> = None;
    for c in pwd.chars() {
        if prev == Some(c) {
            run += 1;
            if run >= 3 {
                return Some("Repeated characters".to_string());
            }
        } else {
            run = 1;
        }
        prev = Some(c);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_char_rule_triple() {
        assert!(repeated_char_rule("paaass").is_some());
        assert!(repeated_char_rule("!!!").is_some());
    }

    #[test]
    fn test_repeated_char_rule_double_is_fine() {
        assert!(repeated_char_rule("aabbcc").is_none());
    }

    #[test]
    fn test_repeated_char_rule_non_adjacent_repeats_are_fine() {
        assert!(repeated_char_rule("abababab").is_none());
    }

    #[test]
    fn test_repeated_char_rule_empty() {
        assert!(repeated_char_rule("").is_none());
    }
}
