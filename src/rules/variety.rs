//! Character variety rule - checks for lowercase, uppercase, digits, symbols.

/// The symbol alphabet recognized by the analyzer. Anything outside this
/// set (whitespace, accented letters, emoji) does not count as a symbol.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};'\"\\|,.<>/?`~";

/// Checks which character classes are missing from the password.
///
/// Emits one issue per missing class, in display order: lowercase,
/// uppercase, digit, symbol.
pub fn variety_rule(pwd: &str) -> Vec<String> {
    let has_lower = pwd.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = pwd.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = pwd.chars().any(|c| c.is_ascii_digit());
    let has_symbol = pwd.chars().any(|c| SYMBOLS.contains(c));

    let mut issues = Vec::new();
    if !has_lower {
        issues.push("No lowercase".to_string());
    }
    if !has_upper {
        issues.push("No uppercase".to_string());
    }
    if !has_digit {
        issues.push("No number".to_string());
    }
    if !has_symbol {
        issues.push("No symbol".to_string());
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variety_rule_all_classes_present() {
        assert!(variety_rule("Abc1!").is_empty());
    }

    #[test]
    fn test_variety_rule_missing_lowercase() {
        let issues = variety_rule("ABC123!");
        assert_eq!(issues, vec!["No lowercase".to_string()]);
    }

    #[test]
    fn test_variety_rule_missing_uppercase() {
        let issues = variety_rule("abc123!");
        assert_eq!(issues, vec!["No uppercase".to_string()]);
    }

    #[test]
    fn test_variety_rule_missing_digit_and_symbol() {
        let issues = variety_rule("Abcdef");
        assert_eq!(
            issues,
            vec!["No number".to_string(), "No symbol".to_string()]
        );
    }

    #[test]
    fn test_variety_rule_empty_password_misses_everything() {
        assert_eq!(variety_rule("").len(), 4);
    }

    #[test]
    fn test_variety_rule_space_is_not_a_symbol() {
        let issues = variety_rule("Abc 123");
        assert_eq!(issues, vec!["No symbol".to_string()]);
    }

    #[test]
    fn test_variety_rule_backtick_and_tilde_count_as_symbols() {
        assert!(variety_rule("Abc1`").is_empty());
        assert!(variety_rule("Abc1~").is_empty());
    }
}
