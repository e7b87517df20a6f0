//! Sequence rules - detects sequential digit runs and keyboard walks.

/// Banned 4-digit ascending runs. 4567 is deliberately absent from this
/// list; the gap is inherited from the production rule set and pinned by
/// a test rather than silently closed.
const DIGIT_RUNS: &[&str] = &["0123", "1234", "2345", "3456", "5678", "6789"];

/// Banned keyboard and alphabetic walks, matched case-insensitively.
const KEYBOARD_RUNS: &[&str] = &["abcd", "bcde", "cdef", "qwerty", "asdf"];

/// Checks for any of the fixed ascending digit runs.
pub fn sequential_digits_rule(pwd: &str) -> Option<String> {
    if DIGIT_RUNS.iter().any(|run| pwd.contains(run)) {
        return Some("Sequential digits".to_string());
    }
    None
}

/// Checks for keyboard or alphabetic walks, ignoring case.
pub fn keyboard_run_rule(pwd: &str) -> Option<String> {
    let lower = pwd.to_lowercase();
    if KEYBOARD_RUNS.iter().any(|run| lower.contains(run)) {
        return Some("Keyboard/alpha sequence".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_digits_rule_fires() {
        assert!(sequential_digits_rule("x1234x").is_some());
        assert!(sequential_digits_rule("0123").is_some());
        assert!(sequential_digits_rule("pw6789!").is_some());
    }

    #[test]
    fn test_sequential_digits_rule_clean() {
        assert!(sequential_digits_rule("1357924680").is_none());
        assert!(sequential_digits_rule("").is_none());
    }

    #[test]
    fn test_sequential_digits_rule_4567_gap_is_preserved() {
        // 4567 sits between two banned runs but is not itself banned
        assert!(sequential_digits_rule("x4567x").is_none());
        assert!(sequential_digits_rule("x3456x").is_some());
        assert!(sequential_digits_rule("x5678x").is_some());
    }

    #[test]
    fn test_keyboard_run_rule_fires_case_insensitive() {
        assert!(keyboard_run_rule("xxqwertyxx").is_some());
        assert!(keyboard_run_rule("QwErTy123").is_some());
        assert!(keyboard_run_rule("myASDFpw").is_some());
        assert!(keyboard_run_rule("zABCDz").is_some());
    }

    #[test]
    fn test_keyboard_run_rule_clean() {
        assert!(keyboard_run_rule("Tr0ub4dor&3").is_none());
        assert!(keyboard_run_rule("").is_none());
    }
}
