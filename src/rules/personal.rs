//! Email-token rule - detects the email local part inside the password.

const MIN_TOKEN_LEN: usize = 3;

/// Checks whether the password contains the email's local part (the
/// substring before `@`, lower-cased). A plain substring test, no
/// tokenization. Local parts shorter than 3 characters never fire.
///
/// # Returns
/// - `Some((issue, note))` on a match
/// - `None` otherwise
pub fn email_token_rule(pwd: &str, email: &str) -> Option<(String, String)> {
    let user = email.split('@').next().unwrap_or("").to_lowercase();
    if user.len() >= MIN_TOKEN_LEN && pwd.to_lowercase().contains(&user) {
        return Some((
            "Contains email username".to_string(),
            "Avoid using parts of personal info".to_string(),
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_token_rule_fires_on_local_part() {
        let hit = email_token_rule("john.doexyz123!A", "john.doe@example.com");
        assert!(hit.is_some());
        let (issue, note) = hit.unwrap();
        assert_eq!(issue, "Contains email username");
        assert_eq!(note, "Avoid using parts of personal info");
    }

    #[test]
    fn test_email_token_rule_case_insensitive() {
        assert!(email_token_rule("xxJOHN.DOExx", "John.Doe@example.com").is_some());
    }

    #[test]
    fn test_email_token_rule_short_local_part_never_fires() {
        // "a" is in almost every password, but a sub-3-char local part is noise
        assert!(email_token_rule("aaaaaaaa", "a@example.com").is_none());
        assert!(email_token_rule("ababab", "ab@example.com").is_none());
    }

    #[test]
    fn test_email_token_rule_no_match() {
        assert!(email_token_rule("Tr0ub4dor&3", "john.doe@example.com").is_none());
    }

    #[test]
    fn test_email_token_rule_missing_at_sign_uses_whole_string() {
        assert!(email_token_rule("xjohnx", "john").is_some());
    }
}
