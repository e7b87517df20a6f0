//! Length rule - checks password minimum length.

const MIN_LENGTH: usize = 12;

/// Checks if the password meets minimum length requirements.
///
/// # Returns
/// - `Some(issue)` if the password is shorter than 12 characters
/// - `None` otherwise
pub fn length_rule(pwd: &str) -> Option<String> {
    if pwd.chars().count() < MIN_LENGTH {
        return Some(format!("Length < {}", MIN_LENGTH));
    }
    None
}
