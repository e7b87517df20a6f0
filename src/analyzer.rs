//! Heuristic analyzer - local, offline password-weakness orchestration.

use secrecy::{ExposeSecret, SecretString};

use crate::rules::{
    email_token_rule, keyboard_run_rule, length_rule, repeated_char_rule, sequential_digits_rule,
    variety_rule,
};
use crate::types::LocalReport;

/// Runs every heuristic rule against the password and collects the hits.
///
/// Pure and deterministic: no I/O, no panics, any input accepted
/// including the empty string. Rules are evaluated independently and in
/// a fixed order so the report is stable across calls.
///
/// # Arguments
/// * `password` - The password to check
/// * `email` - Optional email whose local part is matched against the password
pub fn analyze_locally(password: &SecretString, email: Option<&str>) -> LocalReport {
    let pwd = password.expose_secret();
    let mut report = LocalReport::default();

    if let Some(issue) = length_rule(pwd) {
        report.issues.push(issue);
    }
    report.issues.extend(variety_rule(pwd));
    if let Some(email) = email {
        if let Some((issue, note)) = email_token_rule(pwd, email) {
            report.issues.push(issue);
            report.notes.push(note);
        }
    }
    if let Some(issue) = sequential_digits_rule(pwd) {
        report.issues.push(issue);
    }
    if let Some(issue) = keyboard_run_rule(pwd) {
        report.issues.push(issue);
    }
    if let Some(issue) = repeated_char_rule(pwd) {
        report.issues.push(issue);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        issues = report.issues.len(),
        notes = report.notes.len(),
        "local analysis complete"
    );

    report
}
