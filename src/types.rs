//! Shared data model: findings, analysis results, personal-info snapshots.

use thiserror::Error;

/// Polarity of one classified observation about a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    Good,
    Bad,
    Warn,
}

/// One classified observation, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    pub text: String,
}

impl Finding {
    pub fn new(kind: FindingKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Wraps a local heuristic line. Local findings never carry
    /// `Good`/`Bad` coloring, only `Warn`.
    pub fn warn(text: impl Into<String>) -> Self {
        Self::new(FindingKind::Warn, text)
    }
}

/// User-supplied personal details, taken as an immutable snapshot per
/// request. Absent fields stay absent; empty placeholders are never
/// invented on the caller's behalf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub dob: Option<String>,
}

impl PersonalInfo {
    /// Returns the field trimmed, or `""` when absent or whitespace-only.
    pub(crate) fn trimmed(field: &Option<String>) -> &str {
        field.as_deref().map(str::trim).unwrap_or("")
    }

    /// Resolves the email used throughout one analyze cycle: the explicit
    /// parameter when non-empty, else the snapshot's email. Both the local
    /// heuristics and the remote payload see the same value.
    pub fn resolved_email<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        let explicit = explicit.map(str::trim).unwrap_or("");
        if explicit.is_empty() {
            Self::trimmed(&self.email)
        } else {
            explicit
        }
    }
}

/// Output of the local heuristic analyzer: issues first, companion
/// notes after, both in rule-firing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalReport {
    pub issues: Vec<String>,
    pub notes: Vec<String>,
}

impl LocalReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.notes.is_empty()
    }
}

/// Which character classes the remote scorer saw in the password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterClasses {
    pub upper: bool,
    pub lower: bool,
    pub digit: bool,
    pub symbol: bool,
}

/// Strength measurements reported by the remote scorer. `length` falls
/// back to the local password length when the remote omits it; the other
/// fields stay absent rather than defaulting to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthMetrics {
    pub length: usize,
    pub entropy_bits: Option<f64>,
    pub classes: Option<CharacterClasses>,
}

/// A concrete replacement password proposed by the remote scorer,
/// together with the edits it applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub password: String,
    pub changes: Vec<String>,
}

/// One complete analysis cycle's output. Replaced wholesale on every
/// analyze call, never patched in place.
///
/// `score` (100 = best) and `similarity` (100 = worst, matches a known
/// common-password dataset) are both in `0..=100` when present; they are
/// absent whenever the remote call failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    pub findings: Vec<Finding>,
    pub score: Option<u8>,
    pub similarity: Option<u8>,
    pub metrics: Option<StrengthMetrics>,
    pub advice: Vec<String>,
    pub suggestion: Option<Suggestion>,
}

/// Caller-input errors, rejected before any network traffic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("time limit {0}s is outside the allowed range 5..=300")]
    TimeLimitOutOfRange(u32),
    #[error("generated length {0} is outside the allowed range 8..=64")]
    GeneratedLengthOutOfRange(u32),
}
