//! Result merger - combines local heuristics with the remote analysis.

use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;

use crate::analyzer::analyze_locally;
use crate::client::{AnalyzeRequest, AnalyzeResponse, ApiClient, ApiError};
use crate::types::{
    AnalysisResult, CharacterClasses, Finding, FindingKind, PersonalInfo, StrengthMetrics,
    Suggestion,
};

const WEAKNESS_PREFIX: &str = "Weakness:";
const STRENGTH_PREFIX: &str = "Strength:";

/// One analyze cycle's outcome. When the remote call failed, `result`
/// still carries the local findings and the failure sits in
/// `remote_error`; the merger itself never errors out.
#[derive(Debug)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub remote_error: Option<ApiError>,
}

impl Analysis {
    pub fn is_degraded(&self) -> bool {
        self.remote_error.is_some()
    }
}

/// Classifies one remote feedback line by its textual prefix.
pub fn classify_feedback_line(line: &str) -> Finding {
    if let Some(rest) = line.strip_prefix(WEAKNESS_PREFIX) {
        Finding::new(FindingKind::Bad, rest.trim_start())
    } else if let Some(rest) = line.strip_prefix(STRENGTH_PREFIX) {
        Finding::new(FindingKind::Good, rest.trim_start())
    } else {
        Finding::new(FindingKind::Warn, line)
    }
}

/// Rounds a remote score into `0..=100`. The remote sends floats; the
/// invariant on our side is an integer percentage.
fn into_percentage(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

/// Runs analyze cycles with last-submitted-wins semantics: starting a
/// new cycle cancels any in-flight one, whose call then resolves to
/// `None` instead of a stale `Analysis`.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    in_flight: std::sync::Arc<std::sync::Mutex<Option<CancellationToken>>>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces one [`Analysis`] for the given password, optional email
    /// and personal-info snapshot.
    ///
    /// Local heuristics run first and survive any remote failure; remote
    /// findings, when present, come first in the merged list, in arrival
    /// order. Returns `None` only when a newer `analyze` call superseded
    /// this one while the remote round-trip was pending.
    pub async fn analyze(
        &self,
        client: &ApiClient,
        password: &SecretString,
        email: Option<&str>,
        info: &PersonalInfo,
    ) -> Option<Analysis> {
        let token = CancellationToken::new();
        {
            let mut slot = self.in_flight.lock().expect("analyzer slot poisoned");
            // a completed call leaves its token behind; cancelling it is a no-op
            if let Some(stale) = slot.replace(token.clone()) {
                stale.cancel();
            }
        }

        // one email for the whole cycle: the local heuristics must see
        // exactly what the remote payload carries
        let resolved = info.resolved_email(email);
        let local = analyze_locally(password, (!resolved.is_empty()).then_some(resolved));
        let request = AnalyzeRequest::build(password.expose_secret(), email, info);

        let outcome = tokio::select! {
            _ = token.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::debug!("analyze superseded by a newer call");
                return None;
            }
            outcome = client.analyze_password(&request) => outcome,
        };

        let local_findings = local
            .issues
            .into_iter()
            .chain(local.notes)
            .map(Finding::warn);

        let analysis = match outcome {
            Ok(response) => {
                let mut result = merge_remote(response, password.expose_secret().chars().count());
                result.findings.extend(local_findings);
                Analysis {
                    result,
                    remote_error: None,
                }
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("remote analysis failed, degrading to local findings: {}", err);
                Analysis {
                    result: AnalysisResult {
                        findings: local_findings.collect(),
                        ..AnalysisResult::default()
                    },
                    remote_error: Some(err),
                }
            }
        };
        Some(analysis)
    }
}

/// Lifts the remote response into an [`AnalysisResult`], before the
/// local findings are appended.
fn merge_remote(response: AnalyzeResponse, password_len: usize) -> AnalysisResult {
    let findings = response
        .feedback
        .unwrap_or_default()
        .iter()
        .map(|line| classify_feedback_line(line))
        .collect();
    let metrics = {
        let strength = response.strength.unwrap_or_default();
        StrengthMetrics {
            length: strength.length.unwrap_or(password_len),
            entropy_bits: strength.entropy_bits,
            classes: strength.classes.map(|c| CharacterClasses {
                upper: c.upper,
                lower: c.lower,
                digit: c.digit,
                symbol: c.symbol,
            }),
        }
    };
    AnalysisResult {
        findings,
        score: response.final_score.map(into_percentage),
        similarity: response.similarity_percentage.map(into_percentage),
        metrics: Some(metrics),
        advice: response.advice.unwrap_or_default(),
        suggestion: response.suggestion.and_then(|s| {
            s.password.map(|password| Suggestion {
                password,
                changes: s.changes.unwrap_or_default(),
            })
        }),
    }
}
