//! Password analysis and crack-simulation client library
//!
//! This library combines fast local heuristics with a richer remote
//! scoring service and manages a live, cancellable crack-simulation
//! stream.
//!
//! # Features
//!
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PASSCHECK_API_BASE`: Base URL of the remote scoring service
//!   (default: `http://127.0.0.1:5000`); trailing slashes are stripped
//!
//! # Example
//!
//! ```rust,no_run
//! use passcheck_core::{analyze_locally, Analyzer, ApiClient, ApiConfig, PersonalInfo};
//! use secrecy::SecretString;
//!
//! # async fn run() {
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! // Offline heuristics: instant, no network
//! let report = analyze_locally(&password, Some("name@example.com"));
//! println!("Local issues: {:?}", report.issues);
//!
//! // Full analysis against the remote scorer
//! let client = ApiClient::new(ApiConfig::from_env());
//! let analyzer = Analyzer::new();
//! if let Some(analysis) = analyzer
//!     .analyze(&client, &password, None, &PersonalInfo::default())
//!     .await
//! {
//!     println!("Score: {:?}", analysis.result.score);
//! }
//! # }
//! ```

// Internal modules
mod analyzer;
mod classify;
mod client;
mod merge;
mod rules;
mod session;
mod types;

// Public API
pub use analyzer::analyze_locally;
pub use classify::{score_band, similarity_band, Band, BandError};
pub use client::{
    AnalyzeRequest, AnalyzeResponse, ApiClient, ApiConfig, ApiError, ClassesPayload,
    StrengthPayload, SuggestionPayload, API_BASE_ENV,
};
pub use merge::{classify_feedback_line, Analysis, Analyzer};
pub use session::{
    CrackRequest, SessionError, SessionManager, SessionState, StreamEvent,
    MAX_TIME_LIMIT_SECS, MIN_TIME_LIMIT_SECS,
};
pub use types::{
    AnalysisResult, CharacterClasses, Finding, FindingKind, LocalReport, PersonalInfo,
    StrengthMetrics, Suggestion, ValidationError,
};
