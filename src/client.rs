//! Remote scoring-service client.
//!
//! Thin typed wrapper over the three PassCheck service endpoints:
//! `POST /analyze_password`, `GET /generate_password` and the
//! `GET /crack_password_stream/{password}` event feed.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::CrackRequest;
use crate::types::{PersonalInfo, ValidationError};

/// Environment variable holding the service base URL.
pub const API_BASE_ENV: &str = "PASSCHECK_API_BASE";

const DEFAULT_BASE: &str = "http://127.0.0.1:5000";

/// One-shot requests get a flat timeout. The crack stream is exempt:
/// its duration is bounded server-side by the requested time limit.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Service location, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Builds a config from an explicit base URL, stripping trailing slashes.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Reads the base URL from `PASSCHECK_API_BASE`.
    ///
    /// Falls back to the local development default when unset.
    pub fn from_env() -> Self {
        let raw = std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_BASE.to_string());
        Self::new(raw)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
    #[error("response is missing the `{0}` field")]
    MissingField(&'static str),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Body of `POST /analyze_password`. Every field ships as a (possibly
/// empty) trimmed string; the service distinguishes nothing finer.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    pub password: String,
    pub name: String,
    pub dob: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub address: String,
}

impl AnalyzeRequest {
    /// Assembles the payload from the password, the explicit email
    /// parameter and the personal-info snapshot. The explicit email wins
    /// when non-empty; everything is trimmed.
    pub fn build(password: &str, email: Option<&str>, info: &PersonalInfo) -> Self {
        let email = info.resolved_email(email);
        Self {
            password: password.to_string(),
            name: PersonalInfo::trimmed(&info.full_name).to_string(),
            dob: PersonalInfo::trimmed(&info.dob).to_string(),
            location: PersonalInfo::trimmed(&info.location).to_string(),
            phone: PersonalInfo::trimmed(&info.phone).to_string(),
            email: email.to_string(),
            company: PersonalInfo::trimmed(&info.company).to_string(),
            address: PersonalInfo::trimmed(&info.address).to_string(),
        }
    }
}

// The password only ever leaves the process over the wire, never
// through a log line.
impl std::fmt::Debug for AnalyzeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzeRequest")
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("dob", &self.dob)
            .field("location", &self.location)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("company", &self.company)
            .field("address", &self.address)
            .finish()
    }
}

/// Response of `POST /analyze_password`. Every field is optional: the
/// merger must tolerate any subset being absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub feedback: Option<Vec<String>>,
    #[serde(default)]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub strength: Option<StrengthPayload>,
    #[serde(default)]
    pub similarity_percentage: Option<f64>,
    #[serde(default)]
    pub advice: Option<Vec<String>>,
    #[serde(default)]
    pub suggestion: Option<SuggestionPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrengthPayload {
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default)]
    pub entropy_bits: Option<f64>,
    #[serde(default)]
    pub classes: Option<ClassesPayload>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ClassesPayload {
    #[serde(default)]
    pub upper: bool,
    #[serde(default)]
    pub lower: bool,
    #[serde(default)]
    pub digit: bool,
    #[serde(default)]
    pub symbol: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionPayload {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub changes: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GeneratePayload {
    #[serde(default)]
    password: Option<String>,
    // older service builds used this key
    #[serde(default)]
    generated_password: Option<String>,
}

/// Client for the remote scoring service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.config.base_url, path);
        Url::parse(&raw).map_err(|_| ApiError::BaseUrl(raw))
    }

    async fn fail(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::Http { status, body }
    }

    /// `POST /analyze_password`.
    pub async fn analyze_password(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<AnalyzeResponse, ApiError> {
        let url = self.endpoint("analyze_password")?;
        let response = self
            .http
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Ok(response.json().await?)
    }

    /// `GET /generate_password`. Length is validated to `8..=64` before
    /// any request goes out; `symbols`/`numbers` travel as `1`/`0`.
    pub async fn generate_password(
        &self,
        length: u32,
        symbols: bool,
        numbers: bool,
    ) -> Result<String, ApiError> {
        if !(8..=64).contains(&length) {
            return Err(ValidationError::GeneratedLengthOutOfRange(length).into());
        }
        let mut url = self.endpoint("generate_password")?;
        url.query_pairs_mut()
            .append_pair("length", &length.to_string())
            .append_pair("symbols", if symbols { "1" } else { "0" })
            .append_pair("numbers", if numbers { "1" } else { "0" });
        let response = self.http.get(url).timeout(REQUEST_TIMEOUT).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        let payload: GeneratePayload = response.json().await?;
        payload
            .password
            .or(payload.generated_password)
            .ok_or(ApiError::MissingField("password"))
    }

    /// Builds the `GET /crack_password_stream/{password}` URL.
    ///
    /// The password travels as a percent-encoded path segment. Personal
    /// info rides along as query parameters only when the request opts
    /// in, and then only the non-empty fields.
    pub fn crack_stream_url(&self, request: &CrackRequest) -> Result<Url, ApiError> {
        let mut url = self.endpoint("crack_password_stream")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::BaseUrl(self.config.base_url.clone()))?
            .push(request.password.expose_secret());
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("time_limit", &request.time_limit_secs.to_string());
            query.append_pair(
                "use_personal_info",
                if request.use_personal_info { "true" } else { "false" },
            );
            if request.use_personal_info {
                let info = &request.personal_info;
                for (key, field) in [
                    ("full_name", &info.full_name),
                    ("dob", &info.dob),
                    ("location", &info.location),
                    ("phone", &info.phone),
                    ("company", &info.company),
                    ("address", &info.address),
                    ("email", &info.email),
                ] {
                    let value = PersonalInfo::trimmed(field);
                    if !value.is_empty() {
                        query.append_pair(key, value);
                    }
                }
            }
        }
        Ok(url)
    }

    /// Opens the crack-simulation feed and hands back the raw response
    /// for line-by-line consumption. No timeout: the stream obeys the
    /// server-side time budget.
    pub(crate) async fn open_stream(&self, url: Url) -> Result<reqwest::Response, ApiError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serial_test::serial;

    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value); }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key); }
    }

    fn full_info() -> PersonalInfo {
        PersonalInfo {
            full_name: Some("John Doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            company: Some("Acme".to_string()),
            location: Some("Berlin".to_string()),
            address: Some("1 Main St".to_string()),
            dob: Some("1990-01-01".to_string()),
        }
    }

    fn crack_request(use_personal_info: bool) -> CrackRequest {
        CrackRequest {
            password: SecretString::new("P@ssw0rd!23".to_string().into()),
            time_limit_secs: 30,
            use_personal_info,
            personal_info: full_info(),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_strips_trailing_slashes() {
        set_env(API_BASE_ENV, "https://passcheck.example///");
        let config = ApiConfig::from_env();
        assert_eq!(config.base_url(), "https://passcheck.example");
        remove_env(API_BASE_ENV);
    }

    #[test]
    #[serial]
    fn test_config_from_env_default() {
        remove_env(API_BASE_ENV);
        let config = ApiConfig::from_env();
        assert_eq!(config.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn test_analyze_request_explicit_email_wins() {
        let request = AnalyzeRequest::build("pw", Some(" jane@x.org "), &full_info());
        assert_eq!(request.email, "jane@x.org");
        assert_eq!(request.name, "John Doe");
    }

    #[test]
    fn test_analyze_request_falls_back_to_snapshot_email() {
        let request = AnalyzeRequest::build("pw", Some("   "), &full_info());
        assert_eq!(request.email, "john.doe@example.com");
        let request = AnalyzeRequest::build("pw", None, &PersonalInfo::default());
        assert_eq!(request.email, "");
    }

    #[test]
    fn test_analyze_request_debug_redacts_the_password() {
        let request = AnalyzeRequest::build("hunter2", None, &full_info());
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("hunter2"), "leaked password: {}", rendered);
        assert!(rendered.contains("[REDACTED]"));
        // the rest of the payload stays inspectable
        assert!(rendered.contains("John Doe"));
    }

    #[test]
    fn test_crack_url_encodes_password_segment() {
        let client = ApiClient::new(ApiConfig::new("http://127.0.0.1:5000"));
        let mut request = crack_request(false);
        request.password = SecretString::new("p w/d?x".to_string().into());
        let url = client.crack_stream_url(&request).unwrap();
        assert!(url.path().starts_with("/crack_password_stream/"));
        // slashes and spaces must not split the path segment
        assert!(url.path().ends_with("/p%20w%2Fd%3Fx"), "path: {}", url.path());
    }

    #[test]
    fn test_crack_url_without_personal_info_carries_none() {
        let client = ApiClient::new(ApiConfig::new("http://127.0.0.1:5000"));
        let url = client.crack_stream_url(&crack_request(false)).unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("time_limit=30"));
        assert!(query.contains("use_personal_info=false"));
        for forbidden in ["full_name", "dob", "location", "phone", "company", "address", "email"]
        {
            assert!(!query.contains(forbidden), "leaked {} in {}", forbidden, query);
        }
    }

    #[test]
    fn test_crack_url_with_personal_info_carries_non_empty_fields_only() {
        let client = ApiClient::new(ApiConfig::new("http://127.0.0.1:5000"));
        let mut request = crack_request(true);
        request.personal_info.phone = None;
        request.personal_info.address = Some("   ".to_string());
        let url = client.crack_stream_url(&request).unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("use_personal_info=true"));
        assert!(query.contains("full_name=John+Doe"));
        assert!(query.contains("email=john.doe%40example.com"));
        assert!(!query.contains("phone"));
        assert!(!query.contains("address"));
    }

    #[tokio::test]
    async fn test_generate_password_accepts_legacy_key() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/generate_password"))
            .and(query_param("length", "16"))
            .and(query_param("symbols", "1"))
            .and(query_param("numbers", "0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"generated_password": "xK9!mQ2pLw8#Tz4v"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(server.uri()));
        let password = client.generate_password(16, true, false).await.unwrap();
        assert_eq!(password, "xK9!mQ2pLw8#Tz4v");
    }

    #[tokio::test]
    async fn test_generate_password_rejects_bad_length_before_any_request() {
        // deliberately unroutable config: validation must trip first
        let client = ApiClient::new(ApiConfig::new("http://0.0.0.0:1"));
        let err = client.generate_password(4, true, true).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Invalid(ValidationError::GeneratedLengthOutOfRange(4))
        ));
    }

    #[tokio::test]
    async fn test_analyze_password_maps_non_success_status() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze_password"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Password is required."))
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(server.uri()));
        let request = AnalyzeRequest::build("", None, &PersonalInfo::default());
        let err = client.analyze_password(&request).await.unwrap_err();
        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, "Password is required.");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }
}
