use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::TextGenerator;
use crate::domain::{GenerationConfig, RecommendationError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for the Gemini `generateContent` endpoint.
///
/// The API key is mandatory and never has a default. `Debug` output redacts it.
#[derive(Clone)]
pub struct GeminiConfig {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    generation: GenerationConfig,
}

impl GeminiConfig {
    /// Fails with [`RecommendationError::MissingCredential`] for a blank key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, RecommendationError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(RecommendationError::MissingCredential);
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            generation: GenerationConfig::default(),
        })
    }

    /// Read configuration from the environment:
    ///
    /// | Variable              | Default                                     |
    /// |-----------------------|---------------------------------------------|
    /// | `GEMINI_API_KEY`      | required                                    |
    /// | `GEMINI_BASE_URL`     | `https://generativelanguage.googleapis.com` |
    /// | `GEMINI_MODEL`        | `gemini-2.0-flash`                          |
    /// | `GEMINI_TIMEOUT_SECS` | `30`                                        |
    pub fn from_env() -> Result<Self, RecommendationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, RecommendationError> {
        let key = lookup("GEMINI_API_KEY").ok_or(RecommendationError::MissingCredential)?;
        let mut config = Self::new(key)?;

        if let Some(base) = lookup("GEMINI_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base);
        }
        if let Some(model) = lookup("GEMINI_MODEL").filter(|v| !v.trim().is_empty()) {
            config = config.with_model(model);
        }
        if let Some(raw) = lookup("GEMINI_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_timeout(Duration::from_secs(secs)),
                _ => warn!(
                    "Ignoring invalid GEMINI_TIMEOUT_SECS={raw:?}; using {}s",
                    DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into().trim().to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("generation", &self.generation)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Subset of the `generateContent` response we read.
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate that has any.
    fn first_text(self) -> Option<String> {
        self.candidates.into_iter().find_map(|candidate| {
            let text: String = candidate
                .content?
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect();
            (!text.trim().is_empty()).then_some(text)
        })
    }
}

/// Translate a non-success HTTP status. No status is retried.
pub fn map_status(status: StatusCode) -> RecommendationError {
    match status {
        StatusCode::UNAUTHORIZED => RecommendationError::InvalidCredentials,
        StatusCode::FORBIDDEN => RecommendationError::AccessDenied,
        StatusCode::TOO_MANY_REQUESTS => RecommendationError::RateLimited,
        other => RecommendationError::UpstreamFailure(other.as_u16()),
    }
}

fn map_transport(e: reqwest::Error) -> RecommendationError {
    if e.is_timeout() {
        RecommendationError::UpstreamTimeout
    } else {
        RecommendationError::connection(e.to_string())
    }
}

/// [`TextGenerator`] backed by the Gemini `generateContent` REST endpoint.
///
/// Sends one POST per prompt with the configured sampling parameters and the
/// key in the `x-goog-api-key` header, so it never appears in URLs or logs.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
    url: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let url = config.endpoint();
        Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            config,
            url,
        }
    }

    pub fn from_env() -> Result<Self, RecommendationError> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, RecommendationError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: &self.config.generation,
        };

        debug!("POST {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(map_status(status));
        }

        let body = response.text().await.map_err(map_transport)?;
        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("GeminiClient: failed to deserialize response: {e}");
            RecommendationError::unparsable(format!("invalid response body: {e}"))
        })?;

        parsed
            .first_text()
            .ok_or(RecommendationError::EmptyUpstreamResponse)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
