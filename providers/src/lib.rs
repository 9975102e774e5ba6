//! Structured cocktail generation.
//!
//! # Architecture
//!
//! - [`GenerationClient`] - builds the request for either crafting path, sends it
//!   through a backend exactly once, and validates the reply
//! - [`GenerationBackend`] - the seam to the external model; given an instruction,
//!   a prompt and a strict schema it returns the raw JSON payload or fails
//! - [`gemini`] - Google Gemini backend (GenerateContent API, JSON response mode)
//!
//! # Error Handling
//!
//! Every failure is a [`GenerationError`]. Transport, auth, quota and blocked
//! responses are [`ServiceError`]s; a payload that is not JSON, misses a required
//! field, or carries an unusable value is a [`SchemaError`]. No partial result is
//! ever returned.

pub mod gemini;
pub mod prompt;

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde::Deserialize;
use thiserror::Error;

pub use soulbar_types;
use soulbar_types::{Draft, GenerationResult, HexColor, InvalidGeneration, NonEmptyString};

pub use gemini::GeminiBackend;

/// Canonical Gemini API base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        base_client_builder().build().unwrap_or_else(|e| {
            tracing::error!("Failed to build hardened HTTP client: {e}. Using defaults.");
            reqwest::Client::default()
        })
    })
}

fn base_client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .https_only(true)
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
        .user_agent(concat!("soulbar/", env!("CARGO_PKG_VERSION")))
}

pub async fn read_capped_error_body(response: reqwest::Response) -> String {
    use futures_util::StreamExt;
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

// ============================================================================
// Errors
// ============================================================================

/// The call to the model failed or produced nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("unreadable response: {0}")]
    Decode(String),
    #[error("response blocked: {0}")]
    Blocked(String),
    #[error("response contained no text")]
    EmptyResponse,
}

/// The model answered, but not with a usable drink.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid payload: {0}")]
    Invalid(#[from] InvalidGeneration),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

// ============================================================================
// Requests
// ============================================================================

/// A finished manual recipe as the model sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftDescription {
    pub base_name: String,
    pub base_color: HexColor,
    pub accents: Vec<String>,
}

impl From<&Draft> for DraftDescription {
    fn from(draft: &Draft) -> Self {
        let base = draft.base();
        Self {
            base_name: base.name.to_string(),
            base_color: base.color,
            accents: draft.accents().names().map(String::from).collect(),
        }
    }
}

/// What a request is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSubject {
    Feelings(NonEmptyString),
    Draft(DraftDescription),
}

/// One fully prepared call to the model.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub subject: RequestSubject,
    pub system_instruction: &'static str,
    pub prompt: String,
    pub schema: serde_json::Value,
}

impl StructuredRequest {
    #[must_use]
    pub fn for_subject(subject: RequestSubject) -> Self {
        let prompt = match &subject {
            RequestSubject::Feelings(text) => prompt::text_prompt(text),
            RequestSubject::Draft(draft) => prompt::draft_prompt(draft),
        };
        Self {
            subject,
            system_instruction: prompt::SYSTEM_INSTRUCTION,
            prompt,
            schema: prompt::response_schema(),
        }
    }
}

/// The external model, reduced to "structured request in, JSON text out".
pub trait GenerationBackend: Send + Sync {
    fn complete(
        &self,
        request: StructuredRequest,
    ) -> BoxFuture<'static, Result<String, ServiceError>>;
}

/// Backend used when no API key is available; every call fails cleanly.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingKeyBackend;

impl GenerationBackend for MissingKeyBackend {
    fn complete(
        &self,
        _request: StructuredRequest,
    ) -> BoxFuture<'static, Result<String, ServiceError>> {
        Box::pin(async { Err::<String, _>(ServiceError::MissingApiKey) })
    }
}

// ============================================================================
// Client
// ============================================================================

/// Issues generation requests and validates the replies.
///
/// Cloning is cheap; the returned futures own everything they need so they
/// can be spawned onto a runtime.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
}

impl fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationClient").finish_non_exhaustive()
    }
}

impl GenerationClient {
    pub fn new(backend: impl GenerationBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    #[must_use]
    pub fn from_shared(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub fn generate_from_text(
        &self,
        text: NonEmptyString,
    ) -> BoxFuture<'static, Result<GenerationResult, GenerationError>> {
        self.send(StructuredRequest::for_subject(RequestSubject::Feelings(text)))
    }

    pub fn generate_from_draft(
        &self,
        draft: DraftDescription,
    ) -> BoxFuture<'static, Result<GenerationResult, GenerationError>> {
        self.send(StructuredRequest::for_subject(RequestSubject::Draft(draft)))
    }

    fn send(
        &self,
        request: StructuredRequest,
    ) -> BoxFuture<'static, Result<GenerationResult, GenerationError>> {
        let backend = Arc::clone(&self.backend);
        Box::pin(async move {
            let payload = backend.complete(request).await?;
            Ok::<_, GenerationError>(parse_generation(&payload)?)
        })
    }
}

/// The reply shape requested from the model.
///
/// Older prompt revisions used `cocktailName`/`hexColor`; both spellings are
/// accepted. Unknown extra fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeneration {
    #[serde(alias = "cocktailName")]
    name: String,
    #[serde(alias = "hexColor")]
    color: String,
    ingredients: Vec<String>,
    analysis: String,
    positivity_score: f64,
}

/// Strictly parses a model payload into a [`GenerationResult`].
pub fn parse_generation(payload: &str) -> Result<GenerationResult, SchemaError> {
    let raw: RawGeneration = serde_json::from_str(strip_code_fence(payload))?;
    Ok(GenerationResult::new(
        raw.name,
        &raw.color,
        raw.ingredients,
        raw.analysis,
        raw.positivity_score,
    )?)
}

fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}
