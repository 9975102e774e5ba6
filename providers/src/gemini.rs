//! Google Gemini backend.
//!
//! Uses the non-streaming `models/{model}:generateContent` endpoint with
//! `responseMimeType: application/json` and a `responseSchema`, so the reply
//! text is the JSON payload itself.

use futures_util::future::BoxFuture;
use serde_json::{Map, Value, json};
use soulbar_types::{ApiKey, ModelName};

use crate::{
    GEMINI_API_BASE_URL, GenerationBackend, ServiceError, StructuredRequest, http_client,
    read_capped_error_body,
};

/// Build a content part for Gemini API.
fn text_part(text: &str) -> Value {
    json!({ "text": text })
}

/// Build the GenerateContent request body.
///
/// Note: the REST API mixes casing conventions:
/// - `system_instruction` (snake_case)
/// - `generationConfig` (camelCase)
fn build_request_body(request: &StructuredRequest) -> Value {
    let mut body = Map::new();

    body.insert(
        "contents".into(),
        json!([{
            "role": "user",
            "parts": [text_part(&request.prompt)]
        }]),
    );

    body.insert(
        "system_instruction".into(),
        json!({ "parts": [text_part(request.system_instruction)] }),
    );

    body.insert(
        "generationConfig".into(),
        json!({
            "responseMimeType": "application/json",
            "responseSchema": request.schema,
        }),
    );

    Value::Object(body)
}

/// Pulls the JSON payload text out of a GenerateContent response.
fn extract_payload(response: &typed::Response) -> Result<String, ServiceError> {
    if let Some(error) = &response.error {
        return Err(ServiceError::Http {
            status: error.code.map_or(0, |c| c.clamp(0, i32::from(u16::MAX)) as u16),
            body: error.message_or_default().to_string(),
        });
    }

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(ServiceError::Blocked(format!("prompt blocked ({reason})")));
    }

    let candidate = response
        .candidates
        .as_deref()
        .and_then(<[typed::Candidate]>::first)
        .ok_or(ServiceError::EmptyResponse)?;

    if let Some(message) = candidate
        .finish_reason
        .as_deref()
        .map(typed::FinishReason::parse)
        .and_then(typed::FinishReason::error_message)
    {
        return Err(ServiceError::Blocked(message.to_string()));
    }

    let text: String = candidate
        .content
        .as_ref()
        .and_then(|c| c.parts.as_deref())
        .unwrap_or_default()
        .iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        return Err(ServiceError::EmptyResponse);
    }
    Ok(text)
}

/// Gemini GenerateContent client.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: ModelName,
    api_key: ApiKey,
}

impl GeminiBackend {
    #[must_use]
    pub fn new(api_key: ApiKey, model: ModelName) -> Self {
        Self {
            client: http_client().clone(),
            base_url: GEMINI_API_BASE_URL.to_string(),
            model,
            api_key,
        }
    }

    /// Points the backend at another API root (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn model(&self) -> &ModelName {
        &self.model
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url,
            self.model.as_str()
        )
    }

    async fn send(self, body: Value) -> Result<String, ServiceError> {
        let url = self.endpoint();
        tracing::debug!(model = %self.model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = read_capped_error_body(response).await;
            tracing::warn!(%status, "Gemini request failed");
            return Err(ServiceError::Http {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let parsed: typed::Response = response
            .json()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))?;
        extract_payload(&parsed)
    }
}

impl GenerationBackend for GeminiBackend {
    fn complete(
        &self,
        request: StructuredRequest,
    ) -> BoxFuture<'static, Result<String, ServiceError>> {
        let body = build_request_body(&request);
        Box::pin(self.clone().send(body))
    }
}

/// Typed view of the GenerateContent response.
pub(crate) mod typed {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Response {
        pub candidates: Option<Vec<Candidate>>,
        pub prompt_feedback: Option<PromptFeedback>,
        pub error: Option<ErrorInfo>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PromptFeedback {
        pub block_reason: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Candidate {
        pub content: Option<Content>,
        pub finish_reason: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Content {
        pub parts: Option<Vec<Part>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Part {
        pub text: Option<String>,
        /// Whether this is thinking content
        #[serde(default)]
        pub thought: bool,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorInfo {
        pub message: Option<String>,
        pub code: Option<i32>,
    }

    impl ErrorInfo {
        #[must_use]
        pub fn message_or_default(&self) -> &str {
            self.message.as_deref().unwrap_or("Unknown error")
        }
    }

    /// Known Gemini finish reasons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FinishReason {
        Stop,
        MaxTokens,
        Safety,
        Recitation,
        Language,
        Blocklist,
        ProhibitedContent,
        Spii,
        Other,
        Unknown,
    }

    impl FinishReason {
        #[must_use]
        pub fn parse(s: &str) -> Self {
            match s {
                "STOP" => Self::Stop,
                "MAX_TOKENS" => Self::MaxTokens,
                "SAFETY" => Self::Safety,
                "RECITATION" => Self::Recitation,
                "LANGUAGE" => Self::Language,
                "BLOCKLIST" => Self::Blocklist,
                "PROHIBITED_CONTENT" => Self::ProhibitedContent,
                "SPII" => Self::Spii,
                "OTHER" => Self::Other,
                _ => Self::Unknown,
            }
        }

        /// Returns error message if this is an error reason, None if success.
        ///
        /// A truncated reply (`MAX_TOKENS`) is passed on; it fails schema
        /// validation if the JSON was cut short.
        #[must_use]
        pub fn error_message(self) -> Option<&'static str> {
            match self {
                Self::Stop | Self::MaxTokens | Self::Unknown => None,
                Self::Safety => Some("Content filtered by safety settings"),
                Self::Recitation => Some("Response blocked: recitation"),
                Self::Language => Some("Unsupported language"),
                Self::Blocklist => Some("Content contains blocked terms"),
                Self::ProhibitedContent => Some("Prohibited content"),
                Self::Spii => Some("Sensitive personal information detected"),
                Self::Other => Some("Response stopped for an unspecified reason"),
            }
        }
    }
}
