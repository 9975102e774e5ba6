//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use soulbar_engine::{App, AppSettings, GenerationClient, SvgReceiptExporter, Timings};
use soulbar_providers::GeminiBackend;
use soulbar_types::{ApiKey, ModelName};

pub const TEST_API_KEY: &str = "test-key";
pub const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

pub const DAWN_HAZE: &str = r##"{
    "name": "Dawn Haze",
    "color": "#fcd34d",
    "ingredients": ["Chamomile", "Wild honey", "First light"],
    "analysis": "You are tired, yet still facing the window.",
    "positivityScore": 64
}"##;

pub const DEEP_CURRENT: &str = r##"{
    "name": "Deep Current",
    "color": "#1e3a8a",
    "ingredients": ["Deep Blue", "Sharp Ice"],
    "analysis": "Cold clarity chosen on purpose.",
    "positivityScore": 38.4
}"##;

/// Start a mock server that simulates the Gemini API
pub async fn start_gemini_mock() -> MockServer {
    MockServer::start().await
}

/// GenerateContent response carrying `payload` as the reply text.
pub fn gemini_reply(payload: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": payload }]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 10,
            "candidatesTokenCount": 20
        }
    })
}

/// Mount a single successful generation.
pub async fn mount_gemini_reply(server: &MockServer, payload: &str) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(payload)))
        .mount(server)
        .await;
}

/// Backend aimed at the mock server.
///
/// The production client refuses plain HTTP, so tests supply their own.
pub fn backend_for(server: &MockServer) -> GeminiBackend {
    GeminiBackend::new(
        ApiKey::new(TEST_API_KEY).expect("non-empty key"),
        ModelName::default(),
    )
    .with_http_client(reqwest::Client::new())
    .with_base_url(server.uri())
}

/// A session talking to the mock server with every cosmetic delay removed.
pub fn app_for(server: &MockServer, export_dir: &Path) -> App {
    let settings = AppSettings {
        timings: Timings::instant(),
        export_dir: export_dir.to_path_buf(),
        ..AppSettings::default()
    };
    App::new(GenerationClient::new(backend_for(server)), settings)
        .with_exporter(SvgReceiptExporter::new(export_dir))
}

/// Drives the session clock until `done` holds or five seconds pass.
pub async fn run_until(app: &mut App, mut done: impl FnMut(&App) -> bool) {
    let step = Duration::from_millis(10);
    for _ in 0..500 {
        if done(app) {
            return;
        }
        tokio::time::sleep(step).await;
        app.advance(step);
    }
    panic!("condition not reached; view is {:?}", app.view());
}
