//! Gemini backend against a mock GenerateContent endpoint

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use soulbar_providers::{
    DraftDescription, GenerationClient, GenerationError, SchemaError, ServiceError,
};
use soulbar_types::{HexColor, NonEmptyString};

use crate::common::{
    DAWN_HAZE, DEEP_CURRENT, GENERATE_PATH, TEST_API_KEY, backend_for, gemini_reply,
    mount_gemini_reply, start_gemini_mock,
};

fn feelings(text: &str) -> NonEmptyString {
    NonEmptyString::new(text).expect("non-empty")
}

#[tokio::test]
async fn text_request_yields_a_drink() {
    let server = start_gemini_mock().await;
    mount_gemini_reply(&server, DAWN_HAZE).await;
    let client = GenerationClient::new(backend_for(&server));

    let result = client
        .generate_from_text(feelings("tired but hopeful"))
        .await
        .expect("generation succeeds");

    assert_eq!(result.name().as_str(), "Dawn Haze");
    assert_eq!(result.color(), HexColor::parse("#fcd34d").unwrap());
    assert_eq!(result.ingredients().len(), 3);
    assert_eq!(result.positivity().value(), 64);
}

#[tokio::test]
async fn request_carries_key_and_json_schema() {
    let server = start_gemini_mock().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(DAWN_HAZE)))
        .expect(1)
        .mount(&server)
        .await;
    let client = GenerationClient::new(backend_for(&server));

    client
        .generate_from_text(feelings("restless"))
        .await
        .expect("generation succeeds");

    let requests = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("\"restless\""));
    let required = body["generationConfig"]["responseSchema"]["required"]
        .as_array()
        .unwrap();
    assert_eq!(required.len(), 5);
}

#[tokio::test]
async fn draft_request_names_base_and_garnishes() {
    let server = start_gemini_mock().await;
    mount_gemini_reply(&server, DEEP_CURRENT).await;
    let client = GenerationClient::new(backend_for(&server));

    let result = client
        .generate_from_draft(DraftDescription {
            base_name: "Deep Blue".into(),
            base_color: HexColor::from_rgb(0x1e, 0x3a, 0x8a),
            accents: vec!["Sharp Ice".into()],
        })
        .await
        .expect("generation succeeds");
    assert_eq!(result.positivity().value(), 38);

    let requests = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Base Liquid: Deep Blue (#1e3a8a)."));
    assert!(prompt.contains("Garnishes: Sharp Ice."));
}

#[tokio::test]
async fn server_error_is_a_service_failure() {
    let server = start_gemini_mock().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;
    let client = GenerationClient::new(backend_for(&server));

    let err = client
        .generate_from_text(feelings("anything"))
        .await
        .unwrap_err();

    match err {
        GenerationError::Service(ServiceError::Http { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("backend exploded"));
        }
        other => panic!("expected HTTP failure, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_field_is_a_schema_failure() {
    let server = start_gemini_mock().await;
    mount_gemini_reply(
        &server,
        r##"{"name": "Half Pour", "color": "#123456", "ingredients": ["Water"]}"##,
    )
    .await;
    let client = GenerationClient::new(backend_for(&server));

    let err = client
        .generate_from_text(feelings("incomplete"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Schema(SchemaError::Malformed(_))
    ));
}

#[tokio::test]
async fn blocked_prompt_is_a_service_failure() {
    let server = start_gemini_mock().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
        )
        .mount(&server)
        .await;
    let client = GenerationClient::new(backend_for(&server));

    let err = client
        .generate_from_text(feelings("something dark"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Service(ServiceError::Blocked(_))
    ));
}
