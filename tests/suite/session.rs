//! Whole sessions against a mock Gemini endpoint

use std::time::Duration;

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use soulbar_engine::{
    AI_FAILURE_NOTICE, App, BASES, HoldSource, HoldTarget, NoticeLevel, View,
};
use soulbar_types::Mode;

use crate::common::{
    DAWN_HAZE, DEEP_CURRENT, GENERATE_PATH, app_for, gemini_reply, mount_gemini_reply,
    run_until, start_gemini_mock,
};

fn open(app: &mut App, target: HoldTarget) {
    app.hold_press(target, HoldSource::Pointer);
    app.advance(Duration::from_secs(2));
    assert_eq!(app.view(), target.destination());
}

fn whisper(app: &mut App, text: &str) {
    open(app, HoldTarget::Vent);
    for c in text.chars() {
        app.whisper_insert(c);
    }
    app.whisper_submit();
}

#[tokio::test]
async fn whisper_serves_drinks_and_saves_receipt() {
    let server = start_gemini_mock().await;
    mount_gemini_reply(&server, DAWN_HAZE).await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_for(&server, dir.path());

    whisper(&mut app, "tired but hopeful");
    assert!(app.is_processing());
    run_until(&mut app, |app| app.view() == View::Result).await;

    let artifact = app.current_artifact().unwrap();
    assert_eq!(artifact.name(), "Dawn Haze");
    assert_eq!(artifact.mode(), Mode::Ai);
    assert_eq!(artifact.description(), "You are tired, yet still facing the window.");

    for _ in 0..4 {
        app.sip();
    }
    assert!(!app.quote_revealed());
    app.sip();
    assert!(app.quote_revealed());
    assert!(app.cellar().iter().all(soulbar_engine::Artifact::is_consumed));

    let saved = app.export_receipt().unwrap();
    assert_eq!(saved, dir.path().join("SoulBar-Dawn-Haze.svg"));
    let svg = std::fs::read_to_string(&saved).unwrap();
    assert!(svg.contains("Dawn Haze"));
    assert!(svg.contains("Mood Prescription Receipt"));
    assert_eq!(app.notice().map(|n| n.level()), Some(NoticeLevel::Info));

    app.open_cellar();
    assert_eq!(app.view(), View::Cellar);
    assert_eq!(app.cellar().len(), 1);
    assert!(!app.cellar().has_trend());
}

#[tokio::test]
async fn both_paths_build_a_trend() {
    let server = start_gemini_mock().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("Base Liquid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(DEEP_CURRENT)))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_gemini_reply(&server, DAWN_HAZE).await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_for(&server, dir.path());

    whisper(&mut app, "tired");
    run_until(&mut app, |app| app.view() == View::Result).await;
    app.open_cellar();
    app.new_mix();
    assert_eq!(app.view(), View::Home);

    open(&mut app, HoldTarget::Craft);
    app.choose_base(BASES[0]).unwrap();
    app.advance_to_stir().unwrap();
    app.stir().unwrap();
    app.finish_craft().unwrap();
    run_until(&mut app, |app| app.view() == View::Result).await;

    let drink = app.current_artifact().unwrap();
    assert_eq!(drink.name(), "Deep Current");
    assert_eq!(drink.mode(), Mode::Manual);
    assert_eq!(drink.origin_mood(), "Deep Blue");

    let scores: Vec<u8> = app.cellar().scores().iter().map(|s| s.value()).collect();
    assert_eq!(scores, vec![64, 38]);
    assert!(app.cellar().has_trend());
}

#[tokio::test]
async fn service_failure_keeps_the_whisper() {
    let server = start_gemini_mock().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_for(&server, dir.path());

    whisper(&mut app, "heavy");
    run_until(&mut app, |app| !app.is_processing()).await;

    assert_eq!(app.view(), View::AiWhisper);
    assert_eq!(app.notice().map(|n| n.text()), Some(AI_FAILURE_NOTICE));
    assert_eq!(app.whisper().map(|w| w.input), Some("heavy"));
    assert!(app.cellar().is_empty());
}
