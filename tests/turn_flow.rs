//! End-to-end turn against mocked assistant and translation servers.

use std::sync::Arc;

use bight::assistant::OpenAiAssistantClient;
use bight::translate::LibreTranslateClient;
use bight::turn::{
    ControllerSettings, ImmediateClock, LengthHint, Submission, TurnController, TurnPhase,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_assistant(server: &MockServer, reply: &str) {
    Mock::given(method("POST"))
        .and(path("/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "thread_9"})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_9/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "msg_u"})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_9/runs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "run_9", "status": "queued"})),
        )
        .mount(server)
        .await;
    // First poll reports in_progress, later polls completed.
    Mock::given(method("GET"))
        .and(path("/threads/thread_9/runs/run_9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "run_9", "status": "in_progress"})),
        )
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_9/runs/run_9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "run_9", "status": "completed"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_9/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"id": "msg_u", "role": "user",
                 "content": [{"type": "text", "text": {"value": "build a button", "annotations": []}}]},
                {"id": "msg_a", "role": "assistant",
                 "content": [{"type": "text", "text": {"value": reply, "annotations": []}}]}
            ],
            "has_more": false
        })))
        .mount(server)
        .await;
}

fn settings() -> ControllerSettings {
    ControllerSettings::new("asst_test")
}

#[tokio::test]
async fn turn_round_trip_extracts_code() {
    let assistant_server = MockServer::start().await;
    let translate_server = MockServer::start().await;
    mount_assistant(
        &assistant_server,
        "Sure thing! 🎉 ```html\n<button>Click</button>\n``` Have fun【3:0†notes.md】",
    )
    .await;

    let clock = ImmediateClock::new();
    let mut ctl = TurnController::new(
        Arc::new(OpenAiAssistantClient::new("sk-test", assistant_server.uri()).unwrap()),
        Arc::new(LibreTranslateClient::new(translate_server.uri(), None).unwrap()),
        settings(),
    )
    .with_clock(Arc::new(clock.clone()));

    ctl.start_session().await;
    assert_eq!(ctl.thread().map(|t| t.as_str()), Some("thread_9"));

    let submission = ctl.run_turn("build a button", LengthHint::Short).await.unwrap();
    assert!(matches!(submission, Submission::Started(_)));

    let state = ctl.state();
    assert_eq!(state.phase, TurnPhase::Ready);
    assert_eq!(state.reply, "Sure thing! 🎉 ");
    assert_eq!(state.code.as_deref(), Some("<button>Click</button>"));
    assert!(state.audio_ready);
    assert_eq!(clock.ticks(), 2);

    // Default locale: the translator is never contacted.
    assert!(translate_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn turn_round_trip_translates_prose() {
    let assistant_server = MockServer::start().await;
    let translate_server = MockServer::start().await;
    mount_assistant(&assistant_server, "Hello there").await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"translatedText": "Hola"})),
        )
        .mount(&translate_server)
        .await;

    let mut ctl = TurnController::new(
        Arc::new(OpenAiAssistantClient::new("sk-test", assistant_server.uri()).unwrap()),
        Arc::new(LibreTranslateClient::new(translate_server.uri(), None).unwrap()),
        settings(),
    )
    .with_clock(Arc::new(ImmediateClock::new()));

    ctl.select_locale("es").await;
    ctl.start_session().await;
    ctl.run_turn("build a button", LengthHint::Medium).await.unwrap();

    assert_eq!(ctl.state().reply, "Hola");
    assert_eq!(ctl.state().placeholder, "Hola");
    assert!(ctl.state().code.is_none());
}
