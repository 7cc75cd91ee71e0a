use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use soulspeak::{
    client::{
        ClientError, ConversationPoller, HttpSessionApi, ResponseGenerator, SessionApi,
        SessionController, ToggleOutcome,
    },
    models::{Mood, Persona, SessionMode, Speaker, StartStatus, StopStatus},
    routes::{self, AppState},
    services::{SessionCommand, SessionManager},
};
use tokio::net::TcpListener;

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// 모드 인자(`$0`)를 기록하고 대화 두 줄을 출력한 뒤 멈춰 있는 세션 스크립트
const SESSION_SCRIPT: &str = "echo \"mode=$0\" >&2; \
    echo 'USER: I cannot sleep'; \
    echo 'ASSISTANT: Let us wind down together.'; \
    exec sleep 30";

async fn spawn_server(log_path: &Path) -> SocketAddr {
    let sessions = SessionManager::new(SessionCommand::new("sh", ["-c", SESSION_SCRIPT]), log_path);
    let app = routes::router(AppState { sessions });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[derive(Default)]
struct RecordingResponder {
    calls: Mutex<Vec<(SessionMode, String)>>,
}

#[async_trait]
impl ResponseGenerator for RecordingResponder {
    async fn generate(&self, mode: SessionMode, transcript: &str) -> Result<String, ClientError> {
        self.calls.lock().push((mode, transcript.to_string()));
        Ok("Try a slow body scan.".to_string())
    }
}

#[tokio::test]
async fn isla_moon_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(&dir.path().join("conversation_log.txt")).await;
    let api = Arc::new(HttpSessionApi::new(format!("http://{}", addr)));

    // 로그 파일이 아직 없으면 500 + { error }
    match api.fetch_conversation().await {
        Err(ClientError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to read conversation log.");
        }
        other => panic!("expected server error, got {:?}", other.map(|_| ())),
    }

    let responder = Arc::new(RecordingResponder::default());
    let controller = SessionController::new(api.clone(), responder.clone());
    let poller = Arc::new(ConversationPoller::new(api.clone()));
    let _polling = poller
        .clone()
        .spawn(Duration::from_millis(20), controller.subscribe_listening());

    controller.select_persona(Persona::IslaMoon);
    assert_eq!(controller.toggle_listening().await, ToggleOutcome::Started);
    assert!(controller.is_listening());

    tokio::time::timeout(TEST_TIMEOUT, async {
        while poller.messages().len() < 2 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .unwrap();
    let messages = poller.messages();
    assert_eq!(messages[0].speaker, Speaker::You);
    assert_eq!(messages[0].text, "I cannot sleep");
    assert_eq!(messages[1].speaker, Speaker::SoulSpeak);

    assert_eq!(controller.toggle_listening().await, ToggleOutcome::Stopped);
    assert!(!controller.is_listening());
    assert_eq!(controller.transcript(), "I cannot sleep");
    assert_eq!(
        responder.calls.lock().clone(),
        vec![(SessionMode::Mood(Mood::Sleep), "I cannot sleep".to_string())]
    );
    assert_eq!(controller.ai_response(), "Try a slow body scan.");

    let stopped = api.stop_session().await.unwrap();
    assert_eq!(stopped.status, StopStatus::NotRunning);
}

#[tokio::test]
async fn start_reports_running_and_rejects_unknown_modes() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(&dir.path().join("log.txt")).await;
    let api = HttpSessionApi::new(format!("http://{}", addr));

    let started = api.start_session(SessionMode::Mood(Mood::Calm)).await.unwrap();
    assert_eq!(started.status, StartStatus::Started);
    assert_eq!(started.message, "Session started with mode: Calm!");

    let running = api.start_session(SessionMode::Mood(Mood::Calm)).await.unwrap();
    assert_eq!(running.status, StartStatus::Running);

    let response = reqwest::get(format!(
        "http://{}/api/start-session?type=mood&mode=Party",
        addr
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");

    let stopped = api.stop_session().await.unwrap();
    assert_eq!(stopped.status, StopStatus::Stopped);
    assert_eq!(stopped.message.as_deref(), Some("Session stopped!"));
}

#[tokio::test]
async fn theme_and_health_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(&dir.path().join("log.txt")).await;

    let body: Value = reqwest::get(format!("http://{}/api/theme?type=mood&name=Isla%20Moon", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["theme"]["emoji"], "🌙");
    assert!(body["profile"]["specialty"]
        .as_str()
        .unwrap()
        .contains("sleep preparation"));

    let body: Value = reqwest::get(format!("http://{}/api/theme?type=exercise&name=Unknown", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["theme"]["emoji"], "🌊");
    assert!(body["profile"].is_null());

    let body: Value = reqwest::get(format!("http://{}/api/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["session_running"], false);
}
