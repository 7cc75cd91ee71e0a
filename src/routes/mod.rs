//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 조립 함수입니다.
//!
//! 각 하위 모듈:
//! - `conversation`: 대화 로그 조회 (클라이언트 폴링 대상)
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `sessions`: 세션 프로세스 시작/종료
//! - `theme`: 페르소나/운동 테마 조회

pub mod conversation;
pub mod health;
pub mod sessions;
pub mod theme;

pub use conversation::*;
pub use health::*;
pub use sessions::*;
pub use theme::*;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::services::SessionManager;

/// 애플리케이션 공유 상태
///
/// 모든 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `SessionManager`는 내부가 `Arc`라서 clone해도 같은 프로세스 핸들을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
}

/// `/api` 아래에 모든 엔드포인트를 묶은 라우터를 만듭니다.
///
/// 브라우저 UI가 다른 출처(origin)에서 호출하므로 CORS를 모두 허용하고,
/// 모든 요청/응답을 `TraceLayer`로 로깅합니다.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/start-session", get(start_session))
        .route("/stop-session", get(stop_session))
        .route("/get-conversation", get(get_conversation))
        .route("/theme", get(get_theme))
        .route("/health", get(health_check))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationResponse, StartSessionQuery, StartStatus, StopStatus};
    use crate::services::SessionCommand;
    use axum::{
        extract::{Query, State},
        http::{header::CACHE_CONTROL, StatusCode},
        response::IntoResponse,
        Json,
    };

    fn state(script: &str, log_path: std::path::PathBuf) -> AppState {
        AppState {
            sessions: SessionManager::new(SessionCommand::new("sh", ["-c", script]), log_path),
        }
    }

    #[tokio::test]
    async fn start_rejects_unknown_modes_with_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let state = state("exec sleep 30", dir.path().join("log.txt"));

        let query = StartSessionQuery {
            kind: Some("mood".into()),
            mode: Some("Party".into()),
        };
        let (status, Json(body)) = start_session(State(state.clone()), Query(query)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.status, StartStatus::Error);
        assert!(!state.sessions.is_running().await);
    }

    #[tokio::test]
    async fn start_then_running_then_stop() {
        let dir = tempfile::tempdir().unwrap();
        let state = state("exec sleep 30", dir.path().join("log.txt"));

        let query = || StartSessionQuery {
            kind: Some("mood".into()),
            mode: Some("Sleep".into()),
        };
        let (status, Json(body)) = start_session(State(state.clone()), Query(query())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, StartStatus::Started);
        assert!(body.message.contains("Sleep"));

        let (_, Json(body)) = start_session(State(state.clone()), Query(query())).await;
        assert_eq!(body.status, StartStatus::Running);

        let Json(body) = stop_session(State(state.clone())).await.unwrap();
        assert_eq!(body.status, StopStatus::Stopped);
        assert_eq!(body.transcript, None);

        let Json(body) = stop_session(State(state)).await.unwrap();
        assert_eq!(body.status, StopStatus::NotRunning);
    }

    #[tokio::test]
    async fn conversation_is_served_uncached() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        tokio::fs::write(&log, "USER: hi\nASSISTANT: hello\n").await.unwrap();
        let state = state("exit 0", log);

        let (headers, Json(ConversationResponse { conversation })) =
            get_conversation(State(state)).await.unwrap();
        assert_eq!(conversation, "USER: hi\nASSISTANT: hello\n");
        assert!(headers
            .iter()
            .any(|(name, value)| *name == CACHE_CONTROL && value.contains("no-store")));
    }

    #[tokio::test]
    async fn missing_log_is_a_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = state("exit 0", dir.path().join("missing.txt"));

        let err = get_conversation(State(state)).await.unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
