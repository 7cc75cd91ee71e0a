//! # 세션 시작/종료 API 라우트 핸들러
//!
//! 외부 음성 세션 프로세스를 켜고 끄는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/start-session?type=&mode= | `start_session` | 세션 프로세스 시작 |
//! | GET | /api/stop-session | `stop_session` | 세션 프로세스 종료 |
//!
//! ## 세션 사용 흐름
//! ```text
//! 1. 메인 원 클릭 → GET /start-session?type=mood&mode=Sleep
//! 2. 대화 진행 중... (클라이언트가 1초마다 /get-conversation 폴링)
//! 3. 다시 클릭     → GET /stop-session (캡처된 발화를 transcript로 받음)
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    models::*, // StartSessionQuery, StartSessionResponse, StopSessionResponse ...
    routes::AppState,
    services::{StartOutcome, StopOutcome},
};

/// 세션 프로세스를 시작합니다.
///
/// `GET /api/start-session?type=mood&mode=Sleep`
///
/// 상태 코드와 본문을 튜플로 반환하므로 실패해도 항상
/// `{ "status": ..., "message": ... }` 형태를 유지합니다.
/// - 알 수 없는 모드: 400 + `status: "error"`
/// - 이미 실행 중: 200 + `status: "running"`
/// - 프로세스 실행 실패: 500 + `status: "error"`
pub async fn start_session(
    State(state): State<AppState>,
    Query(query): Query<StartSessionQuery>,
) -> (StatusCode, Json<StartSessionResponse>) {
    let mode = match query.session_mode() {
        Ok(mode) => mode,
        Err(message) => {
            tracing::warn!("Rejected start request: {}", message);
            return (
                StatusCode::BAD_REQUEST,
                Json(StartSessionResponse {
                    status: StartStatus::Error,
                    message,
                }),
            );
        }
    };

    match state.sessions.start(mode).await {
        Ok(StartOutcome::Started) => {
            let message = match mode {
                Some(mode) => format!("Session started with mode: {}!", mode.name()),
                None => "Session started!".to_string(),
            };
            (
                StatusCode::OK,
                Json(StartSessionResponse {
                    status: StartStatus::Started,
                    message,
                }),
            )
        }
        Ok(StartOutcome::AlreadyRunning) => (
            StatusCode::OK,
            Json(StartSessionResponse {
                status: StartStatus::Running,
                message: "Session is already running.".to_string(),
            }),
        ),
        Err(e) => {
            tracing::error!("Failed to start session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StartSessionResponse {
                    status: StartStatus::Error,
                    message: e.to_string(),
                }),
            )
        }
    }
}

/// 실행 중인 세션 프로세스를 종료합니다.
///
/// `GET /api/stop-session` → `{ "status": "stopped", "message": ..., "transcript": ... }`
///
/// 실행 중인 프로세스가 없으면 `status: "not_running"`입니다. 프로세스가 스스로
/// 종료했다면 그동안 캡처된 발화를 `transcript`로 함께 돌려줍니다.
pub async fn stop_session(
    State(state): State<AppState>,
) -> Result<Json<StopSessionResponse>, AppError> {
    let response = match state.sessions.stop().await? {
        StopOutcome::Stopped { transcript } => StopSessionResponse {
            status: StopStatus::Stopped,
            message: Some("Session stopped!".to_string()),
            transcript,
        },
        StopOutcome::NotRunning { transcript } => StopSessionResponse {
            status: StopStatus::NotRunning,
            message: Some("Session is not running.".to_string()),
            transcript,
        },
    };
    Ok(Json(response))
}
