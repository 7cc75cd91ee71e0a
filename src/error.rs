//! # 에러 처리 모듈
//!
//! 세션 서버에서 발생할 수 있는 에러 타입을 정의합니다.
//!
//! - `AppError` 열거형: 서버 쪽 에러를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "error": "..." }` JSON 응답으로 변환
//!
//! 클라이언트 쪽(HTTP 호출, 언어 모델 API) 에러는 `client::ClientError`에 있습니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 서버에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러가 `Result<T, AppError>`를 반환하면 Axum이 `IntoResponse`를 호출해
/// HTTP 응답으로 바꿉니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 대화 로그 파일을 읽지 못함 (HTTP 500)
    /// 원인 에러는 로그에만 남기고 클라이언트에는 고정 문구를 보냅니다.
    #[error("Failed to read conversation log: {0}")]
    ConversationLog(#[source] std::io::Error),

    /// 외부 세션 프로세스를 띄우거나 멈추지 못함 (HTTP 500)
    #[error("Session process error: {0}")]
    Process(String),

    /// 자식 프로세스 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(ConversationLog, Io)는 실제 내용을 로그에만 기록하고
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ConversationLog(ref e) => {
                tracing::error!("Error reading conversation log: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to read conversation log.".to_string(),
                )
            }
            AppError::Process(ref msg) => {
                tracing::error!("Session process error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An IO error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": "Failed to read conversation log." }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
