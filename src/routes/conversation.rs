//! # 대화 로그 조회 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/get-conversation` → `{ "conversation": "USER: ...\nASSISTANT: ..." }`
//!
//! 클라이언트가 1초마다 폴링하므로 캐시를 모두 끕니다.
//! 항상 디스크의 현재 내용을 돌려줘야 새 줄을 감지할 수 있습니다.

use axum::{
    extract::State,
    http::header::{HeaderName, CACHE_CONTROL, EXPIRES, PRAGMA},
    Json,
};

use crate::{error::AppError, models::ConversationResponse, routes::AppState};

/// 폴링 응답에 붙는 캐시 금지 헤더
const NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (
        CACHE_CONTROL,
        "no-store, no-cache, must-revalidate, proxy-revalidate",
    ),
    (PRAGMA, "no-cache"),
    (EXPIRES, "0"),
];

/// 대화 로그 파일 전체를 읽어 반환합니다.
///
/// 파일을 읽지 못하면 500 `{ "error": "Failed to read conversation log." }`
pub async fn get_conversation(
    State(state): State<AppState>,
) -> Result<([(HeaderName, &'static str); 3], Json<ConversationResponse>), AppError> {
    let conversation = tokio::fs::read_to_string(state.sessions.log_path())
        .await
        .map_err(AppError::ConversationLog)?;

    Ok((NO_CACHE_HEADERS, Json(ConversationResponse { conversation })))
}
