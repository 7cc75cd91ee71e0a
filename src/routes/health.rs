//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok", "session_running": false }`
//!
//! 서버가 떠 있는지와 함께 외부 세션 프로세스가 살아 있는지도 알려줍니다.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::routes::AppState;

/// `GET /api/health`: 서버 상태를 확인합니다. 이 핸들러는 실패하지 않습니다.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "session_running": state.sessions.is_running().await,
    }))
}
