//! # 세션 시작/종료 API의 요청·응답 모델
//!
//! 외부 음성 세션 프로세스를 켜고 끄는 두 엔드포인트의 JSON 형태를 정의합니다.
//! 서버(routes)와 클라이언트(client) 양쪽이 같은 구조체를 공유하므로
//! `Serialize`와 `Deserialize`를 모두 derive합니다.
//!
//! ## 세션 흐름
//! ```text
//! GET /api/start-session?type=mood&mode=Sleep → { "status": "started", ... }
//! (대화 진행 중... 로그 파일에 한 줄씩 추가됨)
//! GET /api/stop-session                        → { "status": "stopped", "transcript": "..." }
//! ```

use serde::{Deserialize, Serialize};

use super::SessionMode;

/// 세션 시작 쿼리: `GET /api/start-session?type=mood&mode=Sleep`
///
/// 두 필드 모두 선택입니다. `mode`가 비어 있으면 모드 없이 프로세스를 시작합니다.
#[derive(Debug, Default, Deserialize)]
pub struct StartSessionQuery {
    /// "mood" 또는 "exercise". `type`은 Rust 예약어라서 이름을 바꿔 받습니다.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mode: Option<String>,
}

impl StartSessionQuery {
    /// 쿼리를 `SessionMode`로 해석합니다.
    ///
    /// - `Ok(None)`: 모드가 지정되지 않음
    /// - `Ok(Some(mode))`: 알려진 기분/운동 이름
    /// - `Err(message)`: 알 수 없는 이름
    pub fn session_mode(&self) -> Result<Option<SessionMode>, String> {
        let name = match self.mode.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(name) => name,
        };

        SessionMode::parse(self.kind.as_deref(), name)
            .map(Some)
            .ok_or_else(|| format!("Unknown session mode: {}", name))
    }
}

/// 세션 시작 결과 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartStatus {
    /// 새 프로세스를 띄웠음
    Started,
    /// 이미 실행 중인 프로세스가 있음 (아무 것도 하지 않음)
    Running,
    /// 시작 실패
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub status: StartStatus,
    pub message: String,
}

/// 세션 종료 결과 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopStatus {
    Stopped,
    NotRunning,
}

/// 세션 종료 응답
///
/// `transcript`는 이번 세션 동안 캡처된 사용자 발화입니다.
/// 값이 있으면 클라이언트가 응답 생성으로 넘깁니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSessionResponse {
    pub status: StopStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}
