//! # 클라이언트 상태 머신
//!
//! 브라우저 UI가 하던 일을 UI 이벤트로 구동되는 상태 머신으로 옮긴 모듈입니다.
//!
//! - `api`: 세션 서버 호출 트레이트(`SessionApi`)와 HTTP 구현
//! - `controller`: 세션 시작/종료 생명주기 (`SessionController`)
//! - `poller`: 대화 로그 폴링 (`ConversationPoller`)
//! - `responder`: 사용자 발화 → 어시스턴트 응답 생성 (`ResponseGenerator`)
//!
//! 외부 호출은 모두 트레이트 뒤에 있어서 테스트에서는 가짜 구현으로 바꿔 끼웁니다.

pub mod api;
pub mod controller;
pub mod poller;
pub mod responder;

pub use api::{HttpSessionApi, SessionApi};
pub use controller::{SessionController, SessionEntry, ToggleOutcome};
pub use poller::{ConversationPoller, ConversationView, PollOutcome, PollerHandle};
pub use responder::{OpenAiResponder, ResponseGenerator};

use thiserror::Error;

/// 클라이언트 쪽에서 발생하는 에러
///
/// 이 에러들은 화면에 보고되지 않습니다. 로그만 남기고 상태를 바꾸지 않는 것이
/// 정해진 동작입니다.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 네트워크 또는 응답 본문 파싱 실패
    /// #[from]: reqwest::Error → ClientError::Http 자동 변환
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 서버가 `{ "error": "..." }`로 실패를 알림
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 응답 생성기를 쓸 수 없음 (예: API 키 없음)
    #[error("Response generation unavailable: {0}")]
    Unavailable(String),

    /// 응답 형식이 예상과 다름
    #[error("Malformed response: {0}")]
    Malformed(String),
}
