//! # 데이터 모델 모듈
//!
//! 서버와 클라이언트 상태 머신이 공유하는 데이터 구조체들입니다.
//! - `mode`: 페르소나, 기분, 운동, 세션 모드
//! - `session`: 세션 시작/종료 API의 요청·응답
//! - `conversation`: 대화 로그와 정규화된 메시지
//! - `journal`: 두들 경로, 저널 이미지, 저널 스냅샷
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Message`처럼 짧게 접근합니다.

pub mod conversation;
pub mod journal;
pub mod mode;
pub mod session;

pub use conversation::*;
pub use journal::*;
pub use mode::*;
pub use session::*;
