//! # 서비스 모듈
//!
//! 라우트 핸들러와 클라이언트 상태 머신이 공통으로 쓰는 로직입니다.
//! - `process`: 외부 세션 프로세스 관리자 (`SessionManager`)
//! - `prompts`: 모드별 언어 모델 시스템 프롬프트
//! - `theme`: 페르소나/운동 테마 리졸버
//! - `transcript`: 대화 로그 파서

pub mod process;
pub mod prompts;
pub mod theme;
pub mod transcript;

pub use process::{SessionCommand, SessionManager, StartOutcome, StopOutcome};
