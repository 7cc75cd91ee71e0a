//! # SoulSpeak
//!
//! 정신 건강 대화 도우미의 세션 서버와 클라이언트 상태 머신을 담은 라이브러리입니다.
//!
//! - `routes` / `services`: 외부 음성 프로세스를 띄우고 멈추는 HTTP 세션 서버
//! - `client`: 세션 컨트롤러, 대화 폴러, 응답 생성기
//! - `journal`: 두들 캔버스와 사진이 들어가는 저널 편집기
//! - `stress_ball`: 스트레스볼 상호작용
//! - `services::theme`: 페르소나/운동별 테마

pub mod client;
pub mod config;
pub mod error;
pub mod journal;
pub mod models;
pub mod routes;
pub mod services;
pub mod stress_ball;
