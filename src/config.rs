//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 서버 설정 (`Config`):
//! - `HOST`: 서버 바인딩 주소 (기본값 "0.0.0.0")
//! - `PORT`: 서버 포트 번호 (기본값 8000)
//! - `CONVERSATION_LOG_PATH`: 대화 로그 파일 경로
//! - `SESSION_PROGRAM`: 세션 프로세스 실행 파일 (기본값 "python")
//! - `SESSION_SCRIPT`: 실행 파일에 넘길 스크립트 경로
//!
//! 클라이언트 설정 (`ClientConfig`):
//! - `SOULSPEAK_SERVER_URL`, `POLL_INTERVAL_MS`
//! - `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_BASE_URL`
//!
//! 필수 값은 없습니다. 숫자 파싱에 실패하면 기본값을 씁니다.

use std::{env, time::Duration};

/// 세션 서버 설정
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    /// u16: 포트 번호 범위(0~65535)에 딱 맞는 타입
    pub port: u16,
    /// 외부 프로세스가 대화를 한 줄씩 추가하는 로그 파일
    pub conversation_log_path: String,
    pub session_program: String,
    pub session_script: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 → 값 조회 함수로부터 설정을 만듭니다.
    ///
    /// 테스트에서 전역 환경변수를 건드리지 않고 설정을 주입하기 위한 진입점입니다.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(8000),
            conversation_log_path: lookup("CONVERSATION_LOG_PATH")
                .unwrap_or_else(|| "backend/conversation_log.txt".to_string()),
            session_program: lookup("SESSION_PROGRAM").unwrap_or_else(|| "python".to_string()),
            session_script: lookup("SESSION_SCRIPT")
                .unwrap_or_else(|| "backend/hume_ai_script.py".to_string()),
        }
    }
}

/// 대화 폴링 주기 기본값. 0이나 잘못된 값이 들어오면 이 값을 씁니다.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// 클라이언트 상태 머신(세션 컨트롤러, 대화 폴러, 응답 생성기) 설정
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub poll_interval: Duration,
    /// 없으면 언어 모델 응답 생성을 쓸 수 없습니다.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server_url: lookup("SOULSPEAK_SERVER_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            poll_interval: lookup("POLL_INTERVAL_MS")
                .and_then(|ms| ms.parse().ok())
                .filter(|ms: &u64| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            openai_api_key: lookup("OPENAI_API_KEY").filter(|key| !key.is_empty()),
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com".to_string()),
        }
    }
}
