//! # 세션 서버 API 클라이언트
//!
//! `SessionApi` 트레이트는 세션 컨트롤러와 대화 폴러가 서버에 요청하는 세 가지 호출을
//! 추상화합니다. 실제 구현은 `reqwest` 기반의 `HttpSessionApi`입니다.

use async_trait::async_trait;
use serde::Deserialize;

use super::ClientError;
use crate::{
    config::ClientConfig,
    models::{ConversationResponse, SessionMode, StartSessionResponse, StopSessionResponse},
};

/// 세션 서버 호출
///
/// `#[async_trait]`: 트레이트 객체(`Arc<dyn SessionApi>`)로 쓸 수 있고
/// 반환 future가 `Send`가 되도록 비동기 메서드를 박싱합니다.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn start_session(&self, mode: SessionMode) -> Result<StartSessionResponse, ClientError>;
    async fn stop_session(&self) -> Result<StopSessionResponse, ClientError>;
    /// 대화 로그 원문 (줄바꿈으로 구분된 문자열)
    async fn fetch_conversation(&self) -> Result<String, ClientError>;
}

/// 서버 실패 응답 본문: `{ "error": "..." }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP로 세션 서버를 호출하는 구현
#[derive(Debug, Clone)]
pub struct HttpSessionApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSessionApi {
    /// `base_url` 예: "http://localhost:8000"
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.server_url.clone())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    /// `GET /api/start-session?type=...&mode=...`
    ///
    /// 서버는 실패(400/500)에도 `{ status: "error", message }` 본문을 보내므로
    /// 상태 코드와 관계없이 본문을 파싱합니다.
    async fn start_session(&self, mode: SessionMode) -> Result<StartSessionResponse, ClientError> {
        let response = self
            .client
            .get(self.url("start-session"))
            .query(&mode.query_pairs())
            .send()
            .await?;
        Ok(response.json().await?)
    }

    async fn stop_session(&self) -> Result<StopSessionResponse, ClientError> {
        let response = self.client.get(self.url("stop-session")).send().await?;
        Ok(response.error_for_status()?.json().await?)
    }

    async fn fetch_conversation(&self) -> Result<String, ClientError> {
        let response = self.client.get(self.url("get-conversation")).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: ConversationResponse = response.json().await?;
        Ok(body.conversation)
    }
}
