//! # 응답 생성기
//!
//! 세션이 끝났을 때 사용자 발화(transcript)를 어시스턴트 응답으로 바꿉니다.
//! 기본 구현은 OpenAI 호환 Chat Completions API를 호출하며,
//! 시스템 프롬프트는 세션 모드에 따라 고릅니다 (`services::prompts`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::ClientError;
use crate::{config::ClientConfig, models::SessionMode, services::prompts};

#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, mode: SessionMode, transcript: &str) -> Result<String, ClientError>;
}

/// OpenAI 호환 Chat Completions 응답 중 필요한 부분만 파싱합니다.
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletion {
    fn into_reply(self) -> Result<String, ClientError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ClientError::Malformed("completion has no content".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiResponder {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiResponder {
    /// API 키가 없으면 `ClientError::Unavailable`
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| ClientError::Unavailable("OPENAI_API_KEY is not set".to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.openai_model.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ResponseGenerator for OpenAiResponder {
    async fn generate(&self, mode: SessionMode, transcript: &str) -> Result<String, ClientError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompts::system_prompt(mode) },
                { "role": "user", "content": transcript },
            ],
        });

        tracing::debug!("Requesting {} reply for mode {}", self.model, mode.name());
        let completion: ChatCompletion = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        completion.into_reply()
    }
}
