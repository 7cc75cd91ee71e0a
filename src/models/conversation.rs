//! # 대화 기록 모델
//!
//! 외부 프로세스가 남기는 대화 로그는 줄 단위 텍스트이고,
//! 화면에 보여줄 때는 `Message { speaker, text }` 목록으로 정규화합니다.

use serde::{Deserialize, Serialize};

/// 발화자. JSON에는 화면에 표시되는 이름 그대로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    You,
    SoulSpeak,
}

/// 정규화된 대화 한 줄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
}

impl Message {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

/// `GET /api/get-conversation` 응답: 로그 파일 전체를 그대로 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub conversation: String,
}
