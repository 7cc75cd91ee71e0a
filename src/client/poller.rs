//! # 대화 로그 폴러
//!
//! 서버의 대화 로그를 주기적으로 가져와 `Message` 목록으로 다시 만듭니다.
//!
//! - 마운트 직후 한 번, 그 뒤로는 주기마다 가져옵니다.
//! - 주기 타이머는 항상 돌지만 세션이 활성 상태가 아니면 그 틱은 건너뜁니다.
//! - 직전에 본 줄 수보다 늘어나면 닫혀 있던 메시지 영역을 다시 보여줍니다.
//! - 실패는 로그만 남기고 다음 틱에서 다시 시도합니다.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{sync::watch, task::JoinHandle};

use super::SessionApi;
use crate::{
    config::{ClientConfig, DEFAULT_POLL_INTERVAL},
    models::Message,
    services::transcript,
};

/// 화면에 보이는 대화 상태
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationView {
    pub messages: Vec<Message>,
    /// 메시지 영역 표시 여부
    pub visible: bool,
    /// 마지막으로 관찰한 (공백 줄을 뺀) 로그 줄 수. 처음에는 0
    pub last_line_count: usize,
}

impl Default for ConversationView {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            visible: true,
            last_line_count: 0,
        }
    }
}

/// 폴링 한 번의 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// 세션이 비활성이라 가져오지 않음
    Skipped,
    /// 줄 수 변화 없음
    Unchanged,
    /// 새 줄이 n개 추가됨 (첫 로그도 0줄에서 늘어난 것으로 봄)
    Appended(usize),
    /// 로그가 줄어들어 목록을 새로 만듦
    Reset,
    /// 가져오기 실패
    Failed,
}

pub struct ConversationPoller {
    api: Arc<dyn SessionApi>,
    view: Mutex<ConversationView>,
}

impl ConversationPoller {
    pub fn new(api: Arc<dyn SessionApi>) -> Self {
        Self {
            api,
            view: Mutex::new(ConversationView::default()),
        }
    }

    pub fn view(&self) -> ConversationView {
        self.view.lock().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.view.lock().messages.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.view.lock().visible
    }

    /// 사용자가 메시지 영역을 닫음. 새 줄이 오면 다시 열립니다.
    pub fn dismiss(&self) {
        self.view.lock().visible = false;
    }

    pub fn show(&self) {
        self.view.lock().visible = true;
    }

    /// 로그 원문을 반영합니다.
    ///
    /// 목록은 항상 로그 전체를 다시 파싱한 결과라서 같은 로그는 같은 목록이 됩니다.
    pub fn apply_log(&self, log: &str) -> PollOutcome {
        let messages = transcript::parse_messages(log);
        let count = messages.len();

        let mut view = self.view.lock();
        let previous = view.last_line_count;
        view.messages = messages;
        view.last_line_count = count;

        if count < previous {
            PollOutcome::Reset
        } else if count > previous {
            view.visible = true;
            PollOutcome::Appended(count - previous)
        } else {
            PollOutcome::Unchanged
        }
    }

    /// 서버에서 로그를 가져와 반영합니다.
    pub async fn fetch_conversation(&self) -> PollOutcome {
        match self.api.fetch_conversation().await {
            Ok(log) => {
                let outcome = self.apply_log(&log);
                if let PollOutcome::Appended(count) = outcome {
                    tracing::debug!("Conversation grew by {} line(s)", count);
                }
                outcome
            }
            Err(e) => {
                tracing::warn!("Error fetching conversation: {}", e);
                PollOutcome::Failed
            }
        }
    }

    /// 타이머 한 틱. 세션이 비활성이면 아무것도 하지 않습니다.
    pub async fn tick(&self, session_active: bool) -> PollOutcome {
        if !session_active {
            return PollOutcome::Skipped;
        }
        self.fetch_conversation().await
    }

    /// 백그라운드 폴링 루프를 띄웁니다.
    ///
    /// 반환된 핸들을 drop하면 타이머가 멈춥니다.
    /// 주기가 0이면 기본 주기(`DEFAULT_POLL_INTERVAL`)를 씁니다.
    pub fn spawn(self: Arc<Self>, period: Duration, active: watch::Receiver<bool>) -> PollerHandle {
        let period = if period.is_zero() {
            tracing::warn!("Poll interval must be non-zero, using {:?}", DEFAULT_POLL_INTERVAL);
            DEFAULT_POLL_INTERVAL
        } else {
            period
        };
        let task = tokio::spawn(async move {
            self.fetch_conversation().await;

            let mut interval = tokio::time::interval(period);
            // 첫 tick은 즉시 완료되므로 소비해 둡니다.
            interval.tick().await;
            loop {
                interval.tick().await;
                let session_active = *active.borrow();
                self.tick(session_active).await;
            }
        });
        PollerHandle { task }
    }

    /// `ClientConfig::poll_interval` 주기로 폴링 루프를 띄웁니다.
    pub fn spawn_with_config(
        self: Arc<Self>,
        config: &ClientConfig,
        active: watch::Receiver<bool>,
    ) -> PollerHandle {
        self.spawn(config.poll_interval, active)
    }
}

/// 폴링 루프의 소유권
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// 루프를 멈춥니다. drop과 같습니다.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
