//! # 세션 컨트롤러
//!
//! 메인 인터랙션(원 클릭) 하나에 묶인 세션 생명주기를 관리합니다.
//!
//! ## 상태 전이
//! ```text
//! Idle ──toggle──▶ (Starting) ──성공──▶ Listening ──toggle──▶ (Stopping) ──성공──▶ Idle
//!                      └─실패: Idle 유지                          └─실패: Listening 유지
//! ```
//! 괄호 안의 상태는 요청이 진행 중일 때만 존재하며 밖에서는 보이지 않습니다.
//! 빠르게 두 번 누르면 시작 요청이 두 번 나갈 수 있습니다. 요청마다 증가하는
//! 순번을 붙이고, 마지막으로 보낸 요청이 아닌 응답은 버립니다.
//!
//! 상태는 `parking_lot::Mutex` 안에 있고 `.await` 너머로 잠금을 들고 있지 않습니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;

use super::{ClientError, ResponseGenerator, SessionApi};
use crate::{
    models::{
        ActiveMode, Exercise, Persona, SessionMode, StartSessionResponse, StartStatus,
        StopSessionResponse,
    },
    services::theme::{self, ThemeBundle},
};

/// 응답 생성 실패 시 보여주는 고정 문구
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again.";

/// 대화 기록 한 건 (사용자 발화 + 생성된 응답)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEntry {
    pub user: String,
    pub ai: String,
    pub timestamp: DateTime<Utc>,
}

/// `toggle_listening` 한 번의 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// 듣기 시작함
    Started,
    /// 듣기를 멈춤
    Stopped,
    /// 요청이 실패해 상태가 그대로임
    Failed,
    /// 더 최근 요청이 있어 응답을 버림
    Superseded,
}

enum Request {
    Start(SessionMode),
    Stop,
}

#[derive(Debug, Default)]
struct ControllerState {
    active_mode: ActiveMode,
    persona: Persona,
    exercise: Option<Exercise>,
    listening: bool,
    transcript: String,
    ai_response: String,
    history: Vec<SessionEntry>,
    /// 마지막으로 보낸 시작/종료 요청의 순번
    latest_request: u64,
}

impl ControllerState {
    fn session_mode(&self) -> SessionMode {
        match (self.active_mode, self.exercise) {
            (ActiveMode::Exercise, Some(exercise)) => SessionMode::Exercise(exercise),
            // 운동 모드인데 운동이 없으면 페르소나의 기분으로 대체
            _ => SessionMode::Mood(self.persona.mood()),
        }
    }

    fn theme_name(&self) -> &'static str {
        match (self.active_mode, self.exercise) {
            (ActiveMode::Exercise, Some(exercise)) => exercise.into(),
            _ => self.persona.name(),
        }
    }
}

struct Inner {
    api: Arc<dyn SessionApi>,
    responder: Arc<dyn ResponseGenerator>,
    state: Mutex<ControllerState>,
    listening_tx: watch::Sender<bool>,
}

/// 세션 생명주기와 페르소나/운동 선택을 소유하는 컨트롤러
///
/// `Clone`은 같은 상태를 공유하는 핸들을 하나 더 만듭니다.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

impl SessionController {
    /// 기본 페르소나(Lena Shore), 기분 모드, Idle 상태로 시작합니다.
    pub fn new(api: Arc<dyn SessionApi>, responder: Arc<dyn ResponseGenerator>) -> Self {
        let (listening_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                api,
                responder,
                state: Mutex::new(ControllerState::default()),
                listening_tx,
            }),
        }
    }

    /// 듣기 상태 변화를 구독합니다. 대화 폴러가 이 값으로 폴링을 켜고 끕니다.
    pub fn subscribe_listening(&self) -> watch::Receiver<bool> {
        self.inner.listening_tx.subscribe()
    }

    pub fn is_listening(&self) -> bool {
        self.inner.state.lock().listening
    }

    pub fn transcript(&self) -> String {
        self.inner.state.lock().transcript.clone()
    }

    pub fn ai_response(&self) -> String {
        self.inner.state.lock().ai_response.clone()
    }

    pub fn history(&self) -> Vec<SessionEntry> {
        self.inner.state.lock().history.clone()
    }

    pub fn active_mode(&self) -> ActiveMode {
        self.inner.state.lock().active_mode
    }

    pub fn persona(&self) -> Persona {
        self.inner.state.lock().persona
    }

    pub fn exercise(&self) -> Option<Exercise> {
        self.inner.state.lock().exercise
    }

    /// 다음 시작 요청에 실릴 모드
    pub fn session_mode(&self) -> SessionMode {
        self.inner.state.lock().session_mode()
    }

    /// 현재 선택에 맞는 테마
    pub fn theme(&self) -> &'static ThemeBundle {
        let state = self.inner.state.lock();
        theme::resolve(state.active_mode, state.theme_name())
    }

    /// 페르소나를 고르면 기분 모드로 바뀌고 운동 선택이 풀립니다.
    pub fn select_persona(&self, persona: Persona) {
        let mut state = self.inner.state.lock();
        state.persona = persona;
        state.active_mode = ActiveMode::Mood;
        state.exercise = None;
    }

    pub fn start_exercise(&self, exercise: Exercise) {
        let mut state = self.inner.state.lock();
        state.exercise = Some(exercise);
        state.active_mode = ActiveMode::Exercise;
        tracing::info!("Starting {} exercise", exercise);
    }

    pub fn update_transcript(&self, text: impl Into<String>) {
        self.inner.state.lock().transcript = text.into();
    }

    /// 메인 인터랙션 진입점. 듣는 중이면 세션을 멈추고, 아니면 시작합니다.
    pub async fn toggle_listening(&self) -> ToggleOutcome {
        let (seq, request) = {
            let mut state = self.inner.state.lock();
            state.latest_request += 1;
            let request = if state.listening {
                Request::Stop
            } else {
                Request::Start(state.session_mode())
            };
            (state.latest_request, request)
        };

        match request {
            Request::Start(mode) => {
                let result = self.inner.api.start_session(mode).await;
                self.finish_start(seq, mode, result)
            }
            Request::Stop => {
                let result = self.inner.api.stop_session().await;
                self.finish_stop(seq, result).await
            }
        }
    }

    fn finish_start(
        &self,
        seq: u64,
        mode: SessionMode,
        result: Result<StartSessionResponse, ClientError>,
    ) -> ToggleOutcome {
        let mut state = self.inner.state.lock();
        if seq != state.latest_request {
            tracing::debug!("Discarding stale start response #{}", seq);
            return ToggleOutcome::Superseded;
        }

        match result {
            Ok(response) if response.status != StartStatus::Error => {
                tracing::info!("Session started ({}): {}", mode.name(), response.message);
                state.listening = true;
                state.transcript.clear();
                state.ai_response.clear();
                self.inner.listening_tx.send_replace(true);
                ToggleOutcome::Started
            }
            Ok(response) => {
                tracing::warn!("Session start rejected: {}", response.message);
                ToggleOutcome::Failed
            }
            Err(e) => {
                tracing::warn!("Failed to start session: {}", e);
                ToggleOutcome::Failed
            }
        }
    }

    async fn finish_stop(
        &self,
        seq: u64,
        result: Result<StopSessionResponse, ClientError>,
    ) -> ToggleOutcome {
        let pending = {
            let mut state = self.inner.state.lock();
            if seq != state.latest_request {
                tracing::debug!("Discarding stale stop response #{}", seq);
                return ToggleOutcome::Superseded;
            }

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Failed to stop session: {}", e);
                    return ToggleOutcome::Failed;
                }
            };
            tracing::info!("Session stopped: {:?}", response.status);
            state.listening = false;
            self.inner.listening_tx.send_replace(false);

            // 서버가 돌려준 발화가 우선이고, 없으면 마지막으로 알던 발화를 씁니다.
            if let Some(transcript) = response.transcript.filter(|t| !t.trim().is_empty()) {
                state.transcript = transcript;
            }
            if state.transcript.trim().is_empty() {
                None
            } else {
                Some((state.session_mode(), state.transcript.clone()))
            }
        };

        if let Some((mode, transcript)) = pending {
            self.generate_response(mode, &transcript).await;
        }
        ToggleOutcome::Stopped
    }

    /// 발화에 대한 응답을 생성해 기록합니다. 실패하면 고정 사과 문구를 씁니다.
    pub async fn generate_response(&self, mode: SessionMode, user_input: &str) -> String {
        let reply = match self.inner.responder.generate(mode, user_input).await {
            Ok(reply) => {
                let mut state = self.inner.state.lock();
                state.history.push(SessionEntry {
                    user: user_input.to_string(),
                    ai: reply.clone(),
                    timestamp: Utc::now(),
                });
                reply
            }
            Err(e) => {
                tracing::error!("Error generating AI response: {}", e);
                FALLBACK_REPLY.to_string()
            }
        };
        self.inner.state.lock().ai_response = reply.clone();
        reply
    }
}
