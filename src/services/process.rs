//! # 외부 세션 프로세스 관리자
//!
//! 음성 캡처·대화를 담당하는 외부 스크립트(Python)를 자식 프로세스로 띄우고 멈춥니다.
//! 전역 변수 대신 `SessionManager` 하나가 자식 프로세스 핸들을 **최대 한 개** 소유하며,
//! `AppState`를 통해 라우트 핸들러에 주입됩니다.
//!
//! ## 생명주기
//! ```text
//! start(mode) ──▶ [실행 중] ──▶ stop() ──▶ [없음]
//!      │ 이미 실행 중이면 AlreadyRunning
//! ```
//!
//! ## 출력 중계(relay)
//! - stdout의 각 줄은 info 로그로 남기고, 대화 접두사(`USER:` 등)가 붙은 줄은
//!   대화 로그 파일에 추가합니다. 사용자 발화는 종료 시 transcript로 돌려줍니다.
//! - stderr의 각 줄은 warn 로그로 남깁니다.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    sync::Arc,
    time::Duration,
};

use tokio::{
    fs::OpenOptions,
    io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader},
    process::{Child, Command},
    sync::Mutex,
    task::JoinHandle,
};

use crate::{
    error::AppError,
    models::{SessionMode, Speaker},
    services::transcript,
};

/// 프로세스 종료 후 출력 중계 태스크가 남은 줄을 비울 때까지 기다리는 최대 시간
const RELAY_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// 자식 프로세스를 띄우는 명령 (`<program> <args...> [mode]`)
#[derive(Debug, Clone)]
pub struct SessionCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SessionCommand {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// 실행 중이던 프로세스를 멈춤. 캡처된 사용자 발화가 없으면 `transcript`는 `None`
    Stopped { transcript: Option<String> },
    /// 멈출 프로세스가 없음. 스스로 종료한 세션의 발화는 아직 돌려받지 않았다면 여기 담깁니다.
    NotRunning { transcript: Option<String> },
}

/// 실행 중인 세션 하나
struct RunningSession {
    child: Child,
    relays: Vec<JoinHandle<()>>,
    /// 이번 세션에서 캡처된 사용자 발화
    utterances: Arc<Mutex<Vec<String>>>,
}

/// 자식 프로세스 핸들의 유일한 소유자
///
/// `Clone`은 내부 `Arc`만 복제하므로 모든 핸들러가 같은 프로세스를 봅니다.
#[derive(Clone)]
pub struct SessionManager {
    command: SessionCommand,
    log_path: PathBuf,
    running: Arc<Mutex<Option<RunningSession>>>,
}

impl SessionManager {
    pub fn new(command: SessionCommand, log_path: impl Into<PathBuf>) -> Self {
        Self {
            command,
            log_path: log_path.into(),
            running: Arc::new(Mutex::new(None)),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// 프로세스가 있고 아직 종료되지 않았는지 확인합니다.
    pub async fn is_running(&self) -> bool {
        let mut running = self.running.lock().await;
        match running.as_mut() {
            Some(session) => matches!(session.child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// 세션 프로세스를 시작합니다. 이미 실행 중이면 아무것도 하지 않습니다.
    pub async fn start(&self, mode: Option<SessionMode>) -> Result<StartOutcome, AppError> {
        let mut running = self.running.lock().await;

        if let Some(session) = running.as_mut() {
            if matches!(session.child.try_wait(), Ok(None)) {
                return Ok(StartOutcome::AlreadyRunning);
            }
        }
        // 이전 프로세스가 스스로 종료했다면 중계 태스크만 정리합니다.
        if let Some(previous) = running.take() {
            previous.relays.iter().for_each(JoinHandle::abort);
        }

        let mut command = Command::new(&self.command.program);
        command.args(&self.command.args);
        if let Some(mode) = mode {
            command.arg(mode.name());
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // 서버가 비정상 종료해도 고아 프로세스가 남지 않게 합니다.
            .kill_on_drop(true);

        tracing::info!(
            "Starting session process {} with mode {:?}",
            self.command.program,
            mode.map(SessionMode::name)
        );
        let mut child = command
            .spawn()
            .map_err(|e| AppError::Process(format!("{}: {}", self.command.program, e)))?;

        let utterances = Arc::new(Mutex::new(Vec::new()));
        let mut relays = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            relays.push(tokio::spawn(relay_stdout(
                stdout,
                self.log_path.clone(),
                utterances.clone(),
            )));
        }
        if let Some(stderr) = child.stderr.take() {
            relays.push(tokio::spawn(relay_stderr(stderr)));
        }

        *running = Some(RunningSession {
            child,
            relays,
            utterances,
        });
        Ok(StartOutcome::Started)
    }

    /// 실행 중인 세션 프로세스를 종료하고 캡처된 발화를 돌려줍니다.
    pub async fn stop(&self) -> Result<StopOutcome, AppError> {
        let mut running = self.running.lock().await;

        let Some(mut session) = running.take() else {
            return Ok(StopOutcome::NotRunning { transcript: None });
        };

        if !matches!(session.child.try_wait(), Ok(None)) {
            // 이미 스스로 종료한 프로세스: 남은 출력을 비우고 발화만 돌려줍니다.
            tracing::info!("Session process already exited");
            let transcript = session.finish().await;
            return Ok(StopOutcome::NotRunning { transcript });
        }

        tracing::info!("Stopping session process");
        session.child.kill().await?;
        let transcript = session.finish().await;
        Ok(StopOutcome::Stopped { transcript })
    }
}

impl RunningSession {
    /// 중계 태스크가 남은 줄을 비울 때까지 기다린 뒤 캡처된 발화를 합칩니다.
    async fn finish(self) -> Option<String> {
        for relay in self.relays {
            let abort = relay.abort_handle();
            if tokio::time::timeout(RELAY_DRAIN_TIMEOUT, relay).await.is_err() {
                tracing::warn!("Session output relay did not drain in time");
                abort.abort();
            }
        }

        let utterances = self.utterances.lock().await;
        if utterances.is_empty() {
            None
        } else {
            Some(utterances.join("\n"))
        }
    }
}

/// stdout 줄을 로그로 남기고, 대화 줄은 대화 로그 파일에 추가합니다.
async fn relay_stdout(
    stdout: impl AsyncRead + Unpin,
    log_path: PathBuf,
    utterances: Arc<Mutex<Vec<String>>>,
) {
    let mut lines = BufReader::new(stdout).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Failed to read session stdout: {}", e);
                break;
            }
        };
        tracing::info!("stdout: {}", line);

        let Some(message) = transcript::parse_tagged(&line) else {
            continue;
        };
        if message.speaker == Speaker::You {
            utterances.lock().await.push(message.text);
        }
        if let Err(e) = append_line(&log_path, &line).await {
            tracing::error!("Failed to append to {}: {}", log_path.display(), e);
        }
    }
}

async fn relay_stderr(stderr: impl AsyncRead + Unpin) {
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        tracing::warn!("stderr: {}", line);
    }
}

/// 대화 로그 파일 끝에 한 줄을 추가합니다. 파일과 상위 디렉토리가 없으면 만듭니다.
async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(line.trim_end().as_bytes()).await?;
    file.write_all(b"\n").await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;

    /// `sh -c <script> <mode>`: 모드 인자는 스크립트에서 `$0`이 됩니다.
    fn shell(script: &str, log_path: &Path) -> SessionManager {
        SessionManager::new(SessionCommand::new("sh", ["-c", script]), log_path)
    }

    async fn wait_for_lines(path: &Path, count: usize) -> String {
        for _ in 0..100 {
            if let Ok(content) = tokio::fs::read_to_string(path).await {
                if transcript::transcript_lines(&content).len() >= count {
                    return content;
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("log never reached {} lines", count);
    }

    #[tokio::test]
    async fn start_is_idempotent_and_stop_returns_user_utterances() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("logs/conversation_log.txt");
        let manager = shell(
            "echo \"mode=$0\"; echo 'USER: I feel anxious'; echo 'ASSISTANT: Take a breath.'; \
             echo 'USER: okay'; exec sleep 30",
            &log,
        );

        let first = manager.start(Some(SessionMode::Mood(Mood::Sleep))).await.unwrap();
        assert_eq!(first, StartOutcome::Started);
        assert!(manager.is_running().await);
        assert_eq!(manager.start(None).await.unwrap(), StartOutcome::AlreadyRunning);

        let content = wait_for_lines(&log, 3).await;
        assert_eq!(
            content,
            "USER: I feel anxious\nASSISTANT: Take a breath.\nUSER: okay\n"
        );

        let stopped = manager.stop().await.unwrap();
        assert_eq!(
            stopped,
            StopOutcome::Stopped {
                transcript: Some("I feel anxious\nokay".to_string())
            }
        );
        assert!(!manager.is_running().await);
        assert_eq!(
            manager.stop().await.unwrap(),
            StopOutcome::NotRunning { transcript: None }
        );
    }

    #[tokio::test]
    async fn stop_after_self_exit_still_returns_user_utterances() {
        let dir = tempfile::tempdir().unwrap();
        let manager = shell("echo 'USER: hello'; exit 0", &dir.path().join("log.txt"));

        manager.start(None).await.unwrap();
        for _ in 0..100 {
            if !manager.is_running().await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(!manager.is_running().await);

        assert_eq!(
            manager.stop().await.unwrap(),
            StopOutcome::NotRunning {
                transcript: Some("hello".to_string())
            }
        );
        assert_eq!(
            manager.stop().await.unwrap(),
            StopOutcome::NotRunning { transcript: None }
        );
    }

    #[tokio::test]
    async fn stop_without_user_lines_has_no_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let manager = shell("exec sleep 30", &dir.path().join("log.txt"));

        manager.start(None).await.unwrap();
        assert_eq!(
            manager.stop().await.unwrap(),
            StopOutcome::Stopped { transcript: None }
        );
    }

    #[tokio::test]
    async fn exited_process_can_be_restarted() {
        let dir = tempfile::tempdir().unwrap();
        let manager = shell("exit 0", &dir.path().join("log.txt"));

        manager.start(None).await.unwrap();
        for _ in 0..100 {
            if !manager.is_running().await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(!manager.is_running().await);
        assert_eq!(manager.start(None).await.unwrap(), StartOutcome::Started);
    }

    #[tokio::test]
    async fn spawn_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SessionManager::new(
            SessionCommand::new("/definitely/not/a/program", Vec::<String>::new()),
            dir.path().join("log.txt"),
        );
        assert!(matches!(manager.start(None).await, Err(AppError::Process(_))));
        assert!(!manager.is_running().await);
    }
}
