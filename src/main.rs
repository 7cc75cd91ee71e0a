//! # SoulSpeak 세션 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩과 세션 프로세스 관리자 생성
//! 4. API 라우터 설정
//! 5. HTTP 서버 시작, Ctrl+C를 받으면 실행 중인 세션을 정리하고 종료

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use soulspeak::{
    config::Config,
    routes::{self, AppState},
    services::{SessionCommand, SessionManager},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // EnvFilter: RUST_LOG 환경변수로 로그 레벨을 제어합니다.
    // 환경변수가 없으면 soulspeak, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soulspeak=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting SoulSpeak server on {}:{}", config.host, config.port);
    tracing::info!(
        "Session process: {} {} (conversation log: {})",
        config.session_program,
        config.session_script,
        config.conversation_log_path
    );

    // 세션 프로세스는 `<program> <script> <mode>` 형태로 실행됩니다.
    let sessions = SessionManager::new(
        SessionCommand::new(&config.session_program, [&config.session_script]),
        &config.conversation_log_path,
    );

    // ── 4단계: API 라우터 설정 ──
    // AppState에는 SessionManager 핸들이 들어가고, clone해도 같은 프로세스를 가리킵니다.
    let app = routes::router(AppState {
        sessions: sessions.clone(),
    });

    // ── 5단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // with_graceful_shutdown: 시그널을 받으면 새 연결을 받지 않고 진행 중인 요청을 마무리합니다.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 서버가 내려가기 전에 자식 프로세스를 정리합니다.
    match sessions.stop().await {
        Ok(outcome) => tracing::info!("Session on shutdown: {:?}", outcome),
        Err(e) => tracing::error!("Failed to stop session on shutdown: {}", e),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // 신호를 받을 수 없으면 종료하지 않고 계속 서비스합니다.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
