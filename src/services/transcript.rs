//! # 대화 로그 파서
//!
//! 외부 세션 프로세스가 쓰는 로그는 다음 네 가지 접두사 형식 중 하나입니다:
//!
//! | 접두사 | 발화자 |
//! |--------|--------|
//! | `You:` | You |
//! | `SoulSpeak:` | SoulSpeak |
//! | `USER:` | You |
//! | `ASSISTANT:` | SoulSpeak |
//!
//! 접두사가 없는 줄은 직전 어시스턴트 발화의 연속으로 봅니다.
//! 이 모듈의 함수들은 모두 순수 함수라서 같은 로그에 대해 항상 같은 결과를 냅니다.

use crate::models::{Message, Speaker};

/// 인식하는 접두사 목록. 앞에서부터 순서대로 비교합니다.
const PREFIXES: [(&str, Speaker); 4] = [
    ("You:", Speaker::You),
    ("SoulSpeak:", Speaker::SoulSpeak),
    ("USER:", Speaker::You),
    ("ASSISTANT:", Speaker::SoulSpeak),
];

/// 접두사가 붙은 줄만 해석합니다. 접두사가 없으면 `None`
pub fn parse_tagged(line: &str) -> Option<Message> {
    PREFIXES.iter().find_map(|(prefix, speaker)| {
        line.strip_prefix(prefix)
            .map(|rest| Message::new(*speaker, rest.trim()))
    })
}

/// 로그 한 줄을 메시지로 정규화합니다. 어떤 줄도 거부하지 않습니다.
pub fn parse_line(line: &str) -> Message {
    parse_tagged(line).unwrap_or_else(|| Message::new(Speaker::SoulSpeak, line.trim()))
}

/// 줄바꿈으로 나눈 뒤 공백뿐인 줄을 버립니다.
///
/// `\r\n` 줄바꿈도 `lines()`가 처리합니다.
pub fn transcript_lines(log: &str) -> Vec<&str> {
    log.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// 로그 전체를 메시지 목록으로 변환합니다.
pub fn parse_messages(log: &str) -> Vec<Message> {
    transcript_lines(log).into_iter().map(parse_line).collect()
}
