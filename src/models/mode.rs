//! # 페르소나 · 기분 · 운동 모드 정의
//!
//! 세션을 어떤 "모드"로 시작할지 결정하는 닫힌(closed) 어휘들입니다.
//!
//! - `Persona`: 사용자가 고르는 상담사 프로필 (예: "Isla Moon")
//! - `Mood`: 페르소나에 대응하는 대화 톤 (예: Isla Moon → Sleep)
//! - `Exercise`: 호흡, 명상 등 가이드 활동
//! - `SessionMode`: 외부 세션 프로세스에 실제로 전달되는 값 (기분 또는 운동)
//!
//! `strum` derive 매크로로 enum ↔ 표시 이름 문자열 변환을 자동 생성합니다.
//! 예: `Persona::from_str("Isla Moon")` → `Ok(Persona::IslaMoon)`

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// 상담사 페르소나
///
/// 표시 이름에 공백이 있으므로 strum/serde 양쪽에 이름을 직접 지정합니다.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Persona {
    /// 기본 페르소나. 알 수 없는 이름은 모두 여기로 떨어집니다.
    #[default]
    #[strum(serialize = "Lena Shore")]
    #[serde(rename = "Lena Shore")]
    LenaShore,
    #[strum(serialize = "Theo Hart")]
    #[serde(rename = "Theo Hart")]
    TheoHart,
    #[strum(serialize = "Evelyn Sage")]
    #[serde(rename = "Evelyn Sage")]
    EvelynSage,
    #[strum(serialize = "Sam Rivers")]
    #[serde(rename = "Sam Rivers")]
    SamRivers,
    #[strum(serialize = "Isla Moon")]
    #[serde(rename = "Isla Moon")]
    IslaMoon,
}

impl Persona {
    /// 페르소나가 세션 프로세스에 전달할 기분(mood) 값
    pub fn mood(self) -> Mood {
        match self {
            Persona::LenaShore => Mood::Calm,
            Persona::TheoHart => Mood::Motivation,
            Persona::EvelynSage => Mood::Reflection,
            Persona::SamRivers => Mood::Crisis,
            Persona::IslaMoon => Mood::Sleep,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// 대화 톤. 세션 시작 요청의 `mode` 파라미터로 전송됩니다.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Mood {
    Calm,
    Motivation,
    Reflection,
    Crisis,
    Sleep,
}

/// 가이드 운동. 활성화되어 있으면 페르소나 테마 대신 운동 테마가 쓰입니다.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Exercise {
    Breathing,
    Meditation,
    Gratitude,
    Visualization,
    Grounding,
    Journalling,
}

/// 현재 어떤 축이 테마와 세션 모드를 결정하는지
///
/// 쿼리 스트링의 `type=mood` / `type=exercise`와 같은 철자를 씁니다.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActiveMode {
    #[default]
    Mood,
    Exercise,
}

/// 외부 세션 프로세스에 전달되는 범주형 모드
///
/// 세션 시작 요청은 `type=<mood|exercise>&mode=<이름>` 형태로 인코딩됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Mood(Mood),
    Exercise(Exercise),
}

impl SessionMode {
    pub fn kind(self) -> ActiveMode {
        match self {
            SessionMode::Mood(_) => ActiveMode::Mood,
            SessionMode::Exercise(_) => ActiveMode::Exercise,
        }
    }

    /// 프로세스 인자와 쿼리 파라미터로 쓰이는 이름 (예: "Sleep", "Breathing")
    pub fn name(self) -> &'static str {
        match self {
            SessionMode::Mood(mood) => mood.into(),
            SessionMode::Exercise(exercise) => exercise.into(),
        }
    }

    /// HTTP 쿼리 파라미터 쌍: `[("type", "mood"), ("mode", "Sleep")]`
    pub fn query_pairs(self) -> [(&'static str, String); 2] {
        [
            ("type", self.kind().to_string()),
            ("mode", self.name().to_string()),
        ]
    }

    /// `type`과 `mode` 문자열로부터 모드를 해석합니다.
    ///
    /// `type`이 없으면 기분 → 운동 순서로 이름을 맞춰봅니다.
    /// 알 수 없는 이름이면 `None`입니다.
    pub fn parse(kind: Option<&str>, name: &str) -> Option<Self> {
        match kind {
            Some("exercise") => name.parse().ok().map(SessionMode::Exercise),
            Some("mood") => name.parse().ok().map(SessionMode::Mood),
            Some(_) => None,
            None => name
                .parse()
                .ok()
                .map(SessionMode::Mood)
                .or_else(|| name.parse().ok().map(SessionMode::Exercise)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn persona_names_map_to_moods() {
        let isla = Persona::from_str("Isla Moon").unwrap();
        assert_eq!(isla, Persona::IslaMoon);
        assert_eq!(isla.mood(), Mood::Sleep);
        assert_eq!(Persona::default().mood(), Mood::Calm);
        assert_eq!(Persona::TheoHart.name(), "Theo Hart");
    }

    #[test]
    fn session_mode_encodes_query_pairs() {
        let pairs = SessionMode::Mood(Persona::IslaMoon.mood()).query_pairs();
        assert_eq!(pairs[0], ("type", "mood".to_string()));
        assert_eq!(pairs[1], ("mode", "Sleep".to_string()));

        let pairs = SessionMode::Exercise(Exercise::Breathing).query_pairs();
        assert_eq!(pairs[0].1, "exercise");
        assert_eq!(pairs[1].1, "Breathing");
    }

    #[test]
    fn parse_respects_kind_and_rejects_unknown_names() {
        assert_eq!(
            SessionMode::parse(Some("exercise"), "Grounding"),
            Some(SessionMode::Exercise(Exercise::Grounding))
        );
        assert_eq!(SessionMode::parse(Some("mood"), "Grounding"), None);
        assert_eq!(
            SessionMode::parse(None, "Crisis"),
            Some(SessionMode::Mood(Mood::Crisis))
        );
        assert_eq!(
            SessionMode::parse(None, "Meditation"),
            Some(SessionMode::Exercise(Exercise::Meditation))
        );
        assert_eq!(SessionMode::parse(None, "Dancing"), None);
        assert_eq!(SessionMode::parse(Some("ritual"), "Calm"), None);
    }
}
