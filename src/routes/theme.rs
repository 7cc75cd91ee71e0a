//! # 테마 조회 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/theme?type=mood&name=Isla%20Moon | 페르소나 테마 + 소개 카드 |
//! | GET | /api/theme?type=exercise&name=Breathing | 운동 테마 |
//!
//! 모르는 이름이어도 실패하지 않고 기본 페르소나 테마를 돌려줍니다.

use std::str::FromStr;

use axum::{extract::Query, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    models::{ActiveMode, Persona},
    services::theme,
};

#[derive(Debug, Deserialize)]
pub struct ThemeQuery {
    /// 생략하면 기분(페르소나) 모드로 봅니다.
    #[serde(rename = "type", default)]
    pub kind: ActiveMode,
    #[serde(default)]
    pub name: String,
}

/// `GET /api/theme` → `{ "theme": {...}, "profile": {...} | null }`
///
/// `profile`은 기분 모드에서 알려진 페르소나일 때만 채워집니다.
pub async fn get_theme(Query(query): Query<ThemeQuery>) -> Json<Value> {
    let bundle = theme::resolve(query.kind, &query.name);
    let profile = match query.kind {
        ActiveMode::Mood => Persona::from_str(&query.name)
            .ok()
            .map(theme::persona_profile),
        ActiveMode::Exercise => None,
    };

    Json(json!({
        "theme": bundle,
        "profile": profile,
    }))
}
