//! # 저널 데이터 모델
//!
//! 저널 편집기가 다루는 값 타입들입니다.
//!
//! - `DoodlePath`: 한 번의 자유 곡선 획 (정규화 좌표의 점 목록)
//! - `JournalImage`: 업로드된 사진 한 장과 그 위치
//! - `JournalEntry`: 저장 시점의 스냅샷 (독립적인 생명주기 없음)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// 2차원 좌표
///
/// 두들 경로에서는 그리기 영역 크기에 대한 비율(0.0~1.0)로 저장되고,
/// 렌더링할 때만 픽셀로 변환됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 커밋된 두들 획 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoodlePath {
    /// 경로마다 고유한 ID ("path-<uuid>")
    pub id: String,
    /// 정규화 좌표. 커밋된 경로는 항상 2개 이상입니다.
    pub points: Vec<Point>,
    /// CSS 색상 문자열 (예: "#000000")
    pub color: String,
    /// 선 굵기(픽셀)
    pub width: f64,
}

/// 저널에 올린 이미지
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalImage {
    pub id: String,
    /// `data:<mime>;base64,...` 형태로 임베드된 원본
    pub src: String,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

/// 저널 용지 스타일
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JournalStyle {
    #[default]
    Notebook,
    Modern,
    Vintage,
    Nature,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JournalFont {
    #[default]
    Handwritten,
    Typewriter,
    Elegant,
    Modern,
}

/// 저널 작성 시점의 기분 스티커
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JournalMood {
    Happy,
    Sad,
    #[default]
    Neutral,
    Excited,
    Tired,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Weather {
    #[default]
    Sunny,
    Rainy,
    Cloudy,
    Snowy,
}

/// 저장 시점에 조립되는 저널 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub title: String,
    pub body_text: String,
    pub images: Vec<JournalImage>,
    pub doodle_paths: Vec<DoodlePath>,
    pub style: JournalStyle,
    pub font: JournalFont,
    pub mood: JournalMood,
    pub weather: Weather,
    pub saved_at: DateTime<Utc>,
}
