//! # 저널 편집기 상태
//!
//! - `canvas`: 자유 곡선 두들 레이어
//! - `images`: 사진 업로드, 크기 맞춤, 끌어 옮기기
//! - `editor`: 위 둘과 제목/본문/꾸밈 옵션을 묶는 편집기

pub mod canvas;
pub mod editor;
pub mod images;

pub use canvas::DoodleCanvas;
pub use editor::JournalEditor;
pub use images::{fit_within, DecodedImage, ImageBoard};
