//! # 저널 편집기
//!
//! 제목·본문·꾸밈 옵션과 두들 캔버스, 이미지 보드를 한데 묶습니다.
//!
//! 포인터 이벤트는 이미지 끌기가 먼저 받습니다. 이미지를 끄는 동안에는 캔버스가
//! 이벤트를 보지 못하므로 이미지 끌기가 두들 획을 시작하는 일은 없습니다.

use chrono::Utc;

use super::{
    canvas::DoodleCanvas,
    images::{self, ImageBoard},
};
use crate::models::{JournalEntry, JournalFont, JournalMood, JournalStyle, Weather};

#[derive(Debug, Clone, Default)]
pub struct JournalEditor {
    pub title: String,
    pub body_text: String,
    pub style: JournalStyle,
    pub font: JournalFont,
    pub mood: JournalMood,
    pub weather: Weather,
    canvas: DoodleCanvas,
    board: ImageBoard,
    /// 이미지 끌기 중 마지막 포인터 위치
    last_pointer: Option<(f64, f64)>,
}

impl JournalEditor {
    /// `width`×`height`는 본문 영역(두들 레이어)의 픽셀 크기
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            canvas: DoodleCanvas::new(width, height),
            ..Default::default()
        }
    }

    pub fn canvas(&self) -> &DoodleCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut DoodleCanvas {
        &mut self.canvas
    }

    pub fn board(&self) -> &ImageBoard {
        &self.board
    }

    /// 본문 스타일별 안내 문구
    pub fn placeholder(&self) -> &'static str {
        match self.style {
            JournalStyle::Vintage => "My dearest journal...",
            JournalStyle::Modern => "Note to self...",
            JournalStyle::Nature => "Today in nature...",
            JournalStyle::Notebook => "Dear diary...",
        }
    }

    /// 업로드된 파일을 디코딩해 보드에 올리고 새 이미지 ID를 돌려줍니다.
    pub async fn add_image(&mut self, content_type: &str, bytes: Vec<u8>) -> Option<String> {
        let decoded = images::load_image(content_type.to_string(), bytes).await?;
        let image = self.board.add(decoded);
        tracing::debug!(
            "Added journal image {} ({}x{})",
            image.id,
            image.width,
            image.height
        );
        Some(image.id.clone())
    }

    pub fn delete_image(&mut self, id: &str) -> bool {
        self.board.delete(id).is_some()
    }

    /// 이미지 위에서 포인터를 누름
    pub fn begin_image_drag(&mut self, id: &str, x: f64, y: f64) -> bool {
        if !self.board.begin_drag(id) {
            return false;
        }
        self.last_pointer = Some((x, y));
        true
    }

    /// 본문 영역에서 포인터를 누름. 이미지를 끄는 중이면 캔버스로 가지 않습니다.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        if self.board.is_dragging() {
            return false;
        }
        self.canvas.pointer_down(x, y)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if self.board.is_dragging() {
            let (last_x, last_y) = self.last_pointer.unwrap_or((x, y));
            self.last_pointer = Some((x, y));
            return self.board.drag_by(x - last_x, y - last_y);
        }
        self.canvas.pointer_move(x, y)
    }

    pub fn pointer_up(&mut self) {
        if self.board.is_dragging() {
            self.board.end_drag();
            self.last_pointer = None;
            return;
        }
        self.canvas.pointer_up();
    }

    /// 현재 내용을 스냅샷으로 만들고 편집기를 비웁니다.
    ///
    /// 꾸밈 옵션(스타일·글꼴·기분·날씨)과 캔버스 크기·펜 설정은 유지됩니다.
    pub fn save(&mut self) -> JournalEntry {
        let entry = JournalEntry {
            title: std::mem::take(&mut self.title),
            body_text: std::mem::take(&mut self.body_text),
            images: self.board.take_all(),
            doodle_paths: self.canvas.paths().to_vec(),
            style: self.style,
            font: self.font,
            mood: self.mood,
            weather: self.weather,
            saved_at: Utc::now(),
        };
        self.canvas.clear();
        self.last_pointer = None;

        tracing::info!(
            "Saving journal: {:?} ({} image(s), {} doodle path(s))",
            entry.title,
            entry.images.len(),
            entry.doodle_paths.len()
        );
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::images::tests::png;

    #[tokio::test]
    async fn dragging_an_image_never_starts_a_doodle() {
        let mut editor = JournalEditor::new(600.0, 400.0);
        editor.canvas_mut().enter_doodle_mode();
        let id = editor.add_image("image/png", png(600, 400)).await.unwrap();

        assert!(editor.begin_image_drag(&id, 60.0, 60.0));
        assert!(!editor.pointer_down(60.0, 60.0));
        editor.pointer_move(70.0, 80.0);
        editor.pointer_move(75.0, 80.0);
        editor.pointer_up();

        let image = editor.board().get(&id).unwrap();
        assert_eq!((image.x, image.y), (65.0, 70.0));
        assert_eq!((image.width, image.height), (300.0, 200.0));
        assert!(editor.canvas().paths().is_empty());

        // 끌기가 끝나면 다시 캔버스가 포인터를 받습니다.
        assert!(editor.pointer_down(10.0, 10.0));
        editor.pointer_move(20.0, 20.0);
        editor.pointer_up();
        assert_eq!(editor.canvas().paths().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_upload_adds_nothing() {
        let mut editor = JournalEditor::new(600.0, 400.0);
        assert!(editor.add_image("image/jpeg", vec![0, 1, 2, 3]).await.is_none());
        assert!(editor.board().images().is_empty());
    }

    #[tokio::test]
    async fn save_snapshots_everything_and_resets_content() {
        let mut editor = JournalEditor::new(600.0, 400.0);
        editor.title = "Evening".into();
        editor.body_text = "Felt calmer after the walk.".into();
        editor.style = JournalStyle::Nature;
        editor.mood = JournalMood::Happy;
        editor.weather = Weather::Rainy;
        editor.add_image("image/png", png(200, 100)).await.unwrap();
        editor.canvas_mut().enter_doodle_mode();
        editor.pointer_down(0.0, 0.0);
        editor.pointer_move(60.0, 40.0);
        editor.pointer_up();

        let entry = editor.save();
        assert_eq!(entry.title, "Evening");
        assert_eq!(entry.images.len(), 1);
        assert_eq!((entry.images[0].width, entry.images[0].height), (200.0, 100.0));
        assert_eq!(entry.doodle_paths.len(), 1);
        assert_eq!(entry.style, JournalStyle::Nature);
        assert_eq!(entry.weather, Weather::Rainy);

        assert!(editor.title.is_empty());
        assert!(editor.body_text.is_empty());
        assert!(editor.board().images().is_empty());
        assert!(editor.canvas().paths().is_empty());
        assert_eq!(editor.placeholder(), "Today in nature...");
    }
}
