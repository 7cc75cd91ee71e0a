//! # 저널 이미지
//!
//! 업로드된 사진을 디코딩해 크기를 맞추고, 저널 위에서 끌어 옮기거나 지웁니다.
//!
//! 디코딩에 실패한 파일은 조용히 무시합니다. 화면에 에러를 띄우지 않습니다.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageReader;
use uuid::Uuid;

use crate::models::JournalImage;

pub const MAX_IMAGE_WIDTH: f64 = 300.0;
pub const MAX_IMAGE_HEIGHT: f64 = 200.0;
/// 새 이미지가 놓이는 위치
pub const DEFAULT_POSITION: (f64, f64) = (50.0, 50.0);

/// 디코딩된 이미지 (원본 크기)
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// `data:<mime>;base64,...`
    pub src: String,
    pub width: u32,
    pub height: u32,
}

/// 비율을 유지하며 300×200 안에 맞춥니다. 너비를 먼저 줄이고, 그래도 높으면 높이를 줄입니다.
pub fn fit_within(width: f64, height: f64) -> (f64, f64) {
    let (mut width, mut height) = (width, height);
    if width > MAX_IMAGE_WIDTH {
        height = height * MAX_IMAGE_WIDTH / width;
        width = MAX_IMAGE_WIDTH;
    }
    if height > MAX_IMAGE_HEIGHT {
        width = width * MAX_IMAGE_HEIGHT / height;
        height = MAX_IMAGE_HEIGHT;
    }
    (width, height)
}

/// 바이트에서 이미지 형식과 크기를 읽고 data URL을 만듭니다.
///
/// `content_type`이 `image/`로 시작하지 않거나 디코딩할 수 없으면 `None`
pub fn decode_image(content_type: &str, bytes: &[u8]) -> Option<DecodedImage> {
    if !content_type.starts_with("image/") {
        tracing::debug!("Ignoring non-image upload ({})", content_type);
        return None;
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let Some(format) = reader.format() else {
        tracing::debug!("Ignoring upload with unknown image format");
        return None;
    };
    let (width, height) = match reader.into_dimensions() {
        Ok(dimensions) => dimensions,
        Err(e) => {
            tracing::debug!("Ignoring undecodable image: {}", e);
            return None;
        }
    };

    Some(DecodedImage {
        src: format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(bytes)),
        width,
        height,
    })
}

/// 블로킹 작업 스레드에서 디코딩합니다.
pub async fn load_image(content_type: String, bytes: Vec<u8>) -> Option<DecodedImage> {
    match tokio::task::spawn_blocking(move || decode_image(&content_type, &bytes)).await {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("Image decoding task failed: {}", e);
            None
        }
    }
}

/// 저널 위의 이미지들과 끌기 상태
#[derive(Debug, Clone, Default)]
pub struct ImageBoard {
    images: Vec<JournalImage>,
    dragging: Option<String>,
}

impl ImageBoard {
    pub fn images(&self) -> &[JournalImage] {
        &self.images
    }

    pub fn get(&self, id: &str) -> Option<&JournalImage> {
        self.images.iter().find(|image| image.id == id)
    }

    /// 크기를 맞춰 기본 위치에 놓습니다.
    pub fn add(&mut self, decoded: DecodedImage) -> &JournalImage {
        let (width, height) = fit_within(decoded.width as f64, decoded.height as f64);
        let (x, y) = DEFAULT_POSITION;
        let index = self.images.len();
        self.images.push(JournalImage {
            id: format!("img-{}", Uuid::now_v7()),
            src: decoded.src,
            width,
            height,
            x,
            y,
        });
        &self.images[index]
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// 없는 ID면 무시합니다.
    pub fn begin_drag(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.dragging = Some(id.to_string());
        true
    }

    /// 끌고 있는 이미지를 (dx, dy)만큼 옮깁니다.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> bool {
        let Some(id) = self.dragging.as_deref() else {
            return false;
        };
        match self.images.iter_mut().find(|image| image.id == id) {
            Some(image) => {
                image.x += dx;
                image.y += dy;
                true
            }
            None => false,
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    pub fn delete(&mut self, id: &str) -> Option<JournalImage> {
        let index = self.images.iter().position(|image| image.id == id)?;
        if self.dragging.as_deref() == Some(id) {
            self.dragging = None;
        }
        Some(self.images.remove(index))
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.dragging = None;
    }

    pub(crate) fn take_all(&mut self) -> Vec<JournalImage> {
        self.dragging = None;
        std::mem::take(&mut self.images)
    }
}
