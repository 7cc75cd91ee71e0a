//! # 두들 캔버스
//!
//! 저널 본문 위에 겹쳐지는 자유 곡선 레이어입니다.
//!
//! 점은 그리기 영역 크기에 대한 비율(0.0~1.0)로 저장합니다. 영역 크기가 바뀌어도
//! 저장된 경로는 건드리지 않고, `render_svg`에서만 현재 크기로 확대합니다.
//!
//! ## 획 하나의 생명주기
//! ```text
//! pointer_down ──▶ pointer_move* ──▶ pointer_up
//!   (점 1개)        (영역 안의 점만)    (점이 2개 이상이면 커밋, 항상 초기화)
//! ```

use std::fmt::Write as _;

use uuid::Uuid;

use crate::models::{DoodlePath, Point};

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_WIDTH: f64 = 2.0;
pub const MIN_WIDTH: f64 = 1.0;
pub const MAX_WIDTH: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct DoodleCanvas {
    doodle_mode: bool,
    width: f64,
    height: f64,
    paths: Vec<DoodlePath>,
    /// 그리는 중인 획 (정규화 좌표)
    current: Option<Vec<Point>>,
    color: String,
    stroke_width: f64,
}

impl Default for DoodleCanvas {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl DoodleCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            doodle_mode: false,
            width,
            height,
            paths: Vec::new(),
            current: None,
            color: DEFAULT_COLOR.to_string(),
            stroke_width: DEFAULT_WIDTH,
        }
    }

    pub fn is_doodle_mode(&self) -> bool {
        self.doodle_mode
    }

    pub fn enter_doodle_mode(&mut self) {
        self.doodle_mode = true;
    }

    /// 두들 모드를 끄면 그리던 획은 버립니다.
    pub fn exit_doodle_mode(&mut self) {
        self.doodle_mode = false;
        self.current = None;
    }

    pub fn toggle_doodle_mode(&mut self) -> bool {
        if self.doodle_mode {
            self.exit_doodle_mode();
        } else {
            self.enter_doodle_mode();
        }
        self.doodle_mode
    }

    /// 그리기 영역의 현재 픽셀 크기
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// 영역 크기 변경. 저장된 경로는 정규화 좌표라 그대로 둡니다.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    }

    pub fn paths(&self) -> &[DoodlePath] {
        &self.paths
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// 경계 포함 `[0, width] × [0, height]`
    fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }

    fn normalize(&self, x: f64, y: f64) -> Point {
        Point::new(x / self.width, y / self.height)
    }

    /// 새 획을 시작합니다. 이전에 그리던 획이 있으면 버립니다.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        if !self.doodle_mode || !self.has_area() || !self.contains(x, y) {
            return false;
        }
        self.current = Some(vec![self.normalize(x, y)]);
        true
    }

    /// 영역 밖의 점은 버립니다.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.doodle_mode || !self.has_area() || !self.contains(x, y) {
            return false;
        }
        let point = self.normalize(x, y);
        match self.current.as_mut() {
            Some(points) => {
                points.push(point);
                true
            }
            None => false,
        }
    }

    /// 점이 2개 이상인 획만 커밋합니다. 커밋 여부와 관계없이 그리기 상태는 초기화됩니다.
    pub fn pointer_up(&mut self) -> Option<&DoodlePath> {
        let points = self.current.take()?;
        if points.len() < 2 {
            return None;
        }
        self.paths.push(DoodlePath {
            id: format!("path-{}", Uuid::now_v7()),
            points,
            color: self.color.clone(),
            width: self.stroke_width,
        });
        self.paths.last()
    }

    pub fn undo(&mut self) -> Option<DoodlePath> {
        self.paths.pop()
    }

    /// 커밋된 경로만 지웁니다. 그리던 획은 `pointer_up`에서 그대로 커밋됩니다.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// 커밋된 경로와 그리는 중인 획을 현재 크기의 SVG로 그립니다.
    pub fn render_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" preserveAspectRatio="none">"#,
            w = self.width,
            h = self.height,
        );
        for path in &self.paths {
            self.write_polyline(&mut svg, &path.points, &path.color, path.width);
        }
        if let Some(points) = self.current.as_ref().filter(|points| points.len() > 1) {
            self.write_polyline(&mut svg, points, &self.color, self.stroke_width);
        }
        svg.push_str("</svg>");
        svg
    }

    fn write_polyline(&self, svg: &mut String, points: &[Point], color: &str, width: f64) {
        let points = points
            .iter()
            .map(|p| format!("{},{}", p.x * self.width, p.y * self.height))
            .collect::<Vec<_>>()
            .join(" ");
        // String에 대한 write!는 실패하지 않습니다.
        let _ = write!(
            svg,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            points,
            escape_attr(color),
            width
        );
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> DoodleCanvas {
        let mut canvas = DoodleCanvas::new(600.0, 400.0);
        canvas.enter_doodle_mode();
        canvas
    }

    #[test]
    fn tap_without_move_commits_nothing() {
        let mut canvas = canvas();
        assert!(canvas.pointer_down(10.0, 10.0));
        assert!(canvas.pointer_up().is_none());
        assert!(canvas.paths().is_empty());
        assert!(!canvas.is_drawing());
    }

    #[test]
    fn down_move_up_commits_two_points() {
        let mut canvas = canvas();
        canvas.pointer_down(0.0, 0.0);
        canvas.pointer_move(300.0, 200.0);
        let path = canvas.pointer_up().unwrap().clone();

        assert_eq!(path.points, vec![Point::new(0.0, 0.0), Point::new(0.5, 0.5)]);
        assert!(path.id.starts_with("path-"));
        assert_eq!(path.color, DEFAULT_COLOR);
        assert_eq!(path.width, DEFAULT_WIDTH);
        assert_eq!(canvas.paths().len(), 1);
    }

    #[test]
    fn second_pointer_down_discards_the_unfinished_stroke() {
        let mut canvas = canvas();
        canvas.pointer_down(10.0, 10.0);
        canvas.pointer_move(20.0, 20.0);
        canvas.pointer_down(100.0, 100.0);
        canvas.pointer_move(200.0, 200.0);
        canvas.pointer_up();

        assert_eq!(canvas.paths().len(), 1);
        assert_eq!(
            canvas.paths()[0].points,
            vec![Point::new(100.0 / 600.0, 0.25), Point::new(200.0 / 600.0, 0.5)]
        );
    }

    #[test]
    fn clear_keeps_the_stroke_in_progress() {
        let mut canvas = canvas();
        canvas.pointer_down(0.0, 0.0);
        canvas.pointer_move(60.0, 40.0);
        canvas.pointer_up();

        canvas.pointer_down(10.0, 10.0);
        canvas.pointer_move(30.0, 30.0);
        canvas.clear();
        assert!(canvas.paths().is_empty());
        assert!(canvas.is_drawing());

        assert!(canvas.pointer_up().is_some());
        assert_eq!(canvas.paths().len(), 1);
    }

    #[test]
    fn out_of_bounds_moves_are_dropped() {
        let mut canvas = canvas();
        canvas.pointer_down(10.0, 10.0);
        assert!(!canvas.pointer_move(601.0, 10.0));
        assert!(!canvas.pointer_move(10.0, -0.5));
        // 경계는 포함
        assert!(canvas.pointer_move(600.0, 400.0));
        assert_eq!(canvas.pointer_up().unwrap().points.len(), 2);
    }

    #[test]
    fn undo_n_times_empties_and_clear_resets_at_once() {
        let mut canvas = canvas();
        for i in 0..3 {
            canvas.pointer_down(i as f64, 0.0);
            canvas.pointer_move(i as f64, 50.0);
            canvas.pointer_up();
        }
        assert_eq!(canvas.paths().len(), 3);
        for _ in 0..3 {
            assert!(canvas.undo().is_some());
        }
        assert!(canvas.paths().is_empty());
        assert!(canvas.undo().is_none());

        for _ in 0..4 {
            canvas.pointer_down(1.0, 1.0);
            canvas.pointer_move(2.0, 2.0);
            canvas.pointer_up();
        }
        canvas.clear();
        assert!(canvas.paths().is_empty());
    }

    #[test]
    fn ignores_pointer_outside_doodle_mode_or_without_area() {
        let mut canvas = DoodleCanvas::new(600.0, 400.0);
        assert!(!canvas.pointer_down(10.0, 10.0));

        let mut empty = DoodleCanvas::default();
        empty.enter_doodle_mode();
        assert!(!empty.pointer_down(0.0, 0.0));

        let mut canvas = self::canvas();
        canvas.pointer_down(10.0, 10.0);
        canvas.exit_doodle_mode();
        assert!(!canvas.is_drawing());
        assert!(canvas.pointer_up().is_none());
    }

    #[test]
    fn stroke_width_is_clamped() {
        let mut canvas = canvas();
        canvas.set_stroke_width(12.0);
        assert_eq!(canvas.stroke_width(), MAX_WIDTH);
        canvas.set_stroke_width(0.0);
        assert_eq!(canvas.stroke_width(), MIN_WIDTH);
    }

    #[test]
    fn resize_rescales_rendering_without_touching_paths() {
        let mut canvas = canvas();
        canvas.set_color("#ff0000");
        canvas.pointer_down(0.0, 0.0);
        canvas.pointer_move(300.0, 200.0);
        canvas.pointer_up();
        let stored = canvas.paths().to_vec();

        assert!(canvas.render_svg().contains(r#"points="0,0 300,200""#));
        canvas.resize(1200.0, 800.0);
        assert_eq!(canvas.paths(), stored.as_slice());

        let svg = canvas.render_svg();
        assert!(svg.contains(r#"viewBox="0 0 1200 800""#));
        assert!(svg.contains(r#"points="0,0 600,400""#));
        assert!(svg.contains(r##"stroke="#ff0000""##));
    }
}
