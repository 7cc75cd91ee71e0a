//! # 스트레스볼
//!
//! 누르고 끌어서 쥐어짜는 공. 충분히 세게 쥐었다 놓으면 스트레스 수치가 내려갑니다.
//!
//! ```text
//! press ──▶ drag* ──▶ release
//! (0.1)   (0.1 + 거리/200, 최대 0.6)   (0.2 초과면 한 번으로 셈)
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use strum::Display;

pub const CALMING_MESSAGES: [&str; 10] = [
    "Let it out...",
    "You're doing great!",
    "Take a deep breath...",
    "Feel the tension release...",
    "One squeeze at a time...",
    "That's it, nice and easy...",
    "Breathe in... breathe out...",
    "You've got this!",
    "Release the stress...",
    "Feel your shoulders relax...",
];

const PRESS_INTENSITY: f64 = 0.1;
const MAX_INTENSITY: f64 = 0.6;
/// 이 값을 넘겨야 한 번 쥔 것으로 칩니다.
const COUNT_THRESHOLD: f64 = 0.2;
const INITIAL_STRESS: u32 = 100;

/// 스트레스 수치 구간 (화면 색상)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StressBand {
    High,
    Elevated,
    Moderate,
    Low,
}

impl StressBand {
    pub fn for_level(level: u32) -> Self {
        match level {
            76.. => StressBand::High,
            51..=75 => StressBand::Elevated,
            26..=50 => StressBand::Moderate,
            _ => StressBand::Low,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StressBall {
    squeezing: bool,
    intensity: f64,
    origin: (f64, f64),
    squeeze_count: u32,
    stress_level: u32,
    message: &'static str,
    rng: StdRng,
}

impl Default for StressBall {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl StressBall {
    pub fn new() -> Self {
        Self::default()
    }

    /// 격려 문구 선택을 재현할 수 있도록 시드를 고정합니다.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let message = pick_message(&mut rng);
        Self {
            squeezing: false,
            intensity: 0.0,
            origin: (0.0, 0.0),
            squeeze_count: 0,
            stress_level: INITIAL_STRESS,
            message,
            rng,
        }
    }

    pub fn is_squeezing(&self) -> bool {
        self.squeezing
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn squeeze_count(&self) -> u32 {
        self.squeeze_count
    }

    /// 0~100
    pub fn stress_level(&self) -> u32 {
        self.stress_level
    }

    pub fn band(&self) -> StressBand {
        StressBand::for_level(self.stress_level)
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// 공의 표시 배율. 세게 쥘수록 작아집니다.
    pub fn scale(&self) -> f64 {
        1.0 - self.intensity * 0.3
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.squeezing = true;
        self.origin = (x, y);
        self.intensity = PRESS_INTENSITY;
    }

    pub fn drag(&mut self, x: f64, y: f64) {
        if !self.squeezing {
            return;
        }
        let distance = (x - self.origin.0).hypot(y - self.origin.1);
        self.intensity = MAX_INTENSITY.min(PRESS_INTENSITY + distance / 200.0);
    }

    /// 놓기. 한 번으로 셌으면 `true`
    pub fn release(&mut self) -> bool {
        if !self.squeezing {
            return false;
        }
        let counted = self.intensity > COUNT_THRESHOLD;
        if counted {
            self.squeeze_count += 1;
            let reduction = (self.intensity * 20.0).floor() as u32;
            self.stress_level = self.stress_level.saturating_sub(reduction);
            self.message = pick_message(&mut self.rng);
            tracing::debug!(
                "Squeeze #{} reduced stress by {} to {}",
                self.squeeze_count,
                reduction,
                self.stress_level
            );
        }
        self.squeezing = false;
        self.intensity = 0.0;
        counted
    }
}

fn pick_message(rng: &mut StdRng) -> &'static str {
    CALMING_MESSAGES
        .choose(rng)
        .copied()
        .unwrap_or(CALMING_MESSAGES[0])
}
