//! # 테마 리졸버
//!
//! 활성 모드(기분/운동)와 이름으로 화면 색상 번들을 찾는 순수 함수입니다.
//! 상태도 실패도 없습니다. 모르는 이름은 기본 페르소나(Lena Shore)의 테마로 떨어집니다.

use std::str::FromStr;

use serde::Serialize;

use crate::models::{ActiveMode, Exercise, Persona};

/// 화면 스타일링에 쓰이는 색상 토큰 묶음 (Tailwind 클래스 + 대표 RGB 색)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeBundle {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub inner: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub hover: &'static str,
    pub bg: &'static str,
    pub solid_bg: &'static str,
    pub hover_dark: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

/// 페르소나 소개 카드
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaProfile {
    pub persona: &'static str,
    pub bio: &'static str,
    pub specialty: &'static str,
    pub style: &'static str,
}

/// Tailwind 팔레트 이름 두 개(주색, 보조색)로 번들을 만듭니다.
/// 모든 테마가 같은 농도 규칙(600/500/400, 50/100/200)을 따릅니다.
macro_rules! palette {
    ($main:literal, $accent:literal, $emoji:literal, $description:literal, $color:literal) => {
        ThemeBundle {
            primary: concat!("from-", $main, "-600/30 to-", $accent, "-600/30"),
            secondary: concat!("from-", $main, "-500/20 to-", $accent, "-500/20"),
            inner: concat!("from-", $main, "-400/30 to-", $accent, "-400/30"),
            border: concat!("border-", $main, "-500"),
            text: concat!("text-", $main, "-500"),
            hover: concat!("hover:bg-", $main, "-100"),
            bg: concat!("bg-", $main, "-50"),
            solid_bg: concat!("bg-", $main, "-500"),
            hover_dark: concat!("hover:bg-", $main, "-200"),
            emoji: $emoji,
            description: $description,
            color: $color,
        }
    };
}

static LENA_SHORE: ThemeBundle = palette!("blue", "cyan", "🌊", "The Grounded Guide", "rgb(59, 130, 246)");
static THEO_HART: ThemeBundle = palette!("amber", "yellow", "⚡", "The Motivator", "rgb(245, 158, 11)");
static EVELYN_SAGE: ThemeBundle = palette!("purple", "fuchsia", "🧠", "The Reflective Listener", "rgb(168, 85, 247)");
static SAM_RIVERS: ThemeBundle = palette!("red", "rose", "❤️", "The Crisis Companion", "rgb(239, 68, 68)");
// Isla Moon만 보조색이 한 단계 짙습니다 (amber-700/600/500).
static ISLA_MOON: ThemeBundle = ThemeBundle {
    primary: "from-yellow-600/30 to-amber-700/30",
    secondary: "from-yellow-500/20 to-amber-600/20",
    inner: "from-yellow-400/30 to-amber-500/30",
    border: "border-yellow-500",
    text: "text-yellow-500",
    hover: "hover:bg-yellow-100",
    bg: "bg-yellow-50",
    solid_bg: "bg-yellow-500",
    hover_dark: "hover:bg-yellow-200",
    emoji: "🌙",
    description: "The Sleep Whisperer",
    color: "rgb(234, 179, 8)",
};

static BREATHING: ThemeBundle = palette!("teal", "cyan", "🫁", "Deep breathing techniques", "rgb(20, 184, 166)");
static MEDITATION: ThemeBundle = palette!("indigo", "violet", "🧘", "Guided meditation sessions", "rgb(99, 102, 241)");
static GRATITUDE: ThemeBundle = palette!("pink", "rose", "📝", "Positive reflection practice", "rgb(236, 72, 153)");
static VISUALIZATION: ThemeBundle = palette!("lime", "green", "🌈", "Guided imagery exercises", "rgb(132, 204, 22)");
static GROUNDING: ThemeBundle = palette!("emerald", "green", "🌱", "5-4-3-2-1 sensory techniques", "rgb(16, 185, 129)");
static JOURNALLING: ThemeBundle = palette!("orange", "amber", "✏️", "Expressive writing practice", "rgb(249, 115, 22)");

pub fn persona_theme(persona: Persona) -> &'static ThemeBundle {
    match persona {
        Persona::LenaShore => &LENA_SHORE,
        Persona::TheoHart => &THEO_HART,
        Persona::EvelynSage => &EVELYN_SAGE,
        Persona::SamRivers => &SAM_RIVERS,
        Persona::IslaMoon => &ISLA_MOON,
    }
}

pub fn exercise_theme(exercise: Exercise) -> &'static ThemeBundle {
    match exercise {
        Exercise::Breathing => &BREATHING,
        Exercise::Meditation => &MEDITATION,
        Exercise::Gratitude => &GRATITUDE,
        Exercise::Visualization => &VISUALIZATION,
        Exercise::Grounding => &GROUNDING,
        Exercise::Journalling => &JOURNALLING,
    }
}

/// 활성 모드와 이름으로 테마를 찾습니다. 모든 입력에 대해 값을 돌려주는 전함수입니다.
///
/// - `Mood` 모드: 페르소나 이름 (예: "Isla Moon")
/// - `Exercise` 모드: 운동 이름 (예: "Breathing")
/// - 그 밖의 경우: 기본 페르소나 테마
pub fn resolve(active: ActiveMode, name: &str) -> &'static ThemeBundle {
    let resolved = match active {
        ActiveMode::Mood => Persona::from_str(name).ok().map(persona_theme),
        ActiveMode::Exercise => Exercise::from_str(name).ok().map(exercise_theme),
    };
    resolved.unwrap_or_else(|| persona_theme(Persona::default()))
}

pub fn persona_profile(persona: Persona) -> PersonaProfile {
    match persona {
        Persona::LenaShore => PersonaProfile {
            persona: "A warm, gentle therapist with a voice like ocean waves, Lena specializes in mindfulness and grounding. She believes in the power of presence and acceptance, helping you feel anchored when emotions surge.",
            bio: "Hey there, I'm Lena. I'm glad you've chosen to spend this time together. Let's start with a few deep breaths and settle into the present moment. It's okay to feel what you're feeling. I'm here to help you find your center.",
            specialty: "Mindfulness, grounding techniques, and acceptance.",
            style: "Calm, slow, and soothing with gentle prompts to help you focus on the now.",
        },
        Persona::TheoHart => PersonaProfile {
            persona: "An upbeat and encouraging therapist with an infectious enthusiasm. Theo's sessions are like a pep talk from a trusted friend who believes in you wholeheartedly.",
            bio: "Hey! I'm Theo, and I'm so excited to chat with you. I believe in you and everything you're capable of achieving. Let's talk about what's on your mind. I know you've got this!",
            specialty: "Positive affirmations, motivation, and goal-setting.",
            style: "High-energy, supportive, and forward-focused.",
        },
        Persona::EvelynSage => PersonaProfile {
            persona: "A thoughtful and curious therapist who asks the right questions to help you uncover deeper insights. Evelyn's presence feels like a warm library with a cozy chair and time to reflect.",
            bio: "Hi, I'm Evelyn. It's so good to connect with you. I'd love to hear what's been on your mind lately. No rush, take your time. Let's explore your thoughts together and see where they lead.",
            specialty: "Deep self-reflection, thoughtful questioning, and pattern recognition.",
            style: "Inquisitive, non-judgmental, and validating.",
        },
        Persona::SamRivers => PersonaProfile {
            persona: "A calm and steady therapist who is unflinching in the face of intense emotions. Sam's voice is a lifeline when things feel overwhelming, offering immediate support and reassurance.",
            bio: "Hey, I'm Sam. I'm right here with you. I know things are really hard right now, but you're not alone. Take a breath with me if you can. We'll take this one step at a time.",
            specialty: "Crisis management, grounding techniques, and active listening.",
            style: "Steady, reassuring, and focused on safety.",
        },
        Persona::IslaMoon => PersonaProfile {
            persona: "A tranquil therapist with a voice like a lullaby. Isla's goal is to help you unwind and drift off with soft, melodic guidance and comforting imagery.",
            bio: "Hi there, I'm Isla. It's time to let go of today's worries and relax. Imagine a warm blanket wrapping around you as you take a slow, deep breath. I'll be here, guiding you gently.",
            specialty: "Relaxation techniques, sleep preparation, and calming imagery.",
            style: "Slow, soft, and melodic with lots of pauses.",
        },
    }
}
