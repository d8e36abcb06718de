use crate::{Difficulty, EventKind, GameMode};
use std::{convert::From, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl Difficulty {
    /// Hit window implied by this difficulty.
    pub const fn window_ms(self) -> u64 {
        match self {
            Self::Easy => 5000,
            Self::Medium => 3000,
            Self::Hard => 2000,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

// The Spanish spellings are what the original viewers and firmware send.
impl FromStr for Difficulty {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" | "facil" | "fácil" => Ok(Self::Easy),
            "medium" | "medio" => Ok(Self::Medium),
            "hard" | "dificil" | "difícil" => Ok(Self::Hard),
            _ => Err(UnknownVariant {
                kind: "difficulty",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl GameMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shot => "shot",
            Self::ChaosRay => "chaos_ray",
            Self::Sequence => "sequence",
            Self::Hunt => "hunt",
            Self::Marathon => "marathon",
        }
    }
}

impl FromStr for GameMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shot" | "tiro" | "tiro_seguro" => Ok(Self::Shot),
            "chaos_ray" | "rayo" | "rayo_loco" => Ok(Self::ChaosRay),
            "sequence" | "secuencia" => Ok(Self::Sequence),
            "hunt" | "caza" => Ok(Self::Hunt),
            "marathon" | "maraton" | "maratón" => Ok(Self::Marathon),
            _ => Err(UnknownVariant {
                kind: "mode",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for GameMode {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<String> for EventKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "hit" => Self::Hit,
            "miss" => Self::Miss,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for EventKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Hit => "hit".to_string(),
            EventKind::Miss => "miss".to_string(),
            EventKind::Other(value) => value,
        }
    }
}
