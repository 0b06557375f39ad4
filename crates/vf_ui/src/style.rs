use serde::Serialize;
use vf_core::Verdict;

/// Color family a verdict renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Red,
    Orange,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Check,
    Alert,
    Warning,
}

impl Tone {
    pub fn color(&self) -> &'static str {
        match self {
            Tone::Green => "#4ade80",
            Tone::Red => "#f87171",
            Tone::Orange => "#fb923c",
            Tone::Yellow => "#facc15",
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            Tone::Green => Icon::Check,
            Tone::Red => Icon::Alert,
            Tone::Orange | Tone::Yellow => Icon::Warning,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Green => "tone-green",
            Tone::Red => "tone-red",
            Tone::Orange => "tone-orange",
            Tone::Yellow => "tone-yellow",
        }
    }
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Check => "✅",
            Icon::Alert => "🚨",
            Icon::Warning => "⚠️",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Icon::Check => "check",
            Icon::Alert => "alert",
            Icon::Warning => "warning",
        }
    }
}

/// Text results only distinguish genuine and fabricated; the rest is a warning.
pub fn text_tone(verdict: &Verdict) -> Tone {
    match verdict {
        Verdict::Real => Tone::Green,
        Verdict::Fake => Tone::Red,
        _ => Tone::Yellow,
    }
}

pub fn image_tone(verdict: &Verdict) -> Tone {
    match verdict {
        Verdict::Real | Verdict::LikelyReal => Tone::Green,
        Verdict::Fake => Tone::Red,
        Verdict::Suspicious => Tone::Orange,
        _ => Tone::Yellow,
    }
}
