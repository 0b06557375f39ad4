use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A page theme, applied as the `theme-<name>` class on the document body.
///
/// Names are not validated: an unknown name is applied as given and simply
/// matches no stylesheet rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(String);

impl Theme {
    /// Key the active theme is persisted under.
    pub const STORAGE_KEY: &'static str = "verifai-theme";

    /// Themes that ship with a stylesheet and a switcher button.
    pub const BUILTIN: [&'static str; 3] = ["light", "dark", "ocean"];

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn dark() -> Self {
        Self::new("dark")
    }

    pub fn light() -> Self {
        Self::new("light")
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn css_class(&self) -> String {
        format!("theme-{}", self.0)
    }

    pub fn is_builtin(&self) -> bool {
        Self::BUILTIN.contains(&self.0.as_str())
    }

    pub fn builtins() -> impl Iterator<Item = Theme> {
        Self::BUILTIN.iter().map(|name| Theme::new(*name))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Theme {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Theme::new(s))
    }
}

impl From<&str> for Theme {
    fn from(name: &str) -> Self {
        Theme::new(name)
    }
}

impl From<String> for Theme {
    fn from(name: String) -> Self {
        Theme(name)
    }
}

/// Categorical outcome reported by a detection backend.
///
/// Labels the backend is known to send map to named variants; anything else
/// is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Real,
    LikelyReal,
    Fake,
    Suspicious,
    Unverifiable,
    NotAFactualClaim,
    NoTextDetected,
    Unknown,
    Other(String),
}

impl Verdict {
    pub fn label(&self) -> &str {
        match self {
            Verdict::Real => "REAL",
            Verdict::LikelyReal => "LIKELY REAL",
            Verdict::Fake => "FAKE",
            Verdict::Suspicious => "SUSPICIOUS",
            Verdict::Unverifiable => "UNVERIFIABLE",
            Verdict::NotAFactualClaim => "NOT A FACTUAL CLAIM",
            Verdict::NoTextDetected => "NO TEXT DETECTED",
            Verdict::Unknown => "UNKNOWN",
            Verdict::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Verdict::Other(_))
    }
}

impl From<String> for Verdict {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "REAL" => Verdict::Real,
            "LIKELY REAL" => Verdict::LikelyReal,
            "FAKE" => Verdict::Fake,
            "SUSPICIOUS" => Verdict::Suspicious,
            "UNVERIFIABLE" => Verdict::Unverifiable,
            "NOT A FACTUAL CLAIM" => Verdict::NotAFactualClaim,
            "NO TEXT DETECTED" => Verdict::NoTextDetected,
            "UNKNOWN" => Verdict::Unknown,
            _ => Verdict::Other(raw),
        }
    }
}

impl From<&str> for Verdict {
    fn from(raw: &str) -> Self {
        Verdict::from(raw.to_string())
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four backend signals behind a verdict, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    #[serde(default)]
    pub ml_score: f64,
    #[serde(default)]
    pub bert_score: f64,
    #[serde(default)]
    pub llm_score: f64,
    #[serde(default)]
    pub web_score: f64,
}

/// Successful `/check` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextVerification {
    pub verdict: Verdict,
    #[serde(deserialize_with = "deserialize_credibility")]
    pub credibility: u8,
    #[serde(flatten)]
    pub scores: SubScores,
}

/// Successful `/check-image` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageVerification {
    pub verdict: Verdict,
    #[serde(deserialize_with = "deserialize_credibility")]
    pub credibility: u8,
    #[serde(default)]
    pub alert: String,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub concerns: Option<String>,
    #[serde(flatten)]
    pub scores: SubScores,
    #[serde(default)]
    pub image_manipulation_score: f64,
}

/// Accepts any JSON number and clamps it into a whole percentage.
fn deserialize_credibility<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// The two detection backends the page talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Text,
    Image,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::Text, Service::Image];

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Service::Text => "http://127.0.0.1:5000",
            Service::Image => "http://127.0.0.1:5001",
        }
    }

    pub fn check_path(&self) -> &'static str {
        match self {
            Service::Text => "check",
            Service::Image => "check-image",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Text => f.write_str("text detection service"),
            Service::Image => f.write_str("image detection service"),
        }
    }
}

/// Body of a backend's `/health` route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub service: Service,
    pub endpoint: String,
    pub reachable: bool,
    pub http_status: Option<u16>,
    pub report: Option<HealthReport>,
    pub error: Option<String>,
}
