use serde::{Deserialize, Serialize};

/// The user's self-reported mood.
///
/// `intensity` is clamped into `0.0..=1.0` on construction and when
/// deserialised.
///
/// # Examples
/// ```
/// use wherehere_core::Mood;
///
/// let mood = Mood::new("지침", 1.4);
/// assert_eq!(mood.text, "지침");
/// assert_eq!(mood.intensity(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMood")]
pub struct Mood {
    /// Free-form mood label, e.g. `활기찬`.
    pub text: String,
    intensity: f64,
}

#[derive(Deserialize)]
struct RawMood {
    text: String,
    #[serde(default = "default_intensity")]
    intensity: f64,
}

const fn default_intensity() -> f64 {
    0.5
}

impl Mood {
    /// Construct a mood, clamping `intensity` into range.
    pub fn new(text: impl Into<String>, intensity: f64) -> Self {
        let bounded = if intensity.is_finite() {
            intensity.clamp(0.0, 1.0)
        } else {
            default_intensity()
        };
        Self {
            text: text.into(),
            intensity: bounded,
        }
    }

    /// How strongly the mood is felt, in `0.0..=1.0`.
    #[must_use]
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }
}

impl From<RawMood> for Mood {
    fn from(raw: RawMood) -> Self {
        Self::new(raw.text, raw.intensity)
    }
}
