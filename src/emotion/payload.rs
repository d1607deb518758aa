//! Emotion backend payload, as delivered after each conversation turn.

use serde::{Deserialize, Serialize};

/// Valence-Arousal-Dominance point. V and D span [-1, 1], A spans [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vad {
    #[serde(rename = "V")]
    pub v: f32,
    #[serde(rename = "A")]
    pub a: f32,
    #[serde(rename = "D")]
    pub d: f32,
}

impl Vad {
    pub fn new(v: f32, a: f32, d: f32) -> Self {
        Self { v, a, d }
    }

    /// Distance from the neutral origin.
    pub fn magnitude(&self) -> f32 {
        (self.v * self.v + self.a * self.a + self.d * self.d).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteEmotion {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    /// "high" | "medium" | "low"; anything else is treated as mid-strength.
    #[serde(default)]
    pub intensity: String,
}

impl DiscreteEmotion {
    pub fn new(primary: impl Into<String>, intensity: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            intensity: intensity.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionUpdate {
    pub new_emotion: Vad,
    pub discrete_emotion: DiscreteEmotion,
    /// Distance of the state from baseline, roughly [0, 1].
    pub emotion_intensity: f32,
    /// Fatigue/stamina scalar in [0.05, 1]; low values dampen expressions.
    pub body_budget: f32,
}
