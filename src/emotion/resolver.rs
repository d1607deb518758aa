//! Emotion Resolver — maps emotion backend output to an expression command.
//!
//! Three layers:
//! 1. `discrete_emotion.primary` → expression name (most reliable)
//! 2. VAD coordinates → expression name (fallback)
//! 3. `emotion_intensity` + `body_budget` → weight modulation

use serde::Serialize;
use tracing::debug;

use super::payload::{DiscreteEmotion, EmotionUpdate, Vad};
use super::vad::vad_to_expression;
use crate::controller::CharacterController;

/// Backend discrete labels → expression names.
const DISCRETE_TO_EXPRESSION: [(&str, &str); 14] = [
    ("joy", "cheerful"),
    ("excitement", "excited"),
    ("contentment", "smile"),
    ("anger", "angry"),
    ("fear", "fear"),
    ("sadness", "sad"),
    ("anxiety", "frustrated"),
    ("surprise", "surprised"),
    ("disgust", "disgust"),
    ("trust", "smile"),
    ("calm", "relaxed"),
    ("shame", "shy"),
    ("guilt", "sad"),
    ("numbness", "sleepy"),
];

const MIN_WEIGHT: f32 = 0.15;
const MAX_FATIGUE_OVERLAY: f32 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionCommand {
    pub expression: String,
    /// Final blend weight in [0.15, 1].
    pub weight: f32,
    /// Strength in [0, 0.4] of a sleepy layer the caller may add on top.
    pub fatigue_overlay: f32,
}

fn discrete_expression(label: &str) -> Option<&'static str> {
    DISCRETE_TO_EXPRESSION
        .iter()
        .find(|(from, _)| *from == label)
        .map(|(_, to)| *to)
}

fn intensity_to_weight(intensity: &str) -> f32 {
    match intensity {
        "high" => 0.85,
        "medium" => 0.6,
        "low" => 0.35,
        _ => 0.5,
    }
}

/// Fatigue dampening: budget 0.5 and above leaves the weight alone,
/// budget 0 scales it by 0.6.
fn modulate_by_budget(weight: f32, body_budget: f32) -> f32 {
    if body_budget > 0.5 {
        return weight;
    }
    weight * (0.6 + (body_budget / 0.5) * 0.4)
}

/// 0 at budget 0.3, rising linearly to 0.4 at budget 0.05.
fn fatigue_overlay(body_budget: f32) -> f32 {
    if body_budget < 0.3 {
        (0.3 - body_budget) / 0.25 * MAX_FATIGUE_OVERLAY
    } else {
        0.0
    }
}

/// Resolve the expression and weight for one emotion update.
///
/// `None` means the state is too neutral for any expression; the caller
/// clears the active one.
pub fn resolve_expression(
    discrete: &DiscreteEmotion,
    vad: &Vad,
    emotion_intensity: f32,
    body_budget: f32,
) -> Option<EmotionCommand> {
    let (name, base_weight) = match discrete_expression(&discrete.primary) {
        Some(name) => (name, intensity_to_weight(&discrete.intensity)),
        None => {
            let fallback = vad_to_expression(vad)?;
            (fallback.name, fallback.weight)
        }
    };

    let weight = base_weight * (0.5 + emotion_intensity * 0.5);
    let weight = modulate_by_budget(weight, body_budget).clamp(MIN_WEIGHT, 1.0);

    Some(EmotionCommand {
        expression: name.to_string(),
        weight,
        fatigue_overlay: fatigue_overlay(body_budget),
    })
}

/// Resolve `update` and drive the controller: exactly one `set_expression`
/// or `clear_expression` per update.
pub fn apply_emotion_update(
    controller: &mut CharacterController,
    update: &EmotionUpdate,
) -> Option<EmotionCommand> {
    let command = resolve_expression(
        &update.discrete_emotion,
        &update.new_emotion,
        update.emotion_intensity,
        update.body_budget,
    );

    match &command {
        Some(cmd) => {
            debug!(
                "[Emotion] {} → '{}' @ {:.2} (fatigue {:.2})",
                update.discrete_emotion.primary, cmd.expression, cmd.weight, cmd.fatigue_overlay
            );
            controller.set_expression(&cmd.expression, cmd.weight);
        }
        None => {
            debug!(
                "[Emotion] {} unresolved, clearing expression",
                update.discrete_emotion.primary
            );
            controller.clear_expression();
        }
    }
    controller.record_emotion_command(command.clone());
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral_vad() -> Vad {
        Vad::new(0.0, 0.0, 0.0)
    }

    #[test]
    fn discrete_label_maps_to_expression() {
        let cmd = resolve_expression(&DiscreteEmotion::new("joy", "high"), &neutral_vad(), 1.0, 1.0)
            .unwrap();
        assert_eq!(cmd.expression, "cheerful");
        assert!((cmd.weight - 0.85).abs() < 1e-6);
    }

    #[test]
    fn high_intensity_outweighs_low() {
        let vad = neutral_vad();
        let high = resolve_expression(&DiscreteEmotion::new("joy", "high"), &vad, 0.5, 0.8).unwrap();
        let low = resolve_expression(&DiscreteEmotion::new("joy", "low"), &vad, 0.5, 0.8).unwrap();
        assert!(
            high.weight > low.weight,
            "high={} low={}",
            high.weight,
            low.weight
        );
    }

    #[test]
    fn unknown_intensity_label_is_mid_strength() {
        let cmd = resolve_expression(&DiscreteEmotion::new("calm", "extreme"), &neutral_vad(), 1.0, 1.0)
            .unwrap();
        assert_eq!(cmd.expression, "relaxed");
        assert!((cmd.weight - 0.5).abs() < 1e-6);
    }

    #[test]
    fn unknown_label_falls_back_to_vad() {
        let cmd = resolve_expression(
            &DiscreteEmotion::new("wistful", "high"),
            &Vad::new(-0.5, 0.7, 0.7),
            1.0,
            1.0,
        )
        .unwrap();
        assert_eq!(cmd.expression, "angry");
        let expected = 1.23f32.sqrt() / 1.2;
        assert!((cmd.weight - expected).abs() < 1e-5, "got {}", cmd.weight);
    }

    #[test]
    fn unresolvable_emotion_is_none() {
        let cmd = resolve_expression(
            &DiscreteEmotion::new("wistful", "high"),
            &Vad::new(0.0, 0.0, 0.9),
            1.0,
            1.0,
        );
        assert_eq!(cmd, None);
    }

    #[test]
    fn low_budget_adds_fatigue_overlay() {
        let tired = resolve_expression(&DiscreteEmotion::new("joy", "high"), &neutral_vad(), 0.5, 0.1)
            .unwrap();
        assert!(tired.fatigue_overlay > 0.0);

        let rested = resolve_expression(&DiscreteEmotion::new("joy", "high"), &neutral_vad(), 0.5, 0.8)
            .unwrap();
        assert_eq!(rested.fatigue_overlay, 0.0);
    }

    #[test]
    fn fatigue_overlay_endpoints() {
        assert_eq!(fatigue_overlay(0.3), 0.0);
        assert!((fatigue_overlay(0.05) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn fatigue_dampens_weight() {
        let d = DiscreteEmotion::new("anger", "high");
        let rested = resolve_expression(&d, &neutral_vad(), 1.0, 0.6).unwrap();
        let tired = resolve_expression(&d, &neutral_vad(), 1.0, 0.0).unwrap();
        assert!((rested.weight - 0.85).abs() < 1e-6);
        assert!((tired.weight - 0.85 * 0.6).abs() < 1e-6);
    }

    #[test]
    fn weight_never_drops_below_floor() {
        let cmd = resolve_expression(&DiscreteEmotion::new("calm", "low"), &neutral_vad(), 0.0, 0.05)
            .unwrap();
        assert_eq!(cmd.weight, MIN_WEIGHT);
    }
}
