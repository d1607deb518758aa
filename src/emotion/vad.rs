//! VAD region → expression name fallback.
//!
//! Ranges overlap on purpose. The table is scanned top to bottom and the
//! first region containing the point wins, so the more specific and more
//! intense emotions are listed first. Keep the order.

use super::payload::Vad;

struct ExpressionRange {
    name: &'static str,
    v: (f32, f32),
    a: (f32, f32),
    d: (f32, f32),
}

const fn range(name: &'static str, v: (f32, f32), a: (f32, f32), d: (f32, f32)) -> ExpressionRange {
    ExpressionRange { name, v, a, d }
}

const EXPRESSION_MAP: [ExpressionRange; 19] = [
    // High-arousal negative
    range("angry", (-1.0, -0.1), (0.5, 1.0), (0.3, 1.0)),
    range("fear", (-1.0, -0.1), (0.5, 1.0), (-1.0, 0.3)),
    range("frustrated", (-1.0, -0.1), (0.3, 0.6), (-1.0, 0.5)),
    range("disgust", (-1.0, -0.2), (0.2, 0.5), (0.0, 1.0)),
    // Sadness
    range("cry", (-1.0, -0.5), (0.0, 0.3), (-1.0, 0.0)),
    range("sad", (-1.0, -0.2), (0.0, 0.3), (-1.0, 0.3)),
    // Surprise
    range("surprised", (-0.5, 0.5), (0.6, 1.0), (-1.0, 0.3)),
    range("amazed", (0.2, 1.0), (0.6, 1.0), (-1.0, 0.3)),
    range("confused", (-0.4, 0.2), (0.3, 0.6), (-1.0, 0.0)),
    // Positive high-arousal
    range("excited", (0.3, 1.0), (0.6, 1.0), (0.2, 1.0)),
    range("laugh", (0.5, 1.0), (0.5, 1.0), (0.0, 1.0)),
    // Positive moderate
    range("cheerful", (0.2, 0.7), (0.3, 0.6), (0.0, 1.0)),
    range("smile", (0.2, 1.0), (0.0, 0.4), (-1.0, 1.0)),
    // Social / self-conscious
    range("shy", (0.0, 0.5), (0.3, 0.6), (-1.0, -0.2)),
    range("blushing", (-0.1, 0.4), (0.3, 0.6), (-1.0, 0.0)),
    range("smug", (0.2, 0.8), (0.1, 0.4), (0.5, 1.0)),
    // Low arousal
    range("relaxed", (0.1, 0.6), (0.0, 0.2), (0.0, 1.0)),
    range("sleepy", (-0.2, 0.3), (0.0, 0.15), (-1.0, 0.3)),
    range("think", (-0.2, 0.3), (0.1, 0.35), (-0.5, 0.5)),
];

fn in_range(val: f32, (lo, hi): (f32, f32)) -> bool {
    val >= lo && val <= hi
}

#[derive(Debug, Clone, PartialEq)]
pub struct VadMatch {
    pub name: &'static str,
    /// Distance from neutral scaled into [0.3, 1].
    pub weight: f32,
}

pub fn vad_to_expression(vad: &Vad) -> Option<VadMatch> {
    EXPRESSION_MAP
        .iter()
        .find(|entry| in_range(vad.v, entry.v) && in_range(vad.a, entry.a) && in_range(vad.d, entry.d))
        .map(|entry| VadMatch {
            name: entry.name,
            weight: (vad.magnitude() / 1.2).clamp(0.3, 1.0),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(v: f32, a: f32, d: f32) -> Option<&'static str> {
        vad_to_expression(&Vad::new(v, a, d)).map(|m| m.name)
    }

    #[test]
    fn positive_moderate_arousal_is_happy_family() {
        let name = name_of(0.6, 0.3, 0.5).unwrap();
        assert!(["cheerful", "smile", "excited", "smug"].contains(&name), "got {}", name);
    }

    #[test]
    fn high_arousal_dominant_negative_is_angry() {
        assert_eq!(name_of(-0.5, 0.7, 0.7), Some("angry"));
    }

    #[test]
    fn high_arousal_submissive_negative_is_fear() {
        assert_eq!(name_of(-0.5, 0.6, -0.3), Some("fear"));
    }

    #[test]
    fn mid_valence_high_arousal_is_surprise_family() {
        let name = name_of(0.0, 0.8, -0.3).unwrap();
        assert!(["surprised", "amazed"].contains(&name), "got {}", name);
    }

    #[test]
    fn overlapping_regions_resolve_by_table_order() {
        // Inside both `cry` and `sad`; `cry` is listed first.
        assert_eq!(name_of(-0.7, 0.1, -0.5), Some("cry"));
        // Inside `sad` only.
        assert_eq!(name_of(-0.3, 0.1, 0.2), Some("sad"));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert_eq!(name_of(-0.1, 0.5, 0.3), Some("angry"));
    }

    #[test]
    fn arousal_outside_table_matches_nothing() {
        assert_eq!(name_of(0.3, -0.5, 0.5), None);
        assert_eq!(name_of(0.0, 0.0, 0.9), None);
    }

    #[test]
    fn weight_is_clamped_between_floor_and_one() {
        let strong = vad_to_expression(&Vad::new(0.8, 0.8, 0.8)).unwrap();
        assert_eq!(strong.weight, 1.0);
        let faint = vad_to_expression(&Vad::new(0.0, 0.2, 0.0)).unwrap();
        assert_eq!(faint.name, "think");
        assert_eq!(faint.weight, 0.3);
    }
}
