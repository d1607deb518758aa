//! exp3 blend engine.
//!
//! Apply after the rig's motion pass and before it commits parameters, so
//! motions set the base values and the expression lands on top.

use super::catalog::{BlendMode, Expression};
use crate::rig::ParameterStore;

/// Next value for one parameter under `mode` at `weight`.
pub fn blend_value(mode: BlendMode, current: f32, value: f32, weight: f32) -> f32 {
    match mode {
        BlendMode::Add => current + value * weight,
        BlendMode::Multiply => current * (1.0 + (value - 1.0) * weight),
        // Same as `current + (value - current) * weight`, but exact at 0 and 1.
        BlendMode::Overwrite => current * (1.0 - weight) + value * weight,
    }
}

/// Blend `expression` onto the rig's current values at `weight` (0..1).
///
/// Parameters the rig does not expose are skipped; rigs differ in which
/// parameters they carry. Weight 0 leaves every parameter unchanged.
pub fn apply_expression<S: ParameterStore + ?Sized>(store: &mut S, expression: &Expression, weight: f32) {
    for param in &expression.parameters {
        if param.is_noop() {
            continue;
        }
        let Some(current) = store.parameter(&param.id) else {
            continue;
        };
        let next = blend_value(param.blend, current, param.value, weight);
        store.set_parameter(&param.id, next);
    }
}
