//! Expression weight animator.
//!
//! Holds the active expression and fades its blend weight toward a target at
//! a fixed rate. The blend engine runs only while the weight is positive.

use std::sync::Arc;
use tracing::debug;

use super::blend::apply_expression;
use super::catalog::{Expression, ExpressionCatalog};
use crate::config::ExpressionConfig;
use crate::rig::ParameterStore;

#[derive(Debug, Clone)]
pub struct ExpressionAnimator {
    current: Option<(String, Arc<Expression>)>,
    current_weight: f32,
    target_weight: f32,
    fade_rate: f32,
    neutral_names: Vec<String>,
    last_update: Option<f64>,
}

impl ExpressionAnimator {
    pub fn new(config: &ExpressionConfig) -> Self {
        Self {
            current: None,
            current_weight: 0.0,
            target_weight: 0.0,
            fade_rate: config.fade_rate,
            neutral_names: config.neutral_names.clone(),
            last_update: None,
        }
    }

    /// Switch to `name` at `weight`.
    ///
    /// A neutral or unknown name fades the current expression out instead.
    /// Switching always restarts the fade from zero so one expression never
    /// pops into another.
    pub fn set_expression(&mut self, catalog: &ExpressionCatalog, name: &str, weight: f32) {
        let expression = if self.neutral_names.iter().any(|n| n == name) {
            None
        } else {
            catalog.get(name)
        };

        match expression {
            Some(expression) => {
                self.current = Some((name.to_string(), expression));
                self.target_weight = weight.clamp(0.0, 1.0);
                self.current_weight = 0.0;
                debug!("[Expression] Set '{}' → {:.2}", name, self.target_weight);
            }
            None => {
                self.target_weight = 0.0;
                debug!("[Expression] '{}' is neutral or unknown, fading out", name);
            }
        }
    }

    /// Fade out, keeping the outgoing expression until its weight reaches 0.
    pub fn clear_expression(&mut self) {
        self.target_weight = 0.0;
    }

    /// Move the weight toward the target by at most `fade_rate * dt`.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let delta = self.target_weight - self.current_weight;
        if delta != 0.0 {
            let step = self.fade_rate * dt.max(0.0);
            if delta.abs() <= step {
                self.current_weight = self.target_weight;
            } else {
                self.current_weight += step.copysign(delta);
            }
        }
        self.current_weight
    }

    /// Advance using wall-clock time in seconds. The first call sees `dt = 0`.
    pub fn step(&mut self, now: f64) -> f32 {
        let dt = match self.last_update {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_update = Some(now);
        self.advance(dt)
    }

    /// Blend the active expression at its current weight, if any.
    pub fn apply<S: ParameterStore + ?Sized>(&self, store: &mut S) {
        if let Some((_, expression)) = &self.current {
            if self.current_weight > 0.0 {
                apply_expression(store, expression, self.current_weight);
            }
        }
    }

    /// One frame: step the fade, then blend.
    pub fn update<S: ParameterStore + ?Sized>(&mut self, store: &mut S, now: f64) {
        self.step(now);
        self.apply(store);
    }

    pub fn current_weight(&self) -> f32 {
        self.current_weight
    }

    pub fn target_weight(&self) -> f32 {
        self.target_weight
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|(name, _)| name.as_str())
    }

    /// Drop back to the idle state (no expression, zero weight).
    pub fn reset(&mut self) {
        self.current = None;
        self.current_weight = 0.0;
        self.target_weight = 0.0;
        self.last_update = None;
    }
}

impl Default for ExpressionAnimator {
    fn default() -> Self {
        Self::new(&ExpressionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::MemoryRig;

    fn catalog() -> ExpressionCatalog {
        let mut c = ExpressionCatalog::new();
        c.insert("smile", Expression::additive(&[("ParamMouthForm", 1.0)]));
        c.insert("sad", Expression::additive(&[("ParamMouthForm", -1.0)]));
        c
    }

    #[test]
    fn full_fade_in_takes_a_quarter_second() {
        let mut anim = ExpressionAnimator::default();
        anim.set_expression(&catalog(), "smile", 1.0);
        assert_eq!(anim.advance(0.25), 1.0);
    }

    #[test]
    fn fade_does_not_overshoot() {
        let mut anim = ExpressionAnimator::default();
        anim.set_expression(&catalog(), "smile", 0.5);
        assert_eq!(anim.advance(10.0), 0.5);
        assert_eq!(anim.advance(10.0), 0.5);
    }

    #[test]
    fn first_step_has_zero_dt() {
        let mut anim = ExpressionAnimator::default();
        anim.set_expression(&catalog(), "smile", 1.0);
        assert_eq!(anim.step(100.0), 0.0);
        let w = anim.step(100.1);
        assert!((w - 0.4).abs() < 1e-4, "got {}", w);
    }

    #[test]
    fn backward_clock_does_not_move_weight() {
        let mut anim = ExpressionAnimator::default();
        anim.set_expression(&catalog(), "smile", 1.0);
        anim.step(5.0);
        assert_eq!(anim.step(4.0), 0.0);
    }

    #[test]
    fn switching_expression_restarts_from_zero() {
        let mut anim = ExpressionAnimator::default();
        let c = catalog();
        anim.set_expression(&c, "smile", 1.0);
        anim.advance(1.0);
        assert_eq!(anim.current_weight(), 1.0);

        anim.set_expression(&c, "sad", 0.8);
        assert_eq!(anim.current_weight(), 0.0);
        assert_eq!(anim.target_weight(), 0.8);
        assert_eq!(anim.current_name(), Some("sad"));
    }

    #[test]
    fn neutral_and_unknown_names_fade_out_current() {
        let c = catalog();
        for name in ["normal", "neutral", "no-such-expression"] {
            let mut anim = ExpressionAnimator::default();
            anim.set_expression(&c, "smile", 1.0);
            anim.advance(1.0);
            anim.set_expression(&c, name, 1.0);
            assert_eq!(anim.target_weight(), 0.0);
            assert_eq!(anim.current_name(), Some("smile"));
            assert_eq!(anim.current_weight(), 1.0);
        }
    }

    #[test]
    fn clear_keeps_outgoing_expression_while_fading() {
        let mut anim = ExpressionAnimator::default();
        anim.set_expression(&catalog(), "smile", 1.0);
        anim.advance(1.0);
        anim.clear_expression();

        let mut rig = MemoryRig::with_parameters(["ParamMouthForm"]);
        anim.advance(0.125);
        anim.apply(&mut rig);
        assert!((rig.parameter("ParamMouthForm").unwrap() - 0.5).abs() < 1e-6);

        anim.advance(1.0);
        assert_eq!(anim.current_weight(), 0.0);
        let mut rig = MemoryRig::with_parameters(["ParamMouthForm"]);
        anim.apply(&mut rig);
        assert_eq!(rig.parameter("ParamMouthForm"), Some(0.0));
    }

    #[test]
    fn weight_target_is_clamped() {
        let mut anim = ExpressionAnimator::default();
        anim.set_expression(&catalog(), "smile", 3.0);
        assert_eq!(anim.target_weight(), 1.0);
        anim.set_expression(&catalog(), "smile", -1.0);
        assert_eq!(anim.target_weight(), 0.0);
    }
}
