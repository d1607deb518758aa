//! Rig Runtime Interface
//!
//! The 2D rig runtime (parameter storage, motion clips, physics, rendering)
//! lives outside this crate. These traits are the narrow surface the
//! animation core needs from it. A host implements them over its runtime and
//! calls [`CharacterController::update`](crate::controller::CharacterController::update)
//! from the runtime's post-motion, pre-commit update hook.

use std::collections::HashMap;

// ── Parameters ─────────────────────────────────────────

/// Parameter storage owned by the rig. The core reads and writes by id and
/// never creates or removes parameters.
pub trait ParameterStore {
    /// Current value, or `None` when the rig has no parameter with this id.
    fn parameter(&self, id: &str) -> Option<f32>;

    /// Write a value. Unknown ids are ignored by the rig.
    fn set_parameter(&mut self, id: &str, value: f32);

    /// All parameter ids exposed by the loaded rig.
    fn parameter_ids(&self) -> Vec<String>;
}

// ── Motions ────────────────────────────────────────────

/// Priority passed through to the rig's motion manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPriority {
    Idle,
    #[default]
    Normal,
    Force,
}

/// One animation curve of a motion clip, addressed by the parameter it drives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MotionCurve {
    pub id: String,
    /// Set when the curve has been disabled by renaming; holds the id it had.
    pub original_id: Option<String>,
}

impl MotionCurve {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_id: None,
        }
    }
}

pub trait MotionPlayer {
    /// Request a clip start. Fire-and-forget: returns whether the rig accepted it,
    /// completion is observed through [`current_group`](Self::current_group).
    fn start_motion(&mut self, group: &str, index: usize, priority: MotionPriority) -> bool;

    /// Group of the clip currently playing, if any.
    fn current_group(&self) -> Option<String>;

    /// Name of the idle group in this rig's motion definitions.
    fn idle_group(&self) -> String;

    /// Number of clips per motion group.
    fn motion_groups(&self) -> HashMap<String, usize>;

    /// Mutable access to the curves of every loaded clip in `group`.
    /// Clips the rig loads lazily are simply absent until loaded.
    fn with_group_curves(&mut self, group: &str, f: &mut dyn FnMut(&mut Vec<MotionCurve>));
}

// ── Hit testing / focus / physics ──────────────────────

pub trait HitTester {
    /// Names of the hit regions under a canvas-local point.
    fn hit_test(&self, x: f32, y: f32) -> Vec<String>;
}

/// The rig's own eye-focus interpolator (overshoot / settle behaviour).
pub trait FocusController {
    fn focus(&mut self, x: f32, y: f32, instant: bool);

    /// Advance the focus interpolation; `elapsed` is seconds since the focus was set.
    fn update_focus(&mut self, elapsed: f32);
}

/// Secondary inputs to the rig's physics solver (hair, accessories).
pub trait PhysicsInput {
    fn set_wind(&mut self, _x: f32, _y: f32) {}
}

/// Everything the per-frame hook touches.
pub trait Rig: ParameterStore + MotionPlayer + HitTester + FocusController + PhysicsInput {}

impl<T> Rig for T where T: ParameterStore + MotionPlayer + HitTester + FocusController + PhysicsInput {}
