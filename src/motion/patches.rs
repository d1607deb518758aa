//! Idle-motion patching.
//!
//! Idle clips animate the eye balls, which would fight the gaze resolver and
//! saccade scheduler every frame. Their eye-ball curves are renamed to an
//! id no rig parameter has, which disables them while keeping the original
//! id on the curve.

use tracing::debug;

use crate::rig::{params, MotionCurve, MotionPlayer};

const DISABLED_PREFIX: char = '_';

/// Disable the eye-ball curves of one clip. Returns how many were renamed.
pub fn patch_eye_ball_curves(curves: &mut [MotionCurve]) -> usize {
    let mut patched = 0;
    for curve in curves.iter_mut() {
        if curve.id.is_empty() || curve.id.starts_with(DISABLED_PREFIX) {
            continue;
        }
        if params::EYE_BALL_CURVES.contains(&curve.id.as_str()) {
            let original = std::mem::take(&mut curve.id);
            curve.id = format!("{}{}", DISABLED_PREFIX, original);
            curve.original_id = Some(original);
            patched += 1;
        }
    }
    patched
}

/// Patch every loaded clip of the rig's idle group.
pub fn patch_idle_motions<M: MotionPlayer + ?Sized>(player: &mut M) -> usize {
    let idle = player.idle_group();
    let mut patched = 0;
    player.with_group_curves(&idle, &mut |curves| {
        patched += patch_eye_ball_curves(curves);
    });
    if patched > 0 {
        debug!("[Motion] Disabled {} eye-ball curves in '{}'", patched, idle);
    }
    patched
}
