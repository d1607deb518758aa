//! Active-motion tracking.
//!
//! Remembers the last non-idle clip that was started and forgets it once the
//! rig falls back to idle. Idle starts get their eye-ball curves patched,
//! since the rig may load idle clips lazily.

use serde::{Deserialize, Serialize};

use super::patches::patch_idle_motions;
use crate::rig::MotionPlayer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMotion {
    pub group: String,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct MotionTracker {
    active: Option<ActiveMotion>,
    prev_is_idle: bool,
}

impl MotionTracker {
    pub fn new() -> Self {
        Self {
            active: None,
            prev_is_idle: true,
        }
    }

    /// Observe a clip start on `player`.
    pub fn on_motion_start<M: MotionPlayer + ?Sized>(&mut self, player: &mut M, group: &str, index: usize) {
        if group == player.idle_group() {
            patch_idle_motions(player);
        } else {
            self.active = Some(ActiveMotion {
                group: group.to_string(),
                index,
            });
        }
    }

    /// Per-frame check. Returns whether the rig is idle (idle group or nothing
    /// playing); the active motion is cleared on the transition into idle.
    pub fn observe_frame<M: MotionPlayer + ?Sized>(&mut self, player: &M) -> bool {
        let is_idle = match player.current_group() {
            None => true,
            Some(group) => group == player.idle_group(),
        };
        if is_idle && !self.prev_is_idle {
            self.active = None;
        }
        self.prev_is_idle = is_idle;
        is_idle
    }

    pub fn active(&self) -> Option<&ActiveMotion> {
        self.active.as_ref()
    }
}

impl Default for MotionTracker {
    fn default() -> Self {
        Self::new()
    }
}
