//! Drag Physics — head and body follow a held pointer.
//!
//! Two first-order filters: the blend weight engages fast and releases
//! slowly, and the smoothed position tracks the pointer fast while held and
//! drifts back to centre more slowly once released. Both use
//! [`exp_factor`] so the feel is the same at any frame rate.

use crate::config::DragConfig;
use crate::gaze::{normalize_pointer, Rect};
use crate::utils::math::exp_factor;

/// Frame time assumed on the first tick after a reset.
const FIRST_TICK_DT: f32 = 1.0 / 60.0;

/// One frame's drag contribution. Angles are in degrees and must be blended
/// over the motion's values by `weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutput {
    pub angle_x: f32,
    pub angle_y: f32,
    pub body_angle_x: f32,
    pub weight: f32,
    /// Force for the rig's secondary physics, from the smoothed pointer velocity.
    pub wind: (f32, f32),
}

#[derive(Debug, Clone)]
pub struct DragPhysics {
    config: DragConfig,
    target_x: f32,
    target_y: f32,
    smooth_x: f32,
    smooth_y: f32,
    weight: f32,
    dragging: bool,
    last_time: Option<f64>,
}

impl DragPhysics {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            target_x: 0.0,
            target_y: 0.0,
            smooth_x: 0.0,
            smooth_y: 0.0,
            weight: 0.0,
            dragging: false,
            last_time: None,
        }
    }

    pub fn pointer_down(&mut self, rect: &Rect, x: f32, y: f32) {
        self.dragging = true;
        self.set_target(rect, x, y);
    }

    /// Ignored unless a drag is in progress.
    pub fn pointer_move(&mut self, rect: &Rect, x: f32, y: f32) {
        if self.dragging {
            self.set_target(rect, x, y);
        }
    }

    /// Release (pointer up or leaving the surface): spring back to centre.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.target_x = 0.0;
        self.target_y = 0.0;
    }

    fn set_target(&mut self, rect: &Rect, x: f32, y: f32) {
        let target = normalize_pointer(rect, x, y);
        self.target_x = target.x;
        self.target_y = target.y;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Advance both filters to `now` (seconds).
    ///
    /// Returns `None` when the drag has fully relaxed. `None` means "no
    /// contribution" and must not be applied as zero angles.
    pub fn update(&mut self, now: f64) -> Option<DragOutput> {
        let dt = match self.last_time {
            Some(last) => (now - last).max(0.0) as f32,
            None => FIRST_TICK_DT,
        };
        self.last_time = Some(now);

        let (target_weight, weight_rate) = if self.dragging {
            (1.0, self.config.engage_rate)
        } else {
            (0.0, self.config.release_rate)
        };
        self.weight += (target_weight - self.weight) * exp_factor(weight_rate, dt);

        let track_rate = if self.dragging {
            self.config.drag_track_rate
        } else {
            self.config.return_track_rate
        };
        let k = exp_factor(track_rate, dt);
        let (prev_x, prev_y) = (self.smooth_x, self.smooth_y);
        self.smooth_x += (self.target_x - self.smooth_x) * k;
        self.smooth_y += (self.target_y - self.smooth_y) * k;

        if self.weight < self.config.weight_threshold {
            self.reset();
            return None;
        }

        let wind = if self.config.wind_enabled && dt > 0.0 {
            self.wind((self.smooth_x - prev_x) / dt, (self.smooth_y - prev_y) / dt)
        } else {
            (0.0, 0.0)
        };

        Some(DragOutput {
            angle_x: self.smooth_x * self.config.head_range,
            angle_y: -self.smooth_y * self.config.head_range,
            body_angle_x: self.smooth_x * self.config.body_range,
            weight: self.weight,
            wind,
        })
    }

    /// Velocity to wind, Y flipped into rig space, capped at the configured strength.
    fn wind(&self, vx: f32, vy: f32) -> (f32, f32) {
        let (wx, wy) = (vx * self.config.wind_gain, -vy * self.config.wind_gain);
        let strength = (wx * wx + wy * wy).sqrt();
        let max = self.config.wind_max_strength;
        if strength > max && strength > 0.0 {
            let scale = max / strength;
            (wx * scale, wy * scale)
        } else {
            (wx, wy)
        }
    }

    /// Back to exact rest. A drag in progress is kept.
    fn reset(&mut self) {
        self.weight = 0.0;
        self.smooth_x = 0.0;
        self.smooth_y = 0.0;
        self.last_time = None;
    }
}

impl Default for DragPhysics {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}
