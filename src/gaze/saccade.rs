//! Idle saccades — autonomous eye-target changes while nothing drives the gaze.
//!
//! The target is handed to the rig's focus controller at reduced amplitude
//! so its own interpolation produces the overshoot and settle. The raw
//! eye-ball parameters are then pulled toward the target a little each tick
//! as a second smoothing layer.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::resolver::GazeVector;
use crate::config::SaccadeConfig;
use crate::rig::{params, FocusController, ParameterStore};
use crate::utils::math::lerp;

struct IntervalBucket {
    min_ms: u64,
    max_ms: u64,
    weight: u32,
}

/// Fixation durations: mostly 0.8–2.5 s, with occasional quick glances and
/// long stares.
static INTERVAL_BUCKETS: [IntervalBucket; 6] = [
    IntervalBucket { min_ms: 80, max_ms: 400, weight: 8 },
    IntervalBucket { min_ms: 400, max_ms: 800, weight: 20 },
    IntervalBucket { min_ms: 800, max_ms: 1500, weight: 30 },
    IntervalBucket { min_ms: 1500, max_ms: 2500, weight: 24 },
    IntervalBucket { min_ms: 2500, max_ms: 3500, weight: 12 },
    IntervalBucket { min_ms: 3500, max_ms: 4800, weight: 6 },
];

/// Time until the next saccade. Always positive and under five seconds.
pub fn random_saccade_interval<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    let bucket = INTERVAL_BUCKETS
        .choose_weighted(rng, |b| b.weight)
        .unwrap_or(&INTERVAL_BUCKETS[2]);
    Duration::from_millis(rng.gen_range(bucket.min_ms..bucket.max_ms))
}

pub struct IdleSaccade {
    config: SaccadeConfig,
    /// Seconds, rig clock.
    next_change_at: f64,
    last_change_at: f64,
    target: GazeVector,
    rng: StdRng,
}

impl IdleSaccade {
    pub fn new(config: SaccadeConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic scheduler for replays and tests.
    pub fn with_seed(config: SaccadeConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SaccadeConfig, rng: StdRng) -> Self {
        Self {
            config,
            next_change_at: f64::NEG_INFINITY,
            last_change_at: f64::NEG_INFINITY,
            target: GazeVector::default(),
            rng,
        }
    }

    /// One idle tick at rig time `now` (seconds).
    ///
    /// A clock that jumped backward is treated as a reset and picks a new target.
    pub fn update<R>(&mut self, rig: &mut R, now: f64)
    where
        R: ParameterStore + FocusController + ?Sized,
    {
        if now >= self.next_change_at || now < self.last_change_at {
            let (low, high) = self.config.vertical_range;
            let y = if low < high { self.rng.gen_range(low..high) } else { low };
            self.target = GazeVector::new(self.rng.gen_range(-1.0..1.0), y);
            self.last_change_at = now;
            self.next_change_at = now + random_saccade_interval(&mut self.rng).as_secs_f64();

            let amp = self.config.focus_amplitude;
            rig.focus(self.target.x * amp, self.target.y * amp, false);
        }

        rig.update_focus((now - self.last_change_at) as f32);

        let follow = self.config.eye_follow;
        for (id, target) in [(params::EYE_BALL_X, self.target.x), (params::EYE_BALL_Y, self.target.y)] {
            if let Some(current) = rig.parameter(id) {
                rig.set_parameter(id, lerp(current, target, follow));
            }
        }
    }

    pub fn target(&self) -> GazeVector {
        self.target
    }

    pub fn next_change_at(&self) -> f64 {
        self.next_change_at
    }
}
