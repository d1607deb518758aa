//! Gesture Classifier — taps and flicks on the character.
//!
//! A press is captured on pointer-down and classified on release. Each
//! recognised gesture maps to a motion clip; the clip is requested and
//! forgotten, completion is tracked elsewhere.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::GestureConfig;
use crate::gaze::Rect;
use crate::rig::HitTester;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap { body: bool },
    FlickUp,
    FlickDown,
    Flick { body: bool },
}

impl Gesture {
    pub fn motion_group(&self) -> &'static str {
        match self {
            Gesture::Tap { body: true } => "Tap@Body",
            Gesture::Tap { body: false } => "Tap",
            Gesture::FlickUp => "FlickUp",
            Gesture::FlickDown => "FlickDown",
            Gesture::Flick { body: true } => "Flick@Body",
            Gesture::Flick { body: false } => "Flick",
        }
    }

    /// Clip to start. A general tap picks one of its two clips at random.
    pub fn motion_request<R: Rng + ?Sized>(&self, rng: &mut R) -> (&'static str, usize) {
        let index = match self {
            Gesture::Tap { body: false } => rng.gen_range(0..2),
            _ => 0,
        };
        (self.motion_group(), index)
    }
}

/// Where and when the pointer went down (client pixels, seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub x: f32,
    pub y: f32,
    pub at: f64,
}

/// Classify a completed press. `body_hit` is whether the release point lies
/// on the body hit region.
pub fn classify(
    config: &GestureConfig,
    press: &PointerPress,
    x: f32,
    y: f32,
    now: f64,
    body_hit: bool,
) -> Option<Gesture> {
    let dx = x - press.x;
    let dy = y - press.y;
    let dist = (dx * dx + dy * dy).sqrt();
    let elapsed = now - press.at;

    if elapsed >= config.flick_time_secs {
        return None;
    }
    if dist < config.flick_distance_px {
        return Some(Gesture::Tap { body: body_hit });
    }

    // Screen Y grows downward, so negative dy is an upward flick.
    if dy.abs() > dx.abs() {
        if dy < 0.0 {
            Some(Gesture::FlickUp)
        } else {
            Some(Gesture::FlickDown)
        }
    } else {
        Some(Gesture::Flick { body: body_hit })
    }
}

pub struct GestureClassifier {
    config: GestureConfig,
    press: Option<PointerPress>,
    rng: StdRng,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(config: GestureConfig, seed: u64) -> Self {
        Self {
            config,
            press: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, now: f64) {
        self.press = Some(PointerPress { x, y, at: now });
    }

    /// Classify the release at client point `(x, y)`. The hit test is done in
    /// canvas-local coordinates (`rect` is the canvas on screen).
    pub fn pointer_up<H: HitTester + ?Sized>(
        &mut self,
        hits: &H,
        rect: &Rect,
        x: f32,
        y: f32,
        now: f64,
    ) -> Option<Gesture> {
        let press = self.press.take()?;
        let body_hit = hits
            .hit_test(x - rect.left, y - rect.top)
            .iter()
            .any(|region| *region == self.config.body_region);

        let gesture = classify(&self.config, &press, x, y, now, body_hit);
        if let Some(g) = gesture {
            debug!("[Gesture] {:?} ({:.0}ms)", g, (now - press.at) * 1000.0);
        }
        gesture
    }

    /// Drop a pending press (pointer left the surface).
    pub fn cancel(&mut self) {
        self.press = None;
    }

    pub fn motion_request(&mut self, gesture: Gesture) -> (&'static str, usize) {
        gesture.motion_request(&mut self.rng)
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
