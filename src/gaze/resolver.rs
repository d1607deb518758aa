//! Gaze source resolution and pointer normalisation.
//!
//! Priority is camera > pointer > none. `None` hands the eyes to the idle
//! saccade scheduler.

use serde::{Deserialize, Serialize};

use crate::utils::math::clamp_unit;

/// Normalised eye direction, both axes in [-1, 1], rig convention (+y is up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GazeVector {
    pub x: f32,
    pub y: f32,
}

impl GazeVector {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Eye direction derived from the camera's head-rotation estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraGaze {
    pub eye_x: f32,
    pub eye_y: f32,
}

/// Axis-aligned screen rectangle (CSS pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

/// Map a screen point into `[-1, 1]²` relative to `rect`: centre → (0, 0),
/// top-left → (-1, -1), bottom-right → (1, 1). Screen orientation is kept;
/// no axis is inverted here.
pub fn normalize_pointer(rect: &Rect, px: f32, py: f32) -> GazeVector {
    let axis = |p: f32, start: f32, len: f32| {
        if len <= 0.0 {
            return 0.0;
        }
        clamp_unit((p - start) / len * 2.0 - 1.0)
    };
    GazeVector {
        x: axis(px, rect.left, rect.width),
        y: axis(py, rect.top, rect.height),
    }
}

/// Pick the authoritative gaze for this frame.
///
/// Camera values pass through unchanged. Pointer gaze has its Y inverted:
/// screen Y grows downward but the rig's up is positive, and pointing low
/// must make the character look down.
pub fn resolve_gaze(camera: Option<CameraGaze>, pointer: Option<GazeVector>) -> Option<GazeVector> {
    if let Some(camera) = camera {
        return Some(GazeVector::new(camera.eye_x, camera.eye_y));
    }
    pointer.map(|p| GazeVector::new(p.x, -p.y))
}
