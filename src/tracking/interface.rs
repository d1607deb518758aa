//! Face-Tracking Backend Interface
//!
//! The face tracker (camera capture + head-pose network) is an external
//! library. A backend wraps it behind [`FaceTracker`]; tracking results flow
//! back through a [`TrackSink`] handed over at init.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::VideoSettings;
use crate::error::TrackingError;

// ── Core Data Structures ────────────────────────────────

/// One tracking result from the face tracker.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackState {
    /// Detection confidence, 0..1.
    pub detected: f32,
    /// Head pitch (radians).
    pub rx: f32,
    /// Head yaw (radians).
    pub ry: f32,
    /// Head roll (radians).
    pub rz: f32,
}

/// Parameters passed to the backend's init.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerInitConfig {
    /// Id of the canvas surface the tracker renders its video into.
    pub canvas_id: String,
    pub network_path: String,
    pub video: VideoSettings,
}

/// Callback target for per-frame tracking results.
#[derive(Clone)]
pub struct TrackSink {
    deliver: Arc<dyn Fn(TrackState) + Send + Sync>,
}

impl TrackSink {
    pub fn new(deliver: impl Fn(TrackState) + Send + Sync + 'static) -> Self {
        Self {
            deliver: Arc::new(deliver),
        }
    }

    pub fn send(&self, state: TrackState) {
        (self.deliver)(state)
    }
}

impl fmt::Debug for TrackSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackSink").finish_non_exhaustive()
    }
}

// ── Backend Trait ───────────────────────────────────────

#[async_trait]
pub trait FaceTracker: Send + Sync {
    /// Backend identifier, used in logs.
    fn id(&self) -> &str;

    /// Start the camera and the tracking network. Resolves once the tracker
    /// is ready (or failed); results are delivered to `sink` from then on.
    async fn init(&self, config: &TrackerInitConfig, sink: TrackSink) -> Result<(), TrackingError>;

    /// Tear down the tracker instance and release the camera.
    fn destroy(&self);
}
