//! Camera Tracking — face-tracker lifecycle and head-pose → gaze mapping.
//!
//! Status goes `off → requesting → active`, or `requesting → error`.
//! Every `stop()` advances an epoch. A start or track callback that belongs
//! to an older epoch is dropped, so a slow init finishing after `stop()`
//! can neither flip the status back to `active` nor feed a stale gaze.

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use super::interface::{FaceTracker, TrackSink, TrackState, TrackerInitConfig};
use crate::config::CameraConfig;
use crate::error::TrackingError;
use crate::gaze::CameraGaze;
use crate::utils::math::clamp_unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraTrackingStatus {
    #[default]
    Off,
    Requesting,
    Active,
    Error,
}

/// Head pose → eye direction. Below the detection threshold there is no face
/// and therefore no gaze.
pub fn map_track(config: &CameraConfig, state: &TrackState) -> Option<CameraGaze> {
    if state.detected < config.detection_threshold {
        return None;
    }
    Some(CameraGaze {
        eye_x: clamp_unit(-state.ry * config.yaw_sensitivity),
        eye_y: clamp_unit(state.rx * config.pitch_sensitivity),
    })
}

struct Shared {
    status: Mutex<CameraTrackingStatus>,
    gaze: Mutex<Option<CameraGaze>>,
    epoch: AtomicU64,
    /// Bumped by every `start`, so a stale completion can tell whether a
    /// newer start now owns the backend.
    starts: AtomicU64,
    enabled: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle to the camera tracking state. Clones observe the same state.
#[derive(Clone)]
pub struct CameraTracker {
    backend: Option<Arc<dyn FaceTracker>>,
    config: CameraConfig,
    shared: Arc<Shared>,
}

impl CameraTracker {
    pub fn new(config: CameraConfig, backend: Option<Arc<dyn FaceTracker>>) -> Self {
        Self {
            backend,
            config,
            shared: Arc::new(Shared {
                status: Mutex::new(CameraTrackingStatus::Off),
                gaze: Mutex::new(None),
                epoch: AtomicU64::new(0),
                starts: AtomicU64::new(0),
                enabled: AtomicBool::new(false),
            }),
        }
    }

    pub fn status(&self) -> CameraTrackingStatus {
        *lock(&self.shared.status)
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::SeqCst)
    }

    /// Latest camera gaze, only while tracking is enabled.
    pub fn gaze(&self) -> Option<CameraGaze> {
        if !self.is_enabled() {
            return None;
        }
        *lock(&self.shared.gaze)
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Record a failure that happened before a start could be issued
    /// (e.g. no capture surface).
    pub fn fail(&self, error: &TrackingError) {
        warn!("[Camera] {}", error);
        self.shared.enabled.store(false, Ordering::SeqCst);
        *lock(&self.shared.status) = CameraTrackingStatus::Error;
        *lock(&self.shared.gaze) = None;
    }

    /// Begin tracking into the canvas `canvas_id`.
    ///
    /// The status is `requesting` as soon as this returns; the returned
    /// future resolves when the backend is ready. Only one start may be in
    /// flight at a time.
    pub fn start(&self, canvas_id: &str) -> BoxFuture<'static, Result<(), TrackingError>> {
        let Some(backend) = self.backend.clone() else {
            self.fail(&TrackingError::LibraryUnavailable);
            return futures::future::ready(Err(TrackingError::LibraryUnavailable)).boxed();
        };

        let (epoch, start_seq) = {
            let mut status = lock(&self.shared.status);
            *status = CameraTrackingStatus::Requesting;
            self.shared.enabled.store(true, Ordering::SeqCst);
            let start_seq = self.shared.starts.fetch_add(1, Ordering::SeqCst) + 1;
            (self.shared.epoch.load(Ordering::SeqCst), start_seq)
        };
        info!("[Camera] Requesting camera via '{}'", backend.id());

        let init_config = TrackerInitConfig {
            canvas_id: canvas_id.to_string(),
            network_path: self.config.network_path.clone(),
            video: self.config.video.clone(),
        };
        let sink = self.sink(epoch);
        let shared = self.shared.clone();

        async move {
            let result = backend.init(&init_config, sink).await;

            let stale = {
                let mut status = lock(&shared.status);
                if shared.epoch.load(Ordering::SeqCst) != epoch {
                    // Once a newer start has re-initialised the backend it owns
                    // the instance, so only tear down if this was the last start.
                    if result.is_ok() && shared.starts.load(Ordering::SeqCst) == start_seq {
                        backend.destroy();
                    }
                    true
                } else {
                    match &result {
                        Ok(()) => *status = CameraTrackingStatus::Active,
                        Err(_) => {
                            *status = CameraTrackingStatus::Error;
                            shared.enabled.store(false, Ordering::SeqCst);
                            *lock(&shared.gaze) = None;
                        }
                    }
                    false
                }
            };

            if stale {
                debug!("[Camera] Init finished after stop, discarding");
                return Err(TrackingError::Superseded);
            }

            match &result {
                Ok(()) => info!("[Camera] Tracking active"),
                Err(e) => warn!("[Camera] {}", e),
            }
            result
        }
        .boxed()
    }

    /// Stop tracking. Tears down the tracker if it is running, cancels any
    /// pending start and clears the cached gaze.
    pub fn stop(&self) {
        let was_active = {
            let mut status = lock(&self.shared.status);
            self.shared.epoch.fetch_add(1, Ordering::SeqCst);
            self.shared.enabled.store(false, Ordering::SeqCst);
            let was_active = *status == CameraTrackingStatus::Active;
            *status = CameraTrackingStatus::Off;
            was_active
        };
        *lock(&self.shared.gaze) = None;

        if was_active {
            if let Some(backend) = &self.backend {
                backend.destroy();
            }
        }
        info!("[Camera] Tracking stopped");
    }

    fn sink(&self, epoch: u64) -> TrackSink {
        let shared = self.shared.clone();
        let config = self.config.clone();
        TrackSink::new(move |state| {
            if shared.epoch.load(Ordering::SeqCst) != epoch {
                return;
            }
            *lock(&shared.gaze) = map_track(&config, &state);
        })
    }
}
