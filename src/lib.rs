pub mod config;
pub mod controller;
pub mod emotion;
pub mod error;
pub mod expression;
pub mod gaze;
pub mod interaction;
pub mod motion;
pub mod rig;
pub mod tracking;
pub mod utils;

pub use config::AnimatorConfig;
pub use controller::CharacterController;
pub use emotion::{apply_emotion_update, resolve_expression, EmotionCommand, EmotionUpdate};
pub use error::{CatalogError, ConfigError, TrackingError};
pub use expression::{Expression, ExpressionCatalog};
pub use gaze::{resolve_gaze, GazeVector, Rect};
pub use motion::{ActiveMotion, MotionCatalog};
pub use rig::{MemoryRig, Rig};
pub use tracking::{CameraTrackingStatus, FaceTracker};

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
