//! Animator configuration and the shared JSON load/save helpers.
//!
//! Every section is optional in the file; missing fields take the tuned
//! defaults below.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::ConfigError;

/// Generic load for any Serde config type with a `Default` implementation.
/// Falls back to `T::default()` if the file is missing or unparsable.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(config) => {
                info!("[{}] Loaded config from {}", label, path.display());
                config
            }
            Err(e) => {
                warn!(
                    "[{}] Failed to parse config {}: {} — using defaults",
                    label,
                    path.display(),
                    e
                );
                T::default()
            }
        },
        Err(_) => {
            info!(
                "[{}] No config file at {} — using defaults",
                label,
                path.display()
            );
            T::default()
        }
    }
}

/// Generic save for any Serde config type.
pub fn save_json_config<T: Serialize>(path: &Path, config: &T, label: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    info!("[{}] Saved config to {}", label, path.display());
    Ok(())
}

// ── Sections ───────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    pub expression: ExpressionConfig,
    pub saccade: SaccadeConfig,
    pub drag: DragConfig,
    pub gesture: GestureConfig,
    pub camera: CameraConfig,
}

impl AnimatorConfig {
    pub fn load(path: &Path) -> Self {
        load_json_config(path, "Animator")
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_json_config(path, self, "Animator")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionConfig {
    /// Weight units per second; 4.0 fades 0→1 in 250 ms.
    pub fade_rate: f32,
    /// Names that mean "no expression" when passed to `set_expression`.
    pub neutral_names: Vec<String>,
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self {
            fade_rate: 4.0,
            neutral_names: vec!["normal".to_string(), "neutral".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaccadeConfig {
    pub enabled: bool,
    /// Scale applied to the target before handing it to the rig's focus controller.
    pub focus_amplitude: f32,
    /// Per-tick lerp factor pulling the raw eye-ball parameters toward the target.
    pub eye_follow: f32,
    /// Vertical target range; biased low so idle gaze never drifts far upward.
    pub vertical_range: (f32, f32),
}

impl Default for SaccadeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            focus_amplitude: 0.5,
            eye_follow: 0.3,
            vertical_range: (-1.0, 0.7),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Head rotation in degrees at a full-width drag.
    pub head_range: f32,
    /// Body yaw in degrees at a full-width drag.
    pub body_range: f32,
    pub engage_rate: f32,
    pub release_rate: f32,
    pub drag_track_rate: f32,
    pub return_track_rate: f32,
    /// Below this blend weight the drag contributes nothing and resets.
    pub weight_threshold: f32,
    pub wind_enabled: bool,
    /// Wind per unit of normalised pointer velocity (units/s).
    pub wind_gain: f32,
    pub wind_max_strength: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            head_range: 30.0,
            body_range: 10.0,
            engage_rate: 10.0,
            release_rate: 3.0,
            drag_track_rate: 8.0,
            return_track_rate: 4.0,
            weight_threshold: 0.001,
            wind_enabled: true,
            wind_gain: 0.05,
            wind_max_strength: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pointer travel (px) below which a quick release counts as a tap.
    pub flick_distance_px: f32,
    /// Max press duration (seconds) for either a tap or a flick.
    pub flick_time_secs: f64,
    /// Hit region that selects the body variants of tap/flick.
    pub body_region: String,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            flick_distance_px: 30.0,
            flick_time_secs: 0.4,
            body_region: "Body".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub yaw_sensitivity: f32,
    pub pitch_sensitivity: f32,
    /// Detection confidence below this is treated as "no face".
    pub detection_threshold: f32,
    pub network_path: String,
    pub video: VideoSettings,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw_sensitivity: 2.5,
            pitch_sensitivity: 2.0,
            detection_threshold: 0.5,
            network_path: "https://cdn.jsdelivr.net/gh/jeeliz/jeelizFaceFilter@master/neuralNets/"
                .to_string(),
            video: VideoSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub facing_mode: String,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            ideal_width: 320,
            ideal_height: 240,
            max_width: 320,
            max_height: 240,
            facing_mode: "user".to_string(),
        }
    }
}
