pub mod resolver;
pub mod saccade;

pub use resolver::{normalize_pointer, resolve_gaze, CameraGaze, GazeVector, Rect};
pub use saccade::{random_saccade_interval, IdleSaccade};
