pub mod camera;
pub mod interface;

pub use camera::{map_track, CameraTracker, CameraTrackingStatus};
pub use interface::{FaceTracker, TrackSink, TrackState, TrackerInitConfig};
