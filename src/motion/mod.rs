pub mod catalog;
pub mod patches;
pub mod tracker;

pub use catalog::{MotionCatalog, MotionDef};
pub use patches::{patch_eye_ball_curves, patch_idle_motions};
pub use tracker::{ActiveMotion, MotionTracker};
