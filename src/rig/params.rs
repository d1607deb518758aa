//! Standard Cubism parameter ids written by the animation core.
//!
//! Rigs are free to omit any of these; writes to an unknown id are dropped by
//! the rig and reads return `None`.

pub const ANGLE_X: &str = "ParamAngleX";
pub const ANGLE_Y: &str = "ParamAngleY";
pub const ANGLE_Z: &str = "ParamAngleZ";
pub const BODY_ANGLE_X: &str = "ParamBodyAngleX";
pub const BODY_ANGLE_Y: &str = "ParamBodyAngleY";
pub const EYE_BALL_X: &str = "ParamEyeBallX";
pub const EYE_BALL_Y: &str = "ParamEyeBallY";
pub const MOUTH_OPEN_Y: &str = "ParamMouthOpenY";

/// Curves the idle motions must not drive, so gaze and saccade own the eyes.
pub const EYE_BALL_CURVES: [&str; 2] = [EYE_BALL_X, EYE_BALL_Y];
