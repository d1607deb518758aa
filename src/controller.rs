//! Character Controller — one per character session.
//!
//! Owns all animation state (expression fade, saccade schedule, drag filters,
//! camera tracking, active motion) and exposes the application API. The host
//! calls [`CharacterController::update`] once per rendered frame from the
//! rig's update hook, after motions have been evaluated and before
//! parameters are committed.
//!
//! Frame order is fixed: gaze (or idle saccade), then drag physics, then the
//! expression blend. Later stages build on what earlier ones wrote.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::config::AnimatorConfig;
use crate::emotion::EmotionCommand;
use crate::error::TrackingError;
use crate::expression::{ExpressionAnimator, ExpressionCatalog};
use crate::gaze::{normalize_pointer, resolve_gaze, GazeVector, IdleSaccade, Rect};
use crate::interaction::{DragOutput, DragPhysics, Gesture, GestureClassifier};
use crate::motion::{patch_idle_motions, ActiveMotion, MotionCatalog, MotionTracker};
use crate::rig::{params, MotionPlayer, MotionPriority, ParameterStore, Rig};
use crate::tracking::{CameraTracker, CameraTrackingStatus, FaceTracker};
use crate::utils::math::{clamp, lerp};

pub struct CharacterController {
    config: AnimatorConfig,
    expressions: ExpressionCatalog,
    motions: MotionCatalog,
    animator: ExpressionAnimator,
    saccade: IdleSaccade,
    drag: DragPhysics,
    gestures: GestureClassifier,
    camera: CameraTracker,
    motion_tracker: MotionTracker,
    /// Canvas bounds on screen; pointer input is normalised against it.
    canvas: Rect,
    pointer_gaze: Option<GazeVector>,
    auto_saccade: bool,
    wind_applied: bool,
    motion_groups: HashMap<String, usize>,
    last_emotion: Option<EmotionCommand>,
    loaded: bool,
}

impl CharacterController {
    pub fn new(config: AnimatorConfig, expressions: ExpressionCatalog) -> Self {
        Self {
            animator: ExpressionAnimator::new(&config.expression),
            saccade: IdleSaccade::new(config.saccade.clone()),
            drag: DragPhysics::new(config.drag.clone()),
            gestures: GestureClassifier::new(config.gesture.clone()),
            camera: CameraTracker::new(config.camera.clone(), None),
            motion_tracker: MotionTracker::new(),
            canvas: Rect::default(),
            pointer_gaze: None,
            auto_saccade: config.saccade.enabled,
            wind_applied: false,
            motion_groups: HashMap::new(),
            last_emotion: None,
            loaded: false,
            motions: MotionCatalog::default(),
            expressions,
            config,
        }
    }

    /// Controller for the built-in Hiyori character.
    pub fn hiyori(config: AnimatorConfig) -> Self {
        Self::new(config, ExpressionCatalog::hiyori()).with_motions(MotionCatalog::hiyori())
    }

    pub fn with_motions(mut self, motions: MotionCatalog) -> Self {
        self.motions = motions;
        self
    }

    /// Register the face-tracking library used by camera tracking.
    pub fn with_face_tracker(mut self, backend: Arc<dyn FaceTracker>) -> Self {
        self.camera = CameraTracker::new(self.config.camera.clone(), Some(backend));
        self
    }

    /// Seed the random sources (saccade timing, tap clip choice) for replays.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.saccade = IdleSaccade::with_seed(self.config.saccade.clone(), seed);
        self.gestures = GestureClassifier::with_seed(self.config.gesture.clone(), seed.wrapping_add(1));
        self
    }

    // ── Lifecycle ──────────────────────────────────────

    /// Bind to a freshly loaded rig: patch idle motions and read its motion groups.
    pub fn attach<R: Rig + ?Sized>(&mut self, rig: &mut R, canvas: Rect) {
        patch_idle_motions(rig);
        self.motion_groups = rig.motion_groups();
        self.canvas = canvas;
        self.loaded = true;
        info!(
            "[Character] Attached rig ({} parameters, {} motion groups)",
            rig.parameter_ids().len(),
            self.motion_groups.len()
        );
    }

    /// Unbind from the rig and stop camera tracking.
    pub fn detach(&mut self) {
        self.camera.stop();
        self.loaded = false;
        self.pointer_gaze = None;
        self.drag.pointer_up();
        self.gestures.cancel();
        self.animator.reset();
        self.motion_groups.clear();
        info!("[Character] Detached");
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_canvas_rect(&mut self, canvas: Rect) {
        self.canvas = canvas;
    }

    // ── Per-frame hook ─────────────────────────────────

    /// Run one frame at rig time `now` (seconds).
    pub fn update<R: Rig + ?Sized>(&mut self, rig: &mut R, now: f64) {
        if !self.loaded {
            return;
        }

        let is_idle = self.motion_tracker.observe_frame(&*rig);

        match resolve_gaze(self.camera.gaze(), self.pointer_gaze) {
            Some(gaze) => {
                rig.set_parameter(params::EYE_BALL_X, gaze.x);
                rig.set_parameter(params::EYE_BALL_Y, gaze.y);
            }
            None if is_idle && self.auto_saccade => self.saccade.update(rig, now),
            None => {}
        }

        match self.drag.update(now) {
            Some(out) => self.apply_drag(rig, &out),
            None if self.wind_applied => {
                rig.set_wind(0.0, 0.0);
                self.wind_applied = false;
            }
            None => {}
        }

        self.animator.update(rig, now);
        trace!(
            "[Character] frame {:.3} idle={} expr={:.2}",
            now,
            is_idle,
            self.animator.current_weight()
        );
    }

    fn apply_drag<R: Rig + ?Sized>(&mut self, rig: &mut R, out: &DragOutput) {
        for (id, value) in [
            (params::ANGLE_X, out.angle_x),
            (params::ANGLE_Y, out.angle_y),
            (params::BODY_ANGLE_X, out.body_angle_x),
        ] {
            if let Some(current) = rig.parameter(id) {
                rig.set_parameter(id, lerp(current, value, out.weight));
            }
        }
        if self.config.drag.wind_enabled {
            rig.set_wind(out.wind.0, out.wind.1);
            self.wind_applied = true;
        }
    }

    // ── Expressions ────────────────────────────────────

    /// Fade to expression `name` at `weight`. Neutral or unknown names fade out.
    pub fn set_expression(&mut self, name: &str, weight: f32) {
        self.animator.set_expression(&self.expressions, name, weight);
    }

    pub fn clear_expression(&mut self) {
        self.animator.clear_expression();
    }

    pub fn expression(&self) -> Option<&str> {
        self.animator.current_name()
    }

    pub fn expression_weight(&self) -> f32 {
        self.animator.current_weight()
    }

    pub fn expressions(&self) -> &ExpressionCatalog {
        &self.expressions
    }

    pub(crate) fn record_emotion_command(&mut self, command: Option<EmotionCommand>) {
        self.last_emotion = command;
    }

    /// Result of the most recent emotion update, including its fatigue overlay.
    pub fn last_emotion_command(&self) -> Option<&EmotionCommand> {
        self.last_emotion.as_ref()
    }

    // ── Motions ────────────────────────────────────────

    /// Start a clip. Fire-and-forget; see [`active_motion`](Self::active_motion).
    pub fn play_motion<M: MotionPlayer + ?Sized>(&mut self, rig: &mut M, group: &str, index: usize) -> bool {
        if !self.loaded {
            return false;
        }
        let started = rig.start_motion(group, index, MotionPriority::Normal);
        if started {
            self.motion_tracker.on_motion_start(rig, group, index);
        } else {
            debug!("[Motion] Rig declined '{}'[{}]", group, index);
        }
        started
    }

    /// Report a clip the rig started on its own (its idle loop, for instance).
    pub fn observe_motion_start<M: MotionPlayer + ?Sized>(&mut self, rig: &mut M, group: &str, index: usize) {
        self.motion_tracker.on_motion_start(rig, group, index);
    }

    pub fn active_motion(&self) -> Option<&ActiveMotion> {
        self.motion_tracker.active()
    }

    /// Clip counts per group of the attached rig.
    pub fn motion_groups(&self) -> &HashMap<String, usize> {
        &self.motion_groups
    }

    pub fn motions(&self) -> &MotionCatalog {
        &self.motions
    }

    // ── Direct parameter control ───────────────────────

    pub fn set_parameter<S: ParameterStore + ?Sized>(&self, rig: &mut S, id: &str, value: f32) {
        if self.loaded && rig.parameter(id).is_some() {
            rig.set_parameter(id, value);
        }
    }

    pub fn parameter<S: ParameterStore + ?Sized>(&self, rig: &S, id: &str) -> Option<f32> {
        if !self.loaded {
            return None;
        }
        rig.parameter(id)
    }

    pub fn parameter_names<S: ParameterStore + ?Sized>(&self, rig: &S) -> Vec<String> {
        if !self.loaded {
            return Vec::new();
        }
        rig.parameter_ids()
    }

    /// Head yaw, pitch and roll in degrees. Pass `z = 0.0` for no roll.
    pub fn set_head_rotation<S: ParameterStore + ?Sized>(&self, rig: &mut S, x: f32, y: f32, z: f32) {
        if !self.loaded {
            return;
        }
        rig.set_parameter(params::ANGLE_X, x);
        rig.set_parameter(params::ANGLE_Y, y);
        rig.set_parameter(params::ANGLE_Z, z);
    }

    pub fn set_body_rotation<S: ParameterStore + ?Sized>(&self, rig: &mut S, x: f32, y: f32) {
        if !self.loaded {
            return;
        }
        rig.set_parameter(params::BODY_ANGLE_X, x);
        rig.set_parameter(params::BODY_ANGLE_Y, y);
    }

    pub fn look_at<S: ParameterStore + ?Sized>(&self, rig: &mut S, x: f32, y: f32) {
        if !self.loaded {
            return;
        }
        rig.set_parameter(params::EYE_BALL_X, x);
        rig.set_parameter(params::EYE_BALL_Y, y);
    }

    /// Mouth opening, clamped to 0..1.
    pub fn set_mouth_open<S: ParameterStore + ?Sized>(&self, rig: &mut S, value: f32) {
        if !self.loaded {
            return;
        }
        rig.set_parameter(params::MOUTH_OPEN_Y, clamp(value, 0.0, 1.0));
    }

    // ── Gaze sources ───────────────────────────────────

    pub fn set_auto_saccade(&mut self, enabled: bool) {
        self.auto_saccade = enabled;
    }

    pub fn auto_saccade(&self) -> bool {
        self.auto_saccade
    }

    /// Turn camera tracking on or off.
    ///
    /// Enabling needs the id of the canvas the tracker renders into and a
    /// running tokio runtime; the start runs in a spawned task whose handle is
    /// returned. Enabling while a start is pending or tracking is active does
    /// nothing.
    pub fn set_camera_tracking(
        &mut self,
        enabled: bool,
        surface: Option<&str>,
    ) -> Option<JoinHandle<Result<(), TrackingError>>> {
        if !self.loaded {
            return None;
        }
        if !enabled {
            self.camera.stop();
            return None;
        }

        if matches!(
            self.camera.status(),
            CameraTrackingStatus::Requesting | CameraTrackingStatus::Active
        ) {
            debug!("[Camera] Start ignored, already {:?}", self.camera.status());
            return None;
        }
        let Some(canvas_id) = surface else {
            self.camera.fail(&TrackingError::MissingSurface);
            return None;
        };
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                self.camera
                    .fail(&TrackingError::InitFailed(format!("no async runtime: {}", e)));
                return None;
            }
        };

        let start = self.camera.start(canvas_id);
        Some(runtime.spawn(async move {
            let result = start.await;
            if let Err(e) = &result {
                warn!("[Camera] Start did not complete: {}", e);
            }
            result
        }))
    }

    pub fn camera_tracking_status(&self) -> CameraTrackingStatus {
        self.camera.status()
    }

    pub fn camera(&self) -> &CameraTracker {
        &self.camera
    }

    // ── Pointer input ──────────────────────────────────
    //
    // Coordinates are client pixels; `now` is seconds on the same clock as `update`.

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer_gaze = Some(normalize_pointer(&self.canvas, x, y));
        self.drag.pointer_move(&self.canvas, x, y);
    }

    /// Pointer left the surface: drop pointer gaze, release any drag.
    pub fn pointer_leave(&mut self) {
        self.pointer_gaze = None;
        self.drag.pointer_up();
        self.gestures.cancel();
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, now: f64) {
        if !self.loaded {
            return;
        }
        self.drag.pointer_down(&self.canvas, x, y);
        self.gestures.pointer_down(x, y, now);
    }

    /// Release: ends the drag and fires the recognised gesture's clip, if any.
    pub fn pointer_up<R: Rig + ?Sized>(&mut self, rig: &mut R, x: f32, y: f32, now: f64) -> Option<Gesture> {
        self.drag.pointer_up();
        if !self.loaded {
            self.gestures.cancel();
            return None;
        }
        let gesture = self.gestures.pointer_up(&*rig, &self.canvas, x, y, now)?;
        let (group, index) = self.gestures.motion_request(gesture);
        self.play_motion(rig, group, index);
        Some(gesture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::{apply_emotion_update, DiscreteEmotion, EmotionUpdate, Vad};
    use crate::expression::Expression;
    use crate::rig::{MemoryRig, MotionCurve};
    use crate::tracking::{TrackSink, TrackState, TrackerInitConfig};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const FRAME: f64 = 1.0 / 60.0;

    fn canvas() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 100.0)
    }

    fn rig() -> MemoryRig {
        let mut rig = MemoryRig::with_parameters([
            params::ANGLE_X,
            params::ANGLE_Y,
            params::ANGLE_Z,
            params::BODY_ANGLE_X,
            params::BODY_ANGLE_Y,
            params::EYE_BALL_X,
            params::EYE_BALL_Y,
            params::MOUTH_OPEN_Y,
            "ParamMouthForm",
        ]);
        rig.add_motion("Idle", vec![MotionCurve::new("ParamEyeBallX")]);
        rig.add_motion("Tap", vec![]);
        rig.add_motion("Tap", vec![]);
        rig.add_hit_region("Body", Rect::new(50.0, 50.0, 100.0, 50.0));
        rig
    }

    fn controller() -> CharacterController {
        let mut expressions = ExpressionCatalog::new();
        expressions.insert("smile", Expression::additive(&[("ParamMouthForm", 1.0)]));
        expressions.insert("cheerful", Expression::additive(&[("ParamMouthForm", 0.8)]));
        CharacterController::new(AnimatorConfig::default(), expressions).with_seed(42)
    }

    fn attached() -> (CharacterController, MemoryRig) {
        let mut c = controller();
        let mut r = rig();
        c.attach(&mut r, canvas());
        (c, r)
    }

    #[test]
    fn attach_patches_idle_clips_and_reads_groups() {
        let (c, r) = attached();
        assert!(c.is_loaded());
        assert_eq!(r.curves("Idle", 0).unwrap()[0].id, "_ParamEyeBallX");
        assert_eq!(c.motion_groups().get("Tap"), Some(&2));
    }

    #[test]
    fn detached_controller_ignores_frames_and_setters() {
        let mut c = controller();
        let mut r = rig();
        c.update(&mut r, 0.0);
        c.set_mouth_open(&mut r, 1.0);
        assert_eq!(r.focus_requests, 0);
        assert_eq!(r.parameter(params::MOUTH_OPEN_Y), Some(0.0));
        assert_eq!(c.parameter(&r, params::MOUTH_OPEN_Y), None);
        assert!(c.parameter_names(&r).is_empty());
    }

    #[test]
    fn pointer_gaze_drives_eyes_with_y_inverted() {
        let (mut c, mut r) = attached();
        c.pointer_move(200.0, 100.0);
        c.update(&mut r, 1.0);
        assert_eq!(r.parameter(params::EYE_BALL_X), Some(1.0));
        assert_eq!(r.parameter(params::EYE_BALL_Y), Some(-1.0));
        assert_eq!(r.focus_requests, 0);
    }

    #[test]
    fn saccade_runs_only_when_idle_without_gaze() {
        let (mut c, mut r) = attached();
        c.update(&mut r, 1.0);
        assert_eq!(r.focus_requests, 1);

        r.set_current_group(Some("Tap"));
        c.update(&mut r, 100.0);
        assert_eq!(r.focus_requests, 1);
        assert_eq!(r.focus_updates, 1);

        r.set_current_group(Some("Idle"));
        c.set_auto_saccade(false);
        c.update(&mut r, 200.0);
        assert_eq!(r.focus_updates, 1);
    }

    #[test]
    fn drag_turns_head_and_releases_back_to_motion_values() {
        let (mut c, mut r) = attached();
        c.pointer_down(200.0, 50.0, 0.0);
        let mut t = 0.0;
        for _ in 0..30 {
            c.update(&mut r, t);
            t += FRAME;
        }
        assert!(r.parameter(params::ANGLE_X).unwrap() > 0.0);
        assert!(r.parameter(params::BODY_ANGLE_X).unwrap() > 0.0);
        assert!(r.wind.0 != 0.0);

        c.pointer_up(&mut r, 200.0, 50.0, 5.0);
        for _ in 0..600 {
            r.set_parameter(params::ANGLE_X, 0.0);
            c.update(&mut r, t);
            t += FRAME;
        }
        // Drag at rest: the motion's value is left untouched.
        assert_eq!(r.parameter(params::ANGLE_X), Some(0.0));
        assert_eq!(r.wind, (0.0, 0.0));
    }

    #[test]
    fn pointer_down_before_attach_starts_no_drag() {
        let mut c = controller();
        let mut r = rig();
        c.pointer_down(200.0, 50.0, 0.0);
        c.attach(&mut r, canvas());

        let mut t = 0.0;
        for _ in 0..30 {
            c.update(&mut r, t);
            t += FRAME;
        }
        let angle = r.parameter(params::ANGLE_X).unwrap();
        assert_eq!(angle, 0.0, "got {}", angle);
        assert_eq!(r.wind, (0.0, 0.0));
    }

    #[test]
    fn expression_fades_in_after_gaze_and_drag() {
        let (mut c, mut r) = attached();
        c.set_expression("smile", 1.0);
        c.update(&mut r, 10.0);
        assert_eq!(r.parameter("ParamMouthForm"), Some(0.0));

        c.update(&mut r, 10.125);
        let v = r.parameter("ParamMouthForm").unwrap();
        assert!((v - 0.5).abs() < 1e-4, "got {}", v);
    }

    #[test]
    fn tap_plays_clip_and_tracks_active_motion() {
        let (mut c, mut r) = attached();
        c.pointer_down(10.0, 10.0, 1.0);
        let gesture = c.pointer_up(&mut r, 10.0, 10.0, 1.05);
        assert_eq!(gesture, Some(Gesture::Tap { body: false }));

        let start = r.started.last().unwrap();
        assert_eq!(start.group, "Tap");
        assert!(start.index < 2);
        assert_eq!(c.active_motion().map(|m| m.group.as_str()), Some("Tap"));

        c.update(&mut r, 1.1);
        assert!(c.active_motion().is_some());

        r.set_current_group(Some("Idle"));
        c.update(&mut r, 3.0);
        assert_eq!(c.active_motion(), None);
    }

    #[test]
    fn body_tap_plays_body_clip() {
        let (mut c, mut r) = attached();
        c.pointer_down(100.0, 80.0, 1.0);
        c.pointer_up(&mut r, 100.0, 80.0, 1.05);
        let start = r.started.last().unwrap();
        assert_eq!((start.group.as_str(), start.index), ("Tap@Body", 0));
    }

    #[test]
    fn direct_setters_write_standard_parameters() {
        let (c, mut r) = attached();
        c.set_head_rotation(&mut r, 10.0, -5.0, 0.0);
        c.set_body_rotation(&mut r, 3.0, 0.0);
        c.look_at(&mut r, 0.2, -0.4);
        c.set_mouth_open(&mut r, 1.7);
        assert_eq!(r.parameter(params::ANGLE_X), Some(10.0));
        assert_eq!(r.parameter(params::ANGLE_Y), Some(-5.0));
        assert_eq!(r.parameter(params::BODY_ANGLE_X), Some(3.0));
        assert_eq!(r.parameter(params::EYE_BALL_Y), Some(-0.4));
        assert_eq!(r.parameter(params::MOUTH_OPEN_Y), Some(1.0));

        c.set_mouth_open(&mut r, -1.0);
        assert_eq!(r.parameter(params::MOUTH_OPEN_Y), Some(0.0));
    }

    #[test]
    fn set_parameter_ignores_unknown_ids() {
        let (c, mut r) = attached();
        c.set_parameter(&mut r, "ParamMouthForm", 0.3);
        c.set_parameter(&mut r, "ParamNope", 0.3);
        assert_eq!(c.parameter(&r, "ParamMouthForm"), Some(0.3));
        assert_eq!(c.parameter(&r, "ParamNope"), None);
        assert_eq!(c.parameter_names(&r).len(), 9);
    }

    #[test]
    fn emotion_update_drives_expression_and_records_command() {
        let (mut c, mut r) = attached();
        let update = EmotionUpdate {
            new_emotion: Vad::new(0.6, 0.4, 0.1),
            discrete_emotion: DiscreteEmotion::new("joy", "high"),
            emotion_intensity: 1.0,
            body_budget: 0.9,
        };
        let cmd = apply_emotion_update(&mut c, &update).unwrap();
        assert_eq!(cmd.expression, "cheerful");
        assert_eq!(c.expression(), Some("cheerful"));
        assert_eq!(c.last_emotion_command(), Some(&cmd));

        c.update(&mut r, 0.0);
        c.update(&mut r, 1.0);
        assert!((c.expression_weight() - 0.85).abs() < 1e-6);

        let neutral = EmotionUpdate {
            new_emotion: Vad::new(0.0, 0.0, 0.9),
            discrete_emotion: DiscreteEmotion::new("wistful", "low"),
            emotion_intensity: 0.2,
            body_budget: 0.9,
        };
        assert_eq!(apply_emotion_update(&mut c, &neutral), None);
        assert_eq!(c.last_emotion_command(), None);
        c.update(&mut r, 2.0);
        assert_eq!(c.expression_weight(), 0.0);
    }

    // ── Camera ─────────────────────────────────────────

    struct InstantTracker {
        sink: Mutex<Option<TrackSink>>,
        destroyed: AtomicUsize,
    }

    impl InstantTracker {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sink: Mutex::new(None),
                destroyed: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl FaceTracker for InstantTracker {
        fn id(&self) -> &str {
            "instant"
        }

        async fn init(&self, _config: &TrackerInitConfig, sink: TrackSink) -> Result<(), TrackingError> {
            *self.sink.lock().unwrap() = Some(sink);
            Ok(())
        }

        fn destroy(&self) {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn camera_without_surface_is_an_error() {
        let (mut c, _r) = attached();
        assert!(c.set_camera_tracking(true, None).is_none());
        assert_eq!(c.camera_tracking_status(), CameraTrackingStatus::Error);
    }

    #[tokio::test]
    async fn camera_without_library_is_an_error() {
        let (mut c, _r) = attached();
        let handle = c.set_camera_tracking(true, Some("face-canvas")).unwrap();
        assert_eq!(handle.await.unwrap(), Err(TrackingError::LibraryUnavailable));
        assert_eq!(c.camera_tracking_status(), CameraTrackingStatus::Error);
    }

    #[tokio::test]
    async fn camera_gaze_outranks_pointer_and_stops_cleanly() {
        let backend = InstantTracker::new();
        let mut c = controller().with_face_tracker(backend.clone());
        let mut r = rig();
        c.attach(&mut r, canvas());

        let handle = c.set_camera_tracking(true, Some("face-canvas")).unwrap();
        assert_eq!(c.camera_tracking_status(), CameraTrackingStatus::Requesting);
        handle.await.unwrap().unwrap();
        assert_eq!(c.camera_tracking_status(), CameraTrackingStatus::Active);

        let sink = backend.sink.lock().unwrap().clone().unwrap();
        sink.send(TrackState {
            detected: 1.0,
            rx: 0.1,
            ry: 0.0,
            rz: 0.0,
        });
        c.pointer_move(0.0, 0.0);
        c.update(&mut r, 1.0);
        assert_eq!(r.parameter(params::EYE_BALL_X), Some(0.0));
        assert!((r.parameter(params::EYE_BALL_Y).unwrap() - 0.2).abs() < 1e-6);

        c.set_camera_tracking(false, None);
        assert_eq!(c.camera_tracking_status(), CameraTrackingStatus::Off);
        c.update(&mut r, 2.0);
        // Back to pointer gaze.
        assert_eq!(r.parameter(params::EYE_BALL_X), Some(-1.0));
        assert_eq!(r.parameter(params::EYE_BALL_Y), Some(1.0));
    }

    #[tokio::test]
    async fn enable_without_surface_leaves_running_tracker_alone() {
        let backend = InstantTracker::new();
        let mut c = controller().with_face_tracker(backend.clone());
        let mut r = rig();
        c.attach(&mut r, canvas());

        let handle = c.set_camera_tracking(true, Some("face-canvas")).unwrap();
        handle.await.unwrap().unwrap();
        assert_eq!(c.camera_tracking_status(), CameraTrackingStatus::Active);

        assert!(c.set_camera_tracking(true, None).is_none());
        assert_eq!(c.camera_tracking_status(), CameraTrackingStatus::Active);
        assert!(c.camera.is_enabled());

        c.set_camera_tracking(false, None);
        assert_eq!(c.camera_tracking_status(), CameraTrackingStatus::Off);
        let destroyed = backend.destroyed.load(Ordering::SeqCst);
        assert_eq!(destroyed, 1, "got {}", destroyed);
    }

    #[test]
    fn detach_stops_everything() {
        let (mut c, _r) = attached();
        c.set_expression("smile", 1.0);
        c.detach();
        assert!(!c.is_loaded());
        assert_eq!(c.expression(), None);
        assert_eq!(c.camera_tracking_status(), CameraTrackingStatus::Off);
    }
}
