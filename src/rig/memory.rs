//! In-memory rig.
//!
//! A plain parameter table with motion bookkeeping, used by headless hosts
//! and by the test suites. It records what the core asked of it so callers
//! can inspect motion starts, focus requests and wind input.

use std::collections::HashMap;

use super::interface::{
    FocusController, HitTester, MotionCurve, MotionPlayer, MotionPriority, ParameterStore,
    PhysicsInput,
};
use crate::gaze::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct MotionStart {
    pub group: String,
    pub index: usize,
    pub priority: MotionPriority,
}

#[derive(Debug, Clone)]
pub struct MemoryRig {
    ids: Vec<String>,
    values: HashMap<String, f32>,
    idle_group: String,
    /// Loaded clips per group, each clip a list of curves.
    motions: HashMap<String, Vec<Vec<MotionCurve>>>,
    current_group: Option<String>,
    hit_regions: Vec<(String, Rect)>,
    pub started: Vec<MotionStart>,
    pub focus_target: Option<(f32, f32)>,
    pub focus_requests: usize,
    pub focus_updates: usize,
    pub wind: (f32, f32),
}

impl MemoryRig {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            values: HashMap::new(),
            idle_group: "Idle".to_string(),
            motions: HashMap::new(),
            current_group: None,
            hit_regions: Vec::new(),
            started: Vec::new(),
            focus_target: None,
            focus_requests: 0,
            focus_updates: 0,
            wind: (0.0, 0.0),
        }
    }

    /// A rig exposing the given parameter ids, all starting at zero.
    pub fn with_parameters<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rig = Self::new();
        for id in ids {
            rig.add_parameter(id, 0.0);
        }
        rig
    }

    pub fn add_parameter(&mut self, id: impl Into<String>, value: f32) {
        let id = id.into();
        if !self.values.contains_key(&id) {
            self.ids.push(id.clone());
        }
        self.values.insert(id, value);
    }

    pub fn add_motion(&mut self, group: impl Into<String>, curves: Vec<MotionCurve>) {
        self.motions.entry(group.into()).or_default().push(curves);
    }

    pub fn add_hit_region(&mut self, name: impl Into<String>, rect: Rect) {
        self.hit_regions.push((name.into(), rect));
    }

    pub fn set_idle_group(&mut self, group: impl Into<String>) {
        self.idle_group = group.into();
    }

    /// Simulate the currently playing clip finishing (or a new one starting
    /// without going through [`MotionPlayer::start_motion`]).
    pub fn set_current_group(&mut self, group: Option<&str>) {
        self.current_group = group.map(str::to_string);
    }

    pub fn curves(&self, group: &str, index: usize) -> Option<&[MotionCurve]> {
        self.motions
            .get(group)
            .and_then(|clips| clips.get(index))
            .map(Vec::as_slice)
    }
}

impl Default for MemoryRig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore for MemoryRig {
    fn parameter(&self, id: &str) -> Option<f32> {
        self.values.get(id).copied()
    }

    fn set_parameter(&mut self, id: &str, value: f32) {
        if let Some(slot) = self.values.get_mut(id) {
            *slot = value;
        }
    }

    fn parameter_ids(&self) -> Vec<String> {
        self.ids.clone()
    }
}

impl MotionPlayer for MemoryRig {
    fn start_motion(&mut self, group: &str, index: usize, priority: MotionPriority) -> bool {
        self.started.push(MotionStart {
            group: group.to_string(),
            index,
            priority,
        });
        self.current_group = Some(group.to_string());
        true
    }

    fn current_group(&self) -> Option<String> {
        self.current_group.clone()
    }

    fn idle_group(&self) -> String {
        self.idle_group.clone()
    }

    fn motion_groups(&self) -> HashMap<String, usize> {
        self.motions
            .iter()
            .map(|(group, clips)| (group.clone(), clips.len()))
            .collect()
    }

    fn with_group_curves(&mut self, group: &str, f: &mut dyn FnMut(&mut Vec<MotionCurve>)) {
        if let Some(clips) = self.motions.get_mut(group) {
            for curves in clips.iter_mut() {
                f(curves);
            }
        }
    }
}

impl HitTester for MemoryRig {
    fn hit_test(&self, x: f32, y: f32) -> Vec<String> {
        self.hit_regions
            .iter()
            .filter(|(_, rect)| rect.contains(x, y))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl FocusController for MemoryRig {
    fn focus(&mut self, x: f32, y: f32, _instant: bool) {
        self.focus_target = Some((x, y));
        self.focus_requests += 1;
    }

    fn update_focus(&mut self, _elapsed: f32) {
        self.focus_updates += 1;
    }
}

impl PhysicsInput for MemoryRig {
    fn set_wind(&mut self, x: f32, y: f32) {
        self.wind = (x, y);
    }
}
