//! Motion clip definitions shipped with a character.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionDef {
    /// Stable key used by UIs and scripts (`"tap1"`, `"flickUp"`).
    pub key: String,
    pub group: String,
    pub index: usize,
    pub label: String,
    /// Clip length in seconds, when known.
    #[serde(default)]
    pub duration: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionCatalog {
    motions: Vec<MotionDef>,
}

impl MotionCatalog {
    pub fn new(motions: Vec<MotionDef>) -> Self {
        Self { motions }
    }

    /// The Hiyori sample rig's motion set.
    pub fn hiyori() -> Self {
        let def = |key: &str, group: &str, index: usize, label: &str, duration: f32| MotionDef {
            key: key.to_string(),
            group: group.to_string(),
            index,
            label: label.to_string(),
            duration: Some(duration),
        };
        Self::new(vec![
            def("idle1", "Idle", 0, "Idle (default)", 4.7),
            def("idle2", "Idle", 1, "Idle (smile)", 5.93),
            def("idle3", "Idle", 2, "Idle (lively)", 8.57),
            def("flick", "Flick", 0, "Surprise reaction", 4.2),
            def("flickDown", "FlickDown", 0, "Down reaction", 4.43),
            def("flickUp", "FlickUp", 0, "Up reaction", 5.37),
            def("tap1", "Tap", 0, "Tap reaction 1", 1.9),
            def("tap2", "Tap", 1, "Tap reaction 2", 1.9),
            def("tapBody", "Tap@Body", 0, "Body tap", 1.6),
            def("flickBody", "Flick@Body", 0, "Body flick", 4.17),
        ])
    }

    pub fn get(&self, key: &str) -> Option<&MotionDef> {
        self.motions.iter().find(|m| m.key == key)
    }

    pub fn find(&self, group: &str, index: usize) -> Option<&MotionDef> {
        self.motions
            .iter()
            .find(|m| m.group == group && m.index == index)
    }

    /// Clips of one group, in index order.
    pub fn group(&self, group: &str) -> Vec<&MotionDef> {
        let mut clips: Vec<&MotionDef> = self.motions.iter().filter(|m| m.group == group).collect();
        clips.sort_by_key(|m| m.index);
        clips
    }

    pub fn iter(&self) -> impl Iterator<Item = &MotionDef> {
        self.motions.iter()
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }
}
