pub mod payload;
pub mod resolver;
pub mod vad;

pub use payload::{DiscreteEmotion, EmotionUpdate, Vad};
pub use resolver::{apply_emotion_update, resolve_expression, EmotionCommand};
pub use vad::{vad_to_expression, VadMatch};
