pub mod drag;
pub mod gesture;

pub use drag::{DragOutput, DragPhysics};
pub use gesture::{classify, Gesture, GestureClassifier, PointerPress};
