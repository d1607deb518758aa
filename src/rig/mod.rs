pub mod interface;
pub mod memory;
pub mod params;

pub use interface::{
    FocusController, HitTester, MotionCurve, MotionPlayer, MotionPriority, ParameterStore,
    PhysicsInput, Rig,
};
pub use memory::MemoryRig;
