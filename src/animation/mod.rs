pub mod easing;
pub mod engine;
pub mod scheduler;

// Re-export commonly used types for convenience
pub use easing::{EasingCurve, Interpolatable};
pub use engine::{AnimationChannel, AnimationEngine, AnimationTask};
pub use scheduler::{FrameScheduler, ManualFrameScheduler, TickerHandle};
