pub mod context;
#[cfg(feature = "egui")]
pub mod egui_painter;
pub mod surface;

pub use context::{Color, DrawCommand, RenderContext, Stroke, StrokePattern};
pub use surface::{CameraSurface, HeadlessSurface};
#[cfg(feature = "egui")]
pub use egui_painter::EguiMapPainter;
