use crate::core::{
    geo::Point,
    viewport::{CameraState, Viewport},
};
use crate::{MapError, Result};

/// The render surface as seen by the camera: it owns the camera state and
/// accepts new states only through [`CameraSurface::apply_camera`].
pub trait CameraSurface {
    fn camera(&self) -> CameraState;

    /// Applies a new camera. Fails once the surface has been torn down.
    fn apply_camera(&mut self, camera: CameraState) -> Result<()>;

    /// Surface size in pixels
    fn viewport_size(&self) -> Point;

    fn viewport(&self) -> Viewport {
        Viewport::new(self.camera(), self.viewport_size())
    }
}

/// In-memory surface for headless hosts and tests
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    camera: CameraState,
    size: Point,
    attached: bool,
    record_history: bool,
    history: Vec<CameraState>,
}

impl HeadlessSurface {
    pub fn new(camera: CameraState, size: Point) -> Self {
        Self {
            camera,
            size,
            attached: true,
            record_history: false,
            history: Vec::new(),
        }
    }

    /// Keeps every applied camera, in order
    pub fn with_history(mut self) -> Self {
        self.record_history = true;
        self
    }

    pub fn history(&self) -> &[CameraState] {
        &self.history
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Simulates teardown: later applies fail
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl CameraSurface for HeadlessSurface {
    fn camera(&self) -> CameraState {
        self.camera
    }

    fn apply_camera(&mut self, camera: CameraState) -> Result<()> {
        if !self.attached {
            return Err(MapError::SurfaceUnavailable(
                "camera applied after surface teardown".to_string(),
            ));
        }
        self.camera = camera;
        if self.record_history {
            self.history.push(camera);
        }
        Ok(())
    }

    fn viewport_size(&self) -> Point {
        self.size
    }
}
