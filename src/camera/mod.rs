pub mod controller;
pub mod operation;
pub mod tour;

pub use controller::CameraController;
pub use operation::CameraOperation;
pub use tour::{StopCallback, TourHandle, TourOutcome, TourStop};
