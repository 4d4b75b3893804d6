//! Programmatic camera control with readiness gating.
//!
//! Until the render surface reports its first layout through
//! [`CameraController::mark_ready`], every mutating call is recorded as a
//! [`CameraOperation`]. The queue is replayed once, in call order, and then
//! dropped; from that point on calls execute directly.

use crate::animation::{
    easing::EasingCurve,
    engine::{AnimationChannel, AnimationEngine},
    scheduler::FrameScheduler,
};
use crate::camera::{
    operation::CameraOperation,
    tour::{Tour, TourAction, TourHandle, TourStop},
};
use crate::core::{
    config::{AnimationConfig, CameraLimits, FitConfig, MapOptions},
    constants::DEFAULT_ZOOM_DELTA,
    geo::{LatLng, LatLngBounds},
    viewport::CameraState,
};
use crate::rendering::surface::CameraSurface;
use instant::Instant;
use std::time::Duration;

#[derive(Debug)]
enum ReadyState {
    NotReady { pending: Vec<CameraOperation> },
    Ready,
}

pub struct CameraController<S: CameraSurface> {
    surface: S,
    engine: AnimationEngine,
    state: ReadyState,
    limits: CameraLimits,
    animation: AnimationConfig,
    fit: FitConfig,
    tour: Option<Tour>,
}

impl<S: CameraSurface> CameraController<S> {
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, &MapOptions::default())
    }

    pub fn with_options(surface: S, options: &MapOptions) -> Self {
        Self {
            surface,
            engine: AnimationEngine::new(),
            state: ReadyState::NotReady {
                pending: Vec::new(),
            },
            limits: options.camera.clone(),
            animation: options.animation.clone(),
            fit: options.fit.clone(),
            tour: None,
        }
    }

    /// Replaces the frame scheduler used for per-frame hookups
    pub fn with_scheduler(mut self, scheduler: Box<dyn FrameScheduler>) -> Self {
        self.engine = AnimationEngine::with_scheduler(scheduler);
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    pub fn animation_config(&self) -> &AnimationConfig {
        &self.animation
    }

    pub fn fit_config(&self) -> &FitConfig {
        &self.fit
    }

    /// Signals that the surface finished its first layout and replays the
    /// queued operations. Only the first call has an effect.
    pub fn mark_ready(&mut self) {
        match std::mem::replace(&mut self.state, ReadyState::Ready) {
            ReadyState::NotReady { pending } => {
                log::debug!("surface ready, replaying {} queued operations", pending.len());
                for operation in pending {
                    self.execute(operation);
                }
            }
            ReadyState::Ready => log::debug!("mark_ready called on a ready controller"),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ReadyState::Ready)
    }

    /// Operations waiting for readiness, oldest first
    pub fn pending_operations(&self) -> &[CameraOperation] {
        match &self.state {
            ReadyState::NotReady { pending } => pending.as_slice(),
            ReadyState::Ready => &[],
        }
    }

    fn submit(&mut self, operation: CameraOperation) {
        match &mut self.state {
            ReadyState::NotReady { pending } => {
                log::debug!("queueing {} until the surface is ready", operation.name());
                pending.push(operation);
            }
            ReadyState::Ready => self.execute(operation),
        }
    }

    fn execute(&mut self, operation: CameraOperation) {
        match operation {
            CameraOperation::FlyTo {
                target,
                zoom,
                duration,
                easing,
            } => self.run_fly_to(target, zoom, duration, easing),
            CameraOperation::JumpTo { target, zoom } => self.run_jump_to(target, zoom),
            CameraOperation::ZoomStep { delta } => self.run_zoom_step(delta),
            CameraOperation::RotateTo {
                degrees,
                duration,
            } => self.run_rotate_to(degrees, duration),
            CameraOperation::FitAllPoints {
                points,
                padding,
                max_zoom,
            } => self.run_fit_all_points(&points, padding, max_zoom),
        }
    }

    /// Animates center and zoom to `target`/`zoom`; rotation is untouched
    pub fn fly_to(&mut self, target: LatLng, zoom: f64, duration: Duration, easing: EasingCurve) {
        self.submit(CameraOperation::fly_to(target, zoom, duration, easing));
    }

    /// [`fly_to`](Self::fly_to) with the configured duration and curve
    pub fn fly_to_default(&mut self, target: LatLng, zoom: f64) {
        let duration = self.animation.fly_duration();
        let easing = self.animation.fly_easing;
        self.fly_to(target, zoom, duration, easing);
    }

    /// Sets the camera without animating. `None` keeps the current zoom.
    pub fn jump_to(&mut self, target: LatLng, zoom: Option<f64>) {
        self.submit(CameraOperation::JumpTo { target, zoom });
    }

    pub fn zoom_step(&mut self, delta: f64) {
        self.submit(CameraOperation::ZoomStep { delta });
    }

    pub fn zoom_in(&mut self) {
        self.zoom_step(DEFAULT_ZOOM_DELTA);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_step(-DEFAULT_ZOOM_DELTA);
    }

    pub fn rotate_to(&mut self, degrees: f64, duration: Duration) {
        self.submit(CameraOperation::rotate_to(degrees, duration));
    }

    pub fn reset_rotation(&mut self) {
        let duration = self.animation.rotate_duration();
        self.rotate_to(0.0, duration);
    }

    /// Flies to the view that fits every point. Empty input and boxes that
    /// cannot be fitted leave the camera alone.
    pub fn fit_all_points(&mut self, points: &[LatLng], padding: f64, max_zoom: f64) {
        self.submit(CameraOperation::FitAllPoints {
            points: points.to_vec(),
            padding,
            max_zoom,
        });
    }

    /// Visits `stops` one after another. Each stop gets a flight of
    /// `fly_duration` and a pause of `stop_duration`, then `on_stop_reached`
    /// is called with its index. A running tour is cancelled first.
    pub fn start_tour<F>(
        &mut self,
        stops: Vec<TourStop>,
        zoom: f64,
        stop_duration: Duration,
        fly_duration: Duration,
        on_stop_reached: F,
    ) -> TourHandle
    where
        F: FnMut(usize, &TourStop) + 'static,
    {
        self.cancel_tour();
        if stops.is_empty() {
            log::debug!("empty tour completes immediately");
            return TourHandle::completed();
        }

        log::info!("starting tour over {} stops", stops.len());
        let (tour, handle) = Tour::new(
            stops,
            zoom,
            stop_duration,
            fly_duration,
            Box::new(on_stop_reached),
        );
        self.tour = Some(tour);
        handle
    }

    /// Stops the running tour; its handle resolves as cancelled
    pub fn cancel_tour(&mut self) -> bool {
        match self.tour.take() {
            Some(_) => {
                log::debug!("tour cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_touring(&self) -> bool {
        self.tour.is_some()
    }

    /// The stop the running tour is flying to or pausing at
    pub fn current_tour_stop(&self) -> Option<&TourStop> {
        self.tour.as_ref().and_then(|tour| tour.current_stop())
    }

    /// Advances the tour and the running animations to `now`. Returns true
    /// while anything still needs frames.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(tour) = self.tour.as_mut() {
            match tour.advance(now) {
                TourAction::Wait => {}
                TourAction::FlyTo {
                    target,
                    zoom,
                    duration,
                } => {
                    let easing = self.animation.fly_easing;
                    self.fly_to(target, zoom, duration, easing);
                }
                TourAction::Finished => {
                    log::info!("tour completed");
                    self.tour = None;
                }
            }
        }

        let animating = self.engine.tick(now, &mut self.surface);
        animating || self.tour.is_some()
    }

    /// Cancels the tour, every animation and its per-frame hookup, and drops
    /// queued operations
    pub fn dispose(&mut self) {
        self.cancel_tour();
        self.engine.cancel_all();
        if let ReadyState::NotReady { pending } = &mut self.state {
            if !pending.is_empty() {
                log::debug!("dropping {} queued operations on dispose", pending.len());
            }
            pending.clear();
        }
    }

    pub fn camera(&self) -> CameraState {
        self.surface.camera()
    }

    pub fn center(&self) -> LatLng {
        self.camera().center
    }

    pub fn zoom(&self) -> f64 {
        self.camera().zoom
    }

    pub fn rotation(&self) -> f64 {
        self.camera().rotation
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    fn run_fly_to(&mut self, target: LatLng, zoom: f64, duration: Duration, easing: EasingCurve) {
        if !target.is_valid() || !zoom.is_finite() {
            log::warn!("ignoring fly_to({target:?}, {zoom}): invalid target");
            return;
        }
        let start = self.surface.camera();
        let end = CameraState {
            center: target,
            zoom,
            rotation: start.rotation,
        };
        self.engine.start(
            AnimationChannel::View,
            start,
            end,
            duration,
            easing,
            &mut self.surface,
        );
    }

    fn run_jump_to(&mut self, target: LatLng, zoom: Option<f64>) {
        if !target.is_valid() {
            log::warn!("ignoring jump_to({target:?}): invalid target");
            return;
        }
        self.engine.cancel(AnimationChannel::View);
        let mut camera = self.surface.camera();
        camera.center = target;
        if let Some(zoom) = zoom.filter(|z| z.is_finite()) {
            camera.zoom = zoom;
        }
        if let Err(err) = self.surface.apply_camera(camera) {
            log::warn!("jump_to dropped: {}", err);
        }
    }

    /// Steps relative to where the camera is heading: a running flight
    /// keeps its center and lands at the stepped zoom.
    fn run_zoom_step(&mut self, delta: f64) {
        if !delta.is_finite() {
            log::warn!("ignoring zoom_step({delta})");
            return;
        }
        if let Some(target) = self.engine.target(AnimationChannel::View) {
            let zoom = (target.zoom + delta).clamp(self.limits.min_zoom, self.limits.max_zoom);
            self.engine
                .retarget(AnimationChannel::View, CameraState { zoom, ..target });
            return;
        }

        let start = self.surface.camera();
        let zoom = (start.zoom + delta).clamp(self.limits.min_zoom, self.limits.max_zoom);
        let end = CameraState { zoom, ..start };
        self.engine.start(
            AnimationChannel::View,
            start,
            end,
            self.animation.zoom_duration(),
            self.animation.zoom_easing,
            &mut self.surface,
        );
    }

    fn run_rotate_to(&mut self, degrees: f64, duration: Duration) {
        if !degrees.is_finite() {
            log::warn!("ignoring rotate_to({degrees})");
            return;
        }
        let start = self.surface.camera();
        let end = CameraState {
            rotation: degrees,
            ..start
        };
        self.engine.start(
            AnimationChannel::Rotation,
            start,
            end,
            duration,
            self.animation.rotate_easing,
            &mut self.surface,
        );
    }

    fn run_fit_all_points(&mut self, points: &[LatLng], padding: f64, max_zoom: f64) {
        let Some(bounds) = LatLngBounds::from_points(points) else {
            log::info!("fit_all_points called without points, camera unchanged");
            return;
        };

        let viewport = self.surface.viewport();
        match viewport.fit_bounds(&bounds, padding, self.limits.min_zoom, max_zoom) {
            Ok(fitted) => {
                let duration = self.animation.fly_duration();
                let easing = self.animation.fly_easing;
                self.run_fly_to(fitted.center, fitted.zoom, duration, easing);
            }
            Err(err) => log::warn!("fit_all_points skipped: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use crate::rendering::surface::HeadlessSurface;

    fn controller() -> CameraController<HeadlessSurface> {
        let surface = HeadlessSurface::new(
            CameraState::new(LatLng::new(0.0, 0.0), 4.0),
            Point::new(800.0, 600.0),
        );
        CameraController::new(surface)
    }

    fn settle(controller: &mut CameraController<HeadlessSurface>, from: Instant) {
        controller.tick(from);
        controller.tick(from + Duration::from_secs(10));
    }

    #[test]
    fn test_calls_queue_until_ready() {
        let mut controller = controller();
        controller.jump_to(LatLng::new(10.0, 10.0), Some(6.0));
        controller.zoom_in();

        assert!(!controller.is_ready());
        assert_eq!(controller.pending_operations().len(), 2);
        assert_eq!(controller.center(), LatLng::new(0.0, 0.0));

        controller.mark_ready();
        assert!(controller.is_ready());
        assert!(controller.pending_operations().is_empty());
        assert_eq!(controller.center(), LatLng::new(10.0, 10.0));

        settle(&mut controller, Instant::now());
        assert_eq!(controller.zoom(), 7.0);
    }

    #[test]
    fn test_mark_ready_replays_once() {
        let mut controller = controller();
        controller.zoom_in();
        controller.mark_ready();
        settle(&mut controller, Instant::now());
        controller.mark_ready();
        settle(&mut controller, Instant::now());
        assert_eq!(controller.zoom(), 5.0);
    }

    #[test]
    fn test_zoom_step_is_clamped() {
        let mut controller = controller();
        controller.mark_ready();
        controller.zoom_step(100.0);
        settle(&mut controller, Instant::now());
        assert_eq!(controller.zoom(), 18.0);

        controller.zoom_step(-100.0);
        settle(&mut controller, Instant::now());
        assert_eq!(controller.zoom(), 2.0);
    }

    #[test]
    fn test_rotation_leaves_view_alone() {
        let mut controller = controller();
        controller.mark_ready();
        controller.rotate_to(45.0, Duration::from_millis(200));
        settle(&mut controller, Instant::now());
        assert_eq!(controller.rotation(), 45.0);
        assert_eq!(controller.zoom(), 4.0);

        controller.reset_rotation();
        settle(&mut controller, Instant::now());
        assert_eq!(controller.rotation(), 0.0);
    }

    #[test]
    fn test_jump_cancels_flight() {
        let mut controller = controller();
        controller.mark_ready();
        controller.fly_to(
            LatLng::new(40.0, -74.0),
            12.0,
            Duration::from_secs(2),
            EasingCurve::Linear,
        );
        assert!(controller.is_animating());

        controller.jump_to(LatLng::new(1.0, 1.0), None);
        assert!(!controller.is_animating());
        assert_eq!(controller.engine().active_tickers(), 0);
        assert_eq!(controller.center(), LatLng::new(1.0, 1.0));
        assert_eq!(controller.zoom(), 4.0);
    }

    #[test]
    fn test_fit_ignores_empty_and_degenerate_input() {
        let mut controller = controller();
        controller.mark_ready();
        let before = controller.camera();

        controller.fit_all_points(&[], 50.0, 16.0);
        controller.fit_all_points(&[LatLng::new(5.0, 5.0)], 50.0, 16.0);
        controller.fit_all_points(
            &[LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)],
            500.0,
            16.0,
        );
        settle(&mut controller, Instant::now());
        assert_eq!(controller.camera(), before);
    }

    #[test]
    fn test_fit_flies_to_bounds() {
        let mut controller = controller();
        controller.mark_ready();
        controller.fit_all_points(
            &[LatLng::new(40.0, -75.0), LatLng::new(42.0, -73.0)],
            50.0,
            16.0,
        );
        settle(&mut controller, Instant::now());

        assert!(controller.center().approx_eq(&LatLng::new(41.0, -74.0), 1e-9));
        assert!(controller.zoom() > 4.0 && controller.zoom() <= 16.0);
    }

    #[test]
    fn test_dispose_releases_everything() {
        let mut controller = controller();
        controller.mark_ready();
        controller.fly_to_default(LatLng::new(3.0, 3.0), 8.0);
        controller.rotate_to(90.0, Duration::from_secs(1));
        let mut handle = controller.start_tour(
            vec![TourStop::new(LatLng::new(1.0, 1.0))],
            10.0,
            Duration::from_secs(1),
            Duration::from_secs(1),
            |_, _| {},
        );
        assert_eq!(controller.engine().active_tickers(), 2);

        controller.dispose();
        assert_eq!(controller.engine().active_tickers(), 0);
        assert!(!controller.is_touring());
        assert_eq!(handle.try_outcome(), Some(crate::camera::tour::TourOutcome::Cancelled));
    }
}
