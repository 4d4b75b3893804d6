//! Time-driven camera interpolation.
//!
//! The engine keeps at most one task per [`AnimationChannel`]. Each host frame
//! calls [`AnimationEngine::tick`], which samples every running task, writes
//! the channel's fields onto the surface's current camera and applies it.

use crate::animation::{
    easing::{EasingCurve, Interpolatable},
    scheduler::{FrameScheduler, ManualFrameScheduler, TickerHandle},
};
use crate::core::viewport::CameraState;
use crate::rendering::surface::CameraSurface;
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Independently animatable camera attribute group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationChannel {
    /// Center and zoom
    View,
    Rotation,
}

impl AnimationChannel {
    /// Copies this channel's fields of `value` onto `target`
    fn write(self, target: &mut CameraState, value: &CameraState) {
        match self {
            AnimationChannel::View => {
                target.center = value.center;
                target.zoom = value.zoom;
            }
            AnimationChannel::Rotation => target.rotation = value.rotation,
        }
    }
}

/// A running interpolation between two camera states
#[derive(Debug, Clone)]
pub struct AnimationTask {
    pub channel: AnimationChannel,
    pub start: CameraState,
    pub end: CameraState,
    pub duration: Duration,
    pub easing: EasingCurve,
    /// Latched on the first tick after the task was started
    started_at: Option<Instant>,
    ticker: TickerHandle,
}

impl AnimationTask {
    /// Linear time progress in [0, 1]
    pub fn progress(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = if now > started_at {
            now - started_at
        } else {
            Duration::ZERO
        };
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Camera state at eased progress `eased`; every scalar is interpolated
    /// on its own
    pub fn sample(&self, eased: f64) -> CameraState {
        CameraState {
            center: self.start.center.lerp(&self.end.center, eased),
            zoom: self.start.zoom.lerp(&self.end.zoom, eased),
            rotation: self.start.rotation.lerp(&self.end.rotation, eased),
        }
    }
}

/// Outcome of advancing one task by one frame
struct Step {
    finished: bool,
    applied: bool,
}

fn advance<S: CameraSurface + ?Sized>(task: &mut AnimationTask, now: Instant, surface: &mut S) -> Step {
    task.started_at.get_or_insert(now);
    let t = task.progress(now);
    let finished = t >= 1.0;
    let value = if finished {
        task.end
    } else {
        task.sample(task.easing.apply(t))
    };

    let mut camera = surface.camera();
    task.channel.write(&mut camera, &value);
    let applied = match surface.apply_camera(camera) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("dropping {:?} animation frame: {}", task.channel, err);
            false
        }
    };

    Step { finished, applied }
}

/// Owns the running camera animations and their per-frame hookups
pub struct AnimationEngine {
    scheduler: Box<dyn FrameScheduler>,
    view: Option<AnimationTask>,
    rotation: Option<AnimationTask>,
    dropped_frames: u64,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::with_scheduler(Box::new(ManualFrameScheduler::new()))
    }

    pub fn with_scheduler(scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            view: None,
            rotation: None,
            dropped_frames: 0,
        }
    }

    fn slot(&mut self, channel: AnimationChannel) -> &mut Option<AnimationTask> {
        match channel {
            AnimationChannel::View => &mut self.view,
            AnimationChannel::Rotation => &mut self.rotation,
        }
    }

    /// Starts animating `channel` from `start` to `end`. A task already
    /// running on the channel is cancelled first. Zero-length animations
    /// apply `end` immediately.
    pub fn start<S: CameraSurface + ?Sized>(
        &mut self,
        channel: AnimationChannel,
        start: CameraState,
        end: CameraState,
        duration: Duration,
        easing: EasingCurve,
        surface: &mut S,
    ) {
        self.cancel(channel);

        if duration.is_zero() {
            let mut camera = surface.camera();
            channel.write(&mut camera, &end);
            if let Err(err) = surface.apply_camera(camera) {
                log::warn!("dropping immediate {:?} animation: {}", channel, err);
                self.dropped_frames += 1;
            }
            return;
        }

        let ticker = self.scheduler.acquire();
        log::debug!(
            "start {:?} animation over {:?} (ticker {})",
            channel,
            duration,
            ticker.id()
        );
        *self.slot(channel) = Some(AnimationTask {
            channel,
            start,
            end,
            duration,
            easing,
            started_at: None,
            ticker,
        });
    }

    /// Advances every running task to `now`. Returns true while any task is
    /// still running.
    pub fn tick<S: CameraSurface + ?Sized>(&mut self, now: Instant, surface: &mut S) -> bool {
        for slot in [&mut self.view, &mut self.rotation] {
            let Some(task) = slot.as_mut() else {
                continue;
            };
            let step = advance(task, now, surface);
            if !step.applied {
                self.dropped_frames += 1;
            }
            if step.finished {
                self.scheduler.release(task.ticker);
                *slot = None;
            }
        }
        self.is_animating()
    }

    /// Cancels the task on `channel`, leaving the camera where it is
    pub fn cancel(&mut self, channel: AnimationChannel) -> bool {
        match self.slot(channel).take() {
            Some(task) => {
                self.scheduler.release(task.ticker);
                log::debug!("cancelled {:?} animation", channel);
                true
            }
            None => false,
        }
    }

    /// Moves the end state of the running task on `channel`, keeping its
    /// start, timing and easing. Returns false when the channel is idle.
    pub fn retarget(&mut self, channel: AnimationChannel, end: CameraState) -> bool {
        match self.slot(channel).as_mut() {
            Some(task) => {
                channel.write(&mut task.end, &end);
                log::debug!("retargeted {:?} animation", channel);
                true
            }
            None => false,
        }
    }

    /// Cancels every task and releases all hookups
    pub fn cancel_all(&mut self) {
        self.cancel(AnimationChannel::View);
        self.cancel(AnimationChannel::Rotation);
    }

    pub fn is_animating(&self) -> bool {
        self.view.is_some() || self.rotation.is_some()
    }

    pub fn is_channel_animating(&self, channel: AnimationChannel) -> bool {
        match channel {
            AnimationChannel::View => self.view.is_some(),
            AnimationChannel::Rotation => self.rotation.is_some(),
        }
    }

    pub fn active_channels(&self) -> Vec<AnimationChannel> {
        [&self.view, &self.rotation]
            .into_iter()
            .flatten()
            .map(|task| task.channel)
            .collect()
    }

    /// Target state of the running task on `channel`
    pub fn target(&self, channel: AnimationChannel) -> Option<CameraState> {
        match channel {
            AnimationChannel::View => self.view.as_ref().map(|task| task.end),
            AnimationChannel::Rotation => self.rotation.as_ref().map(|task| task.end),
        }
    }

    pub fn active_tickers(&self) -> usize {
        self.scheduler.active_count()
    }

    /// Frames whose apply failed and were dropped
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AnimationEngine {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
