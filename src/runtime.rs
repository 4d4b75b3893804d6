//! Tokio frame driver for hosts without their own display loop.
//!
//! Windowed hosts call [`AnimatedMap::frame`] from their repaint callback.
//! Headless hosts (servers rendering previews, the demo binary, tests) use
//! [`drive_frames`] to get the same cadence from a tokio interval.

use crate::core::map::AnimatedMap;
use crate::rendering::{context::RenderContext, surface::CameraSurface};
use instant::Instant;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Frame interval for a target frame rate; zero is treated as 1 fps
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}

/// Produces frames every `period` until the map has nothing left to animate
/// or `max_frames` frames were produced. Returns the number of frames.
///
/// Late ticks are skipped rather than bunched, so a stalled executor drops
/// frames instead of replaying them.
pub async fn drive_frames<S, F>(
    map: &mut AnimatedMap<S>,
    period: Duration,
    max_frames: u64,
    mut on_frame: F,
) -> u64
where
    S: CameraSurface,
    F: FnMut(&RenderContext),
{
    let mut ticker = interval(period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frames = 0;
    while frames < max_frames {
        ticker.tick().await;
        let context = map.frame(Instant::now());
        on_frame(&context);
        frames += 1;
        if !map.is_animating() {
            break;
        }
    }
    log::debug!("frame driver stopped after {} frames", frames);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        geo::{LatLng, Point},
        viewport::CameraState,
    };
    use crate::rendering::surface::HeadlessSurface;

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(50), Duration::from_millis(20));
        assert_eq!(frame_interval(0), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_drive_frames_until_idle() {
        let surface = HeadlessSurface::new(
            CameraState::new(LatLng::new(0.0, 0.0), 4.0),
            Point::new(400.0, 300.0),
        );
        let mut map = AnimatedMap::new(surface);
        map.mark_ready();
        map.controller_mut().fly_to(
            LatLng::new(10.0, 10.0),
            6.0,
            Duration::from_millis(40),
            Default::default(),
        );

        let frames = drive_frames(&mut map, Duration::from_millis(5), 1_000, |_| {}).await;
        assert!(frames >= 2);
        assert!(frames < 1_000);
        assert!(map.controller().center().approx_eq(&LatLng::new(10.0, 10.0), 1e-9));
        assert_eq!(map.controller().zoom(), 6.0);
    }
}
