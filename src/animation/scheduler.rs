//! Per-frame hookups between running animations and the host frame clock.
//!
//! The host decides how frames are produced (a vsync callback, an egui
//! `request_repaint`, a timer in a headless test). Animations only register
//! interest through a [`FrameScheduler`] and release it when they end.

use fxhash::FxHashSet;

/// Opaque handle for one per-frame hookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickerHandle(u64);

impl TickerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Host frame clock seen from the animation side
pub trait FrameScheduler {
    /// Registers interest in per-frame ticks
    fn acquire(&mut self) -> TickerHandle;

    /// Releases a hookup. Releasing an unknown handle is a no-op.
    fn release(&mut self, handle: TickerHandle);

    /// Number of hookups currently registered
    fn active_count(&self) -> usize;

    /// Whether the host should keep producing frames
    fn wants_frames(&self) -> bool {
        self.active_count() > 0
    }
}

/// Scheduler that only tracks hookups; the host pumps ticks itself.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    active: FxHashSet<u64>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn acquire(&mut self) -> TickerHandle {
        let handle = TickerHandle(self.next_id);
        self.next_id += 1;
        self.active.insert(handle.0);
        handle
    }

    fn release(&mut self, handle: TickerHandle) {
        if !self.active.remove(&handle.0) {
            log::debug!("release of unknown ticker {}", handle.0);
        }
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release() {
        let mut scheduler = ManualFrameScheduler::new();
        let a = scheduler.acquire();
        let b = scheduler.acquire();
        assert_ne!(a, b);
        assert_eq!(scheduler.active_count(), 2);

        scheduler.release(a);
        scheduler.release(a);
        assert_eq!(scheduler.active_count(), 1);
        assert!(scheduler.wants_frames());

        scheduler.release(b);
        assert!(!scheduler.wants_frames());
    }
}
