//! Scripted sequences of camera flights.
//!
//! A tour is advanced by the controller's frame tick: it flies to a stop,
//! waits `fly_duration + stop_duration` of frame-clock time, reports the stop
//! and moves on. The caller observes completion through a [`TourHandle`].

use crate::core::geo::LatLng;
use futures::channel::oneshot;
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourStop {
    pub position: LatLng,
    pub label: Option<String>,
}

impl TourStop {
    pub fn new(position: LatLng) -> Self {
        Self {
            position,
            label: None,
        }
    }

    pub fn labeled(position: LatLng, label: impl Into<String>) -> Self {
        Self {
            position,
            label: Some(label.into()),
        }
    }
}

/// How a tour ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourOutcome {
    Completed,
    Cancelled,
}

/// Resolves once the tour has visited every stop or was cancelled
#[derive(Debug)]
pub struct TourHandle {
    receiver: oneshot::Receiver<TourOutcome>,
}

impl TourHandle {
    /// Handle for a tour with nothing to do
    pub(crate) fn completed() -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(TourOutcome::Completed);
        Self { receiver }
    }

    /// Outcome if the tour has already ended
    pub fn try_outcome(&mut self) -> Option<TourOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::Canceled) => Some(TourOutcome::Cancelled),
        }
    }
}

impl Future for TourHandle {
    type Output = TourOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or(TourOutcome::Cancelled))
    }
}

pub type StopCallback = Box<dyn FnMut(usize, &TourStop)>;

/// What the controller should do after advancing a tour
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TourAction {
    Wait,
    FlyTo {
        target: LatLng,
        zoom: f64,
        duration: Duration,
    },
    Finished,
}

pub(crate) struct Tour {
    stops: Vec<TourStop>,
    zoom: f64,
    stop_duration: Duration,
    fly_duration: Duration,
    on_stop_reached: StopCallback,
    index: usize,
    /// When the flight to `stops[index]` was issued
    issued_at: Option<Instant>,
    sender: Option<oneshot::Sender<TourOutcome>>,
}

impl Tour {
    /// Creates a tour over a non-empty list of stops
    pub(crate) fn new(
        stops: Vec<TourStop>,
        zoom: f64,
        stop_duration: Duration,
        fly_duration: Duration,
        on_stop_reached: StopCallback,
    ) -> (Self, TourHandle) {
        let (sender, receiver) = oneshot::channel();
        let tour = Self {
            stops,
            zoom,
            stop_duration,
            fly_duration,
            on_stop_reached,
            index: 0,
            issued_at: None,
            sender: Some(sender),
        };
        (tour, TourHandle { receiver })
    }

    pub(crate) fn current_stop(&self) -> Option<&TourStop> {
        self.stops.get(self.index)
    }

    pub(crate) fn advance(&mut self, now: Instant) -> TourAction {
        let Some(issued_at) = self.issued_at else {
            return self.fly_to_current(now);
        };

        let elapsed = if now > issued_at {
            now - issued_at
        } else {
            Duration::ZERO
        };
        if elapsed < self.fly_duration + self.stop_duration {
            return TourAction::Wait;
        }

        if let Some(stop) = self.stops.get(self.index) {
            log::debug!("tour reached stop {} ({:?})", self.index, stop.label);
            (self.on_stop_reached)(self.index, stop);
        }
        self.index += 1;
        if self.index >= self.stops.len() {
            self.finish(TourOutcome::Completed);
            return TourAction::Finished;
        }
        self.fly_to_current(now)
    }

    fn fly_to_current(&mut self, now: Instant) -> TourAction {
        match self.stops.get(self.index) {
            Some(stop) => {
                self.issued_at = Some(now);
                TourAction::FlyTo {
                    target: stop.position,
                    zoom: self.zoom,
                    duration: self.fly_duration,
                }
            }
            None => {
                self.finish(TourOutcome::Completed);
                TourAction::Finished
            }
        }
    }

    fn finish(&mut self, outcome: TourOutcome) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(outcome);
        }
    }
}

impl Drop for Tour {
    fn drop(&mut self) {
        self.finish(TourOutcome::Cancelled);
    }
}
