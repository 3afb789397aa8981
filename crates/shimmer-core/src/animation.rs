use std::cell::RefCell;

use web_time::{Duration, Instant};

use crate::ShimmerOverlay;

pub(crate) fn now() -> Instant {
    CLOCK.with(|c| c.borrow().as_ref().map(|c| c.now()).unwrap_or_else(Instant::now))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseInOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

// Animation clock
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

thread_local! {
    static CLOCK: RefCell<Option<Box<dyn Clock>>> = const { RefCell::new(None) };
}

/// Install the animation clock for this thread. Hosts leave the system clock;
/// tests can set a `TestClock` and move it between frames.
pub fn set_clock(clock: Box<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = Some(clock));
}

/// A test clock you can drive deterministically.
#[derive(Clone)]
pub struct TestClock {
    pub t: Instant,
}
impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t
    }
}

/// A value that runs from 0 to `end` over `duration` and starts over, until
/// stopped.
#[derive(Clone, Debug)]
pub struct LoopingAnimation {
    duration: Duration,
    end: f32,
    easing: Easing,
    started: Instant,
    stopped_at: Option<Instant>,
}

impl LoopingAnimation {
    pub fn start(duration: Duration, end: f32, easing: Easing) -> Self {
        Self {
            duration,
            end,
            easing,
            started: now(),
            stopped_at: None,
        }
    }

    /// Current value in `0.0..end`. Frozen once stopped.
    pub fn value(&self) -> f32 {
        let at = self.stopped_at.unwrap_or_else(now);
        let period = self.duration.as_secs_f32();
        if period <= 0.0 {
            return self.end;
        }
        let elapsed = at.saturating_duration_since(self.started).as_secs_f32();
        let t = (elapsed % period) / period;
        self.easing.interpolate(t) * self.end
    }

    pub fn stop(&mut self) {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(now());
        }
    }

    pub fn is_running(&self) -> bool {
        self.stopped_at.is_none()
    }
}

/// Per-frame parameters of a shimmer sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayFrame {
    pub translate_x: f32,
    pub opacity: f32,
}

impl ShimmerOverlay {
    /// Maps sweep progress (`0.0..=1.0`) to the overlay's offset and opacity:
    /// the sweep travels from `-sweep_width` to `sweep_width` while fading
    /// from 0.5 to 0.
    pub fn frame(&self, progress: f32) -> OverlayFrame {
        let t = progress.clamp(0.0, 1.0);
        OverlayFrame {
            translate_x: (-self.sweep_width).interpolate(&self.sweep_width, t),
            opacity: 0.5f32.interpolate(&0.0, t),
        }
    }
}
