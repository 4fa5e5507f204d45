use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond time source used to stamp transition starts.
///
/// Hosts normally pass the animation-frame timestamp to read calls and let
/// the controller read this clock for setter-driven retargets, so both must
/// share an origin.
pub trait FrameClock {
    fn now_ms(&self) -> f64;
}

/// Wall-clock milliseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Host-driven clock; clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<f64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

/// Handle for one registered frame-callback subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSubscription(pub u64);

/// Host hook that delivers per-refresh callbacks while bars are moving.
///
/// The controller requests frames when a transition starts and cancels the
/// subscription once every bar is idle or on dispose. It never holds more than
/// one subscription.
pub trait FrameScheduler {
    fn request_frames(&mut self) -> FrameSubscription;
    fn cancel_frames(&mut self, subscription: FrameSubscription);
}

#[derive(Debug, Default)]
struct ManualSchedulerState {
    next_id: u64,
    active: Vec<FrameSubscription>,
    requested: usize,
    cancelled: usize,
}

/// Bookkeeping scheduler for headless hosts and tests; clones share state.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    state: Rc<RefCell<ManualSchedulerState>>,
}

impl ManualFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.state.borrow().active.len()
    }

    #[must_use]
    pub fn requested(&self) -> usize {
        self.state.borrow().requested
    }

    #[must_use]
    pub fn cancelled(&self) -> usize {
        self.state.borrow().cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frames(&mut self) -> FrameSubscription {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let subscription = FrameSubscription(state.next_id);
        state.active.push(subscription);
        state.requested += 1;
        subscription
    }

    fn cancel_frames(&mut self, subscription: FrameSubscription) {
        let mut state = self.state.borrow_mut();
        if let Some(position) = state.active.iter().position(|entry| *entry == subscription) {
            state.active.remove(position);
            state.cancelled += 1;
        }
    }
}
