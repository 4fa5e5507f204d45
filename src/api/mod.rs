mod controller;
mod controller_config;
mod frame_clock;
mod snapshot_controller;

pub use controller::ChartController;
pub use controller_config::{ChartControllerConfig, DEFAULT_TICK_SECTIONS};
pub use frame_clock::{
    FrameClock, FrameScheduler, FrameSubscription, ManualClock, ManualFrameScheduler,
    MonotonicClock,
};
