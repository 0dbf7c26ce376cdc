//! Utility re-exports and helper macros for the odometry front end.
//!
//! This module re-exports the odometry pipeline, timing, board configuration,
//! and actuation controllers:
//!
//! - `odometry`: edge counting, rate scheduling, and the publish cycle
//! - `controllers`: bounded PWM output for the motor path
//! - `config`: board pin assignments and calibration constants
//!
//! The `mk_static!` macro simplifies static initialization in no-std contexts.

pub mod config;
pub mod controllers;
pub mod odometry;

pub use controllers::pwm::BoundedPwm;
pub use embassy_time::*;
pub use odometry::cycle::{ChannelPublisher, OdometryCycle, OdometryPublisher};
pub use odometry::encoder::{EdgeCounter, WheelEncoders};
pub use odometry::scheduler::RateScheduler;

#[macro_export]
/// Initialize a no-std static cell and write the given value into it.
///
/// This macro creates a `static_cell::StaticCell` for type `$t` and initializes
/// it with `$val`, returning a mutable reference to the stored value.
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        STATIC_CELL.uninit().write($val)
    }};
}
