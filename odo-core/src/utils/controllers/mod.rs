//! Module Exports
//!
//! This file exports the actuation controllers used alongside the odometry
//! pipeline.
//!
//! - `pwm`: bounded analog output wrapping a PWM channel.

pub mod pwm;

pub use pwm::BoundedPwm;
